//! Build a front page with every observer family and print the reports
//!
//! Run with `RUST_LOG=towns_news=debug cargo run --example front_page` to see
//! the assembly logs.

use std::sync::Arc;

use chrono::{Local, TimeDelta};
use towns_news::{
    Article, ArticleBuilder, Author, Family, InMemoryRepository, Portal, PortalConfig,
    RequestContext, Tag,
};

fn articles() -> towns_news::Result<Vec<Article>> {
    let today = Local::now().date_naive();
    let olena = Author::new(1, "Olena Kovalenko");
    let ivan = Author::new(2, "Ivan Petrenko");
    let headlines = [
        "Regional council publishes its detailed budget for 2025",
        "Bridge reopens",
        "Farmers market moves to the central square on Saturdays",
        "Police warn residents about a new phone scam",
        "School football team wins the regional championship",
        "Library extends opening hours during the exam season",
        "Heavy rain expected",
        "New bus route connects the hospital with the station",
        "Town museum opens an exhibition of local photography",
        "Water supply interrupted in the northern district",
        "Volunteers plant two hundred trees along the river",
        "Cinema festival announces its programme",
    ];

    headlines
        .iter()
        .enumerate()
        .map(|(index, title)| {
            let id = index as u64 + 1;
            let author = if id % 2 == 0 { &ivan } else { &olena };
            ArticleBuilder::new(id)
                .title(*title)
                .body(format!("{}. Details follow in the full article.", title))
                .author(author.clone())
                .tag(Tag::new(id % 3, ["city", "events", "transport"][(id % 3) as usize]))
                .published(today - TimeDelta::days(id as i64 * 20))
                .saves(id % 4)
                .build()
        })
        .collect()
}

fn main() -> towns_news::Result<()> {
    tracing_subscriber::fmt::init();

    let log_dir = std::env::temp_dir().join("towns-news-demo");
    let repo = Arc::new(InMemoryRepository::with_articles(articles()?));
    repo.add_prohibited_word("scam")?;

    let config = PortalConfig::new(&log_dir).with_prohibited_words(vec!["rain"]);
    let portal = Portal::new(config, repo);

    for family in Family::ALL {
        let mut facade = portal.facade_for(family, RequestContext::for_user("editor"));
        let mut candidates = portal.repository().articles();
        let outcome = facade.build_and_notify(&mut candidates)?;

        println!("== {} family ==", family);
        println!("Blocks: {}", outcome.blocks.describe());
        for message in &outcome.messages {
            println!("Flash: {}", message);
        }
    }

    // A short page leaves required slots empty
    let mut short: Vec<Article> = portal.repository().articles().into_iter().take(4).collect();
    portal
        .facade_for(Family::Error, RequestContext::anonymous())
        .build_and_notify(&mut short)?;

    let reports = portal.reports();
    println!("\n== Errors ==");
    for line in reports.errors()? {
        println!("  {}", line);
    }

    println!("\n== Activity ==");
    let activity = reports.activity_report()?;
    for row in &activity.authors {
        println!("  {} ({}): {}", row.name, row.id, row.count);
    }
    for row in &activity.block_views {
        println!("  {}: {} views", row.block, row.views);
    }

    println!("\n== Tracker ==");
    for row in reports.article_views()? {
        println!("  {} {:<60} {}", row.id, row.title, row.views);
    }
    for row in reports.article_saves()? {
        println!("  {} {:<60} {} saves", row.id, row.title, row.saves);
    }

    println!("\n== Word ==");
    let words = reports.word_report()?;
    for row in &words.prohibited_words {
        println!("  {} contains {}", row.title, row.words);
    }
    for row in &words.seo {
        let verdict = if row.passes { "ok" } else { "outside window" };
        println!("  {:<60} {}", row.title, verdict);
    }

    println!("\n== Count ==");
    let overview = reports.overview(Local::now().date_naive())?;
    for row in &overview.creation_logs {
        println!("  {}s: {}", row.time_info, row.block_type);
    }
    for row in &overview.updates {
        println!("  {} {}", row.timestamp, row.message);
    }

    println!("\nEvent logs written to {}", log_dir.display());
    Ok(())
}
