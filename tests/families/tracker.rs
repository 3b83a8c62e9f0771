//! Tracker family tests

use std::sync::Arc;

use towns_news::eventlog::PopularArticlesRecord;
use towns_news::report::ArticleSavesRow;
use towns_news::{
    Article, ArticleBuilder, ArticleId, ArticleRepository, CounterStore, Family, LogChannel,
    Portal, PortalConfig, RequestContext,
};

use super::common::{Fixture, numbered};

fn with_saves() -> Vec<Article> {
    (1..=12)
        .map(|id| {
            let saves = match id {
                3 => 4,
                5 => 1,
                _ => 0,
            };
            ArticleBuilder::new(id)
                .title(format!("Article {}", id))
                .saves(saves)
                .build()
                .unwrap()
        })
        .collect()
}

#[test]
fn test_placements_accumulate_across_facades() {
    let fixture = Fixture::new(numbered(12));
    for _ in 0..2 {
        let mut facade = fixture
            .portal
            .facade("TRACKER", RequestContext::anonymous())
            .unwrap();
        facade.build_and_notify(&mut fixture.candidates()).unwrap();
    }

    {
        let counters = fixture.portal.counters().lock().unwrap();
        for id in 1..=12 {
            assert_eq!(counters.article_count(ArticleId(id)), 2);
        }
    }

    let records = fixture
        .portal
        .event_log()
        .read_records::<PopularArticlesRecord>(LogChannel::PopularArticles)
        .unwrap()
        .unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].record.totals.values().all(|&n| n == 1));
    assert!(records[1].record.totals.values().all(|&n| n == 2));

    let views = fixture.portal.reports().article_views().unwrap();
    assert_eq!(views.len(), 12);
    assert!(views.iter().all(|row| row.views == 2));
}

#[test]
fn test_saves_report() {
    let fixture = Fixture::new(with_saves());
    for _ in 0..2 {
        let mut facade = fixture
            .portal
            .facade_for(Family::Tracker, RequestContext::anonymous());
        facade.build_and_notify(&mut fixture.candidates()).unwrap();
    }

    assert_eq!(
        fixture.portal.reports().article_saves().unwrap(),
        vec![
            ArticleSavesRow {
                id: ArticleId(3),
                title: "Article 3".to_string(),
                saves: 8,
            },
            ArticleSavesRow {
                id: ArticleId(5),
                title: "Article 5".to_string(),
                saves: 2,
            },
        ]
    );
}

#[test]
fn test_deleted_articles_drop_out_of_reports() {
    let fixture = Fixture::new(with_saves());
    let mut facade = fixture
        .portal
        .facade_for(Family::Tracker, RequestContext::anonymous());
    facade.build_and_notify(&mut fixture.candidates()).unwrap();

    fixture.repo.delete_article(ArticleId(3)).unwrap();

    let reports = fixture.portal.reports();
    assert_eq!(reports.article_views().unwrap().len(), 11);
    let saves = reports.article_saves().unwrap();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].id, ArticleId(5));
}

#[test]
fn test_portals_can_share_counters() {
    let fixture = Fixture::new(numbered(6));
    let counters = CounterStore::shared();
    let first = Portal::new(
        PortalConfig::new(fixture.dir.path().join("first")),
        fixture.repo.clone(),
    )
    .with_counters(Arc::clone(&counters));
    let second = Portal::new(
        PortalConfig::new(fixture.dir.path().join("second")),
        fixture.repo.clone(),
    )
    .with_counters(Arc::clone(&counters));

    for portal in [&first, &second] {
        portal
            .facade_for(Family::Tracker, RequestContext::anonymous())
            .build_and_notify(&mut fixture.candidates())
            .unwrap();
    }

    assert_eq!(counters.lock().unwrap().article_count(ArticleId(1)), 2);
}

#[test]
fn test_missing_logs_read_empty() {
    let fixture = Fixture::new(numbered(3));
    let reports = fixture.portal.reports();
    assert!(reports.article_views().unwrap().is_empty());
    assert!(reports.article_saves().unwrap().is_empty());
}
