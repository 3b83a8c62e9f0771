//! Word family tests

use towns_news::eventlog::{NewTagsRecord, ProhibitedWordsRecord, SeoIssueRecord};
use towns_news::report::{ProhibitedWordsRow, SeoRow};
use towns_news::{
    Article, ArticleBuilder, ArticleId, ArticleRepository, Family, LogChannel, RequestContext, Tag,
};

use super::common::Fixture;

const GOOD_TITLE: &str = "Regional council publishes its detailed budget for 2025";

fn articles() -> Vec<Article> {
    vec![
        ArticleBuilder::new(1)
            .title(GOOD_TITLE)
            .body("The budget passed without changes.")
            .tag(Tag::new(1, "council"))
            .build()
            .unwrap(),
        ArticleBuilder::new(2)
            .title("Short title")
            .body("Police warn about a phone scam targeting pensioners.")
            .tag(Tag::new(2, "police"))
            .build()
            .unwrap(),
        ArticleBuilder::new(3)
            .title("Another short title")
            .body("BREAKING: the bridge is open again.")
            .build()
            .unwrap(),
    ]
}

fn fixture() -> Fixture {
    let fixture = Fixture::with_config(articles(), |config| {
        config
            .with_family(Family::Word)
            .with_prohibited_words(vec!["breaking"])
    });
    fixture.repo.add_prohibited_word("scam").unwrap();
    fixture
}

#[test]
fn test_build_returns_word_report() {
    let fixture = fixture();
    let outcome = fixture
        .portal
        .front_page(RequestContext::anonymous())
        .unwrap();
    assert_eq!(outcome.blocks.article_count(), 3);

    let report = outcome.word_report.expect("word family returns its report");
    assert_eq!(
        report.prohibited_words,
        vec![ProhibitedWordsRow {
            id: ArticleId(2),
            title: "Short title".to_string(),
            words: "scam".to_string(),
        }]
    );
    assert_eq!(report.tags.len(), 3);
    assert_eq!(report.tags[0].tags, "council");
    assert_eq!(report.tags[2].tags, "");

    assert_eq!(report.seo.len(), 3);
    assert_eq!(
        report.seo[2],
        SeoRow {
            id: ArticleId(1),
            title: GOOD_TITLE.to_string(),
            passes: true,
        }
    );
    let passing: Vec<_> = report.seo.iter().filter(|row| row.passes).collect();
    assert_eq!(passing.len(), 1);
    assert_eq!(passing[0].title, GOOD_TITLE);
    // Failing titles are listed first
    assert!(!report.seo[0].passes);
    assert!(report.seo[2].passes);
}

#[test]
fn test_prohibited_words_observer_is_case_insensitive() {
    let fixture = fixture();
    fixture
        .portal
        .front_page(RequestContext::anonymous())
        .unwrap();

    let records = fixture
        .portal
        .event_log()
        .read_records::<ProhibitedWordsRecord>(LogChannel::ProhibitedWords)
        .unwrap()
        .unwrap();
    assert_eq!(records.len(), 1);

    let mut hits: Vec<_> = records[0]
        .record
        .hits
        .iter()
        .map(|hit| (hit.article_id, hit.word.as_str()))
        .collect();
    hits.sort();
    assert_eq!(hits, vec![(ArticleId(2), "scam"), (ArticleId(3), "breaking")]);
}

#[test]
fn test_seo_issues_logged_per_article() {
    let fixture = fixture();
    fixture
        .portal
        .front_page(RequestContext::anonymous())
        .unwrap();

    let mut titles: Vec<_> = fixture
        .portal
        .event_log()
        .read_records::<SeoIssueRecord>(LogChannel::SeoTitles)
        .unwrap()
        .unwrap()
        .into_iter()
        .map(|stamped| stamped.record.title)
        .collect();
    titles.sort();
    assert_eq!(titles, vec!["Another short title", "Short title"]);
}

#[test]
fn test_new_tags_only_for_unregistered_tags() {
    let fixture = fixture();
    fixture.repo.insert_article(
        ArticleBuilder::new(4)
            .title("Fresh tag")
            .tag(Tag::new(9, "weather"))
            .build()
            .unwrap(),
    );

    fixture
        .portal
        .front_page(RequestContext::anonymous())
        .unwrap();

    let records = fixture
        .portal
        .event_log()
        .read_records::<NewTagsRecord>(LogChannel::NewTags)
        .unwrap()
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].record.tags, vec!["weather"]);
}

#[test]
fn test_seo_table_empty_without_log() {
    let fixture = fixture();
    assert!(fixture.portal.reports().seo_data().unwrap().is_empty());
}

#[test]
fn test_seo_window_from_config() {
    let fixture = Fixture::with_config(articles(), |config| {
        config.with_family(Family::Word).with_seo_window(5, 100)
    });
    let outcome = fixture
        .portal
        .front_page(RequestContext::anonymous())
        .unwrap();

    // Every title fits the wide window, so nothing is logged
    assert!(
        fixture
            .portal
            .event_log()
            .read_lines(LogChannel::SeoTitles)
            .unwrap()
            .is_none()
    );
    assert!(outcome.word_report.unwrap().seo.is_empty());
    assert!(fixture.repo.prohibited_words().is_empty());
}
