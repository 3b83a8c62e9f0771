//! Error family tests

use towns_news::report::{ERROR_LOG_NOT_FOUND, NO_CURRENT_ERRORS};
use towns_news::{BlockKind, LogChannel, Reports, RequestContext};

use super::common::{Fixture, numbered};

#[test]
fn test_seven_candidates_fill_every_required_block() {
    let fixture = Fixture::new(numbered(7));
    let mut facade = fixture
        .portal
        .facade("error", RequestContext::anonymous())
        .unwrap()
        .with_seed(7);

    let mut candidates = fixture.candidates();
    let outcome = facade.build_and_notify(&mut candidates).unwrap();

    assert!(candidates.is_empty());
    assert_eq!(outcome.blocks.article_count(), 7);
    assert!(outcome.messages.is_empty());
    assert!(outcome.word_report.is_none());

    let reports = fixture.portal.reports();
    assert_eq!(reports.errors().unwrap(), vec![ERROR_LOG_NOT_FOUND]);
    assert!(reports.error_records().unwrap().is_empty());
}

#[test]
fn test_missing_block_logged_as_text_and_json() {
    let fixture = Fixture::new(numbered(3));
    let mut facade = fixture
        .portal
        .facade("error", RequestContext::anonymous())
        .unwrap();

    let outcome = facade.build_and_notify(&mut fixture.candidates()).unwrap();
    assert!(!outcome.blocks.contains(BlockKind::ThreeArticles));

    let reports = fixture.portal.reports();
    assert_eq!(
        reports.errors().unwrap(),
        vec!["Missing block: three-article block"]
    );
    let records = reports.error_records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].assembly, outcome.assembly);
    assert_eq!(records[0].record.missing, vec![BlockKind::ThreeArticles]);
    assert_eq!(
        records[0].record.error,
        "Errors: three-article block not found"
    );
}

#[test]
fn test_repeated_errors_are_deduplicated() {
    let fixture = Fixture::new(Vec::new());
    for _ in 0..2 {
        let mut facade = fixture
            .portal
            .facade("error", RequestContext::anonymous())
            .unwrap();
        facade.build_and_notify(&mut Vec::new()).unwrap();
    }

    let raw = fixture
        .portal
        .event_log()
        .read_lines(LogChannel::Errors)
        .unwrap()
        .unwrap();
    assert_eq!(raw.len(), 6);

    let reports = fixture.portal.reports();
    assert_eq!(
        reports.errors().unwrap(),
        vec![
            "Missing block: one-article block",
            "Missing block: two-article block",
            "Missing block: three-article block",
        ]
    );

    let records = reports.error_records().unwrap();
    assert_eq!(records.len(), 2);
    assert_ne!(records[0].assembly, records[1].assembly);
}

#[test]
fn test_error_file_sentinels() {
    let fixture = Fixture::new(Vec::new());
    let log = fixture.portal.event_log();
    let reports = fixture.portal.reports();

    assert_eq!(reports.errors().unwrap(), vec![ERROR_LOG_NOT_FOUND]);

    log.append_line(LogChannel::Errors, "").unwrap();
    assert_eq!(reports.errors().unwrap(), vec![NO_CURRENT_ERRORS]);

    for line in ["E1", "E1", "E2"] {
        log.append_line(LogChannel::Errors, line).unwrap();
    }
    assert_eq!(reports.errors().unwrap(), vec!["E1", "E2"]);
}

#[test]
fn test_clean_errors() {
    let cleaned = Reports::clean_errors(&[
        "Missing block: two-article block, ".to_string(),
        " , Missing block: two-article block".to_string(),
        ", ".to_string(),
    ]);
    assert_eq!(cleaned, vec!["Missing block: two-article block"]);
}
