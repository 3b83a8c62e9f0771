//! Count family tests

use chrono::NaiveDate;
use towns_news::report::UpdateRow;
use towns_news::{ArticleBuilder, ArticleId, Family, RequestContext};

use super::common::{Fixture, numbered};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_flash_message_counts_placed_articles() {
    let fixture = Fixture::new(numbered(9));
    let mut facade = fixture
        .portal
        .facade("count", RequestContext::for_user("editor"))
        .unwrap();

    let outcome = facade.build_and_notify(&mut fixture.candidates()).unwrap();
    assert_eq!(outcome.messages, vec!["News updated: 9 articles added."]);
    assert_eq!(
        facade.request().messages(),
        ["News updated: 9 articles added."]
    );

    facade.build_and_notify(&mut Vec::new()).unwrap();
    assert_eq!(
        facade.request_mut().take_messages(),
        vec![
            "News updated: 9 articles added.",
            "News updated: 0 articles added.",
        ]
    );
}

#[test]
fn test_creation_logs() {
    let fixture = Fixture::new(numbered(12));
    for _ in 0..2 {
        let mut facade = fixture
            .portal
            .facade_for(Family::Count, RequestContext::anonymous());
        facade.build_and_notify(&mut fixture.candidates()).unwrap();
    }

    let rows = fixture.portal.reports().creation_logs().unwrap();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(
            row.block_type,
            "one_article_block, two_articles_block, three_articles_block, \
             six_articles_block, six_articles_block2"
        );
        let seconds: f64 = row.time_info.parse().unwrap();
        assert!(seconds >= 0.0);
        assert_eq!(row.time_info.split('.').nth(1).map(str::len), Some(2));
    }
}

#[test]
fn test_overview_updates_window() {
    let articles = vec![
        ArticleBuilder::new(1)
            .title("Last year")
            .published(date(2024, 1, 10))
            .build()
            .unwrap(),
        ArticleBuilder::new(2)
            .title("This spring")
            .published(date(2025, 4, 2))
            .build()
            .unwrap(),
        ArticleBuilder::new(3).title("Draft").build().unwrap(),
    ];
    let fixture = Fixture::new(articles);

    let overview = fixture
        .portal
        .reports()
        .overview(date(2025, 6, 1))
        .unwrap();
    assert!(overview.creation_logs.is_empty());
    assert_eq!(
        overview.updates,
        vec![UpdateRow {
            id: ArticleId(2),
            timestamp: "2025-04-02".to_string(),
            message: "This spring".to_string(),
        }]
    );

    let fixture = Fixture::with_config(
        vec![
            ArticleBuilder::new(1)
                .title("Last year")
                .published(date(2024, 1, 10))
                .build()
                .unwrap(),
        ],
        |config| config.with_updates_window_days(3650),
    );
    assert_eq!(fixture.portal.reports().updates(date(2025, 6, 1)).len(), 1);
}
