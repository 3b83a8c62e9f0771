//! Activity family tests

use towns_news::eventlog::UserActivityRecord;
use towns_news::report::{AuthorActivityRow, BlockViewRow};
use towns_news::{Article, ArticleBuilder, Author, BlockKind, Family, LogChannel, RequestContext};

use super::common::Fixture;

/// Odd ids by Olena, even ids up to 10 by Ivan, id 12 without author
fn authored() -> Vec<Article> {
    (1..=12)
        .map(|id| {
            let builder = ArticleBuilder::new(id).title(format!("Article {}", id));
            let builder = match id {
                12 => builder,
                id if id % 2 == 1 => builder.author(Author::new(1, "Olena")),
                _ => builder.author(Author::new(2, "Ivan")),
            };
            builder.build().unwrap()
        })
        .collect()
}

#[test]
fn test_author_activity_accumulates_across_requests() {
    let fixture = Fixture::new(authored());
    for user in ["editor", "reader"] {
        let mut facade = fixture
            .portal
            .facade_for(Family::Activity, RequestContext::for_user(user));
        facade.build_and_notify(&mut fixture.candidates()).unwrap();
    }

    let counters = fixture.portal.counters().lock().unwrap();
    assert_eq!(counters.author_count("Olena"), 12);
    assert_eq!(counters.author_count("Ivan"), 10);
    assert_eq!(counters.author_count("Unknown Author"), 2);
    drop(counters);

    let report = fixture.portal.reports().activity_report().unwrap();
    assert_eq!(
        report.authors,
        vec![
            AuthorActivityRow {
                id: 1,
                name: "Olena".to_string(),
                count: 12,
            },
            AuthorActivityRow {
                id: 2,
                name: "Ivan".to_string(),
                count: 10,
            },
        ]
    );
}

#[test]
fn test_block_views_per_request() {
    let fixture = Fixture::new(authored());
    for _ in 0..2 {
        let mut facade = fixture
            .portal
            .facade("activity", RequestContext::anonymous())
            .unwrap();
        facade.build_and_notify(&mut fixture.candidates()).unwrap();
    }

    let report = fixture.portal.reports().activity_report().unwrap();
    let expected: Vec<_> = [
        BlockKind::OneArticle,
        BlockKind::TwoArticles,
        BlockKind::ThreeArticles,
        BlockKind::SixArticles,
        BlockKind::SixArticles2,
    ]
    .into_iter()
    .map(|block| BlockViewRow { block, views: 2 })
    .collect();
    assert_eq!(report.block_views, expected);
}

#[test]
fn test_user_activity_names_the_user() {
    let fixture = Fixture::new(authored());
    let mut anonymous = fixture
        .portal
        .facade_for(Family::Activity, RequestContext::anonymous());
    anonymous.build_and_notify(&mut fixture.candidates()).unwrap();
    let mut signed_in = fixture
        .portal
        .facade_for(Family::Activity, RequestContext::for_user("olena.k"));
    signed_in.build_and_notify(&mut fixture.candidates()).unwrap();

    let records = fixture
        .portal
        .event_log()
        .read_records::<UserActivityRecord>(LogChannel::UserActivity)
        .unwrap()
        .unwrap();
    let users: Vec<_> = records.iter().map(|r| r.record.user.as_str()).collect();
    assert_eq!(users, vec!["Anonymous", "olena.k"]);
}

#[test]
fn test_missing_logs_read_empty() {
    let fixture = Fixture::new(authored());
    let report = fixture.portal.reports().activity_report().unwrap();
    assert!(report.authors.is_empty());
    assert!(report.block_views.is_empty());
}
