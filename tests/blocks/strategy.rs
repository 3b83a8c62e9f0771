//! Strategy, director and assembly tests

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use towns_news::strategy::{BlockDirector, SelectionStrategy, StrategyFacade};
use towns_news::{
    Article, ArticleBuilder, BlockKind, PortalError, assemble_blocks, select_strategy,
};

fn candidates(n: u64) -> Vec<Article> {
    (1..=n)
        .map(|id| {
            ArticleBuilder::new(id)
                .title(format!("Article {}", id))
                .build()
                .unwrap()
        })
        .collect()
}

#[test]
fn test_select_strategy_is_exact() {
    assert_eq!(
        select_strategy("one_article").unwrap(),
        SelectionStrategy::OneArticle
    );
    assert_eq!(
        select_strategy("six_articles").unwrap(),
        SelectionStrategy::SixArticles
    );
    for bad in ["", "one", "ONE_ARTICLE", "six_articles2"] {
        match select_strategy(bad) {
            Err(PortalError::UnknownStrategy(name)) => assert_eq!(name, bad),
            other => panic!("{:?} should be rejected, got {:?}", bad, other),
        }
    }
}

#[test]
fn test_strategy_builds_fresh_builder() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut list = candidates(5);
    let strategy = SelectionStrategy::TwoArticles;

    let first = strategy.build_block(&mut list, &mut rng).unwrap();
    let second = strategy.build_block(&mut list, &mut rng).unwrap();

    let a: HashSet<_> = first.block().articles().map(|a| a.id).collect();
    let b: HashSet<_> = second.block().articles().map(|a| a.id).collect();
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 2);
    assert!(a.is_disjoint(&b));
    assert_eq!(list.len(), 1);
}

#[test]
fn test_strategy_facades() {
    let groups = [
        (StrategyFacade::ONE_THREE, vec!["one_article", "three_articles"]),
        (StrategyFacade::TWO, vec!["two_articles"]),
        (StrategyFacade::SIX, vec!["six_articles"]),
    ];
    for (facade, names) in groups {
        for strategy in SelectionStrategy::ALL {
            let allowed = names.contains(&strategy.name());
            assert_eq!(facade.select_strategy(strategy.name()).is_ok(), allowed);
        }
    }
}

#[test]
fn test_director() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut list = candidates(9);

    let director = BlockDirector::new();
    assert!(director.strategy().is_none());
    let err = director.construct_block(&mut list, &mut rng).unwrap_err();
    assert!(matches!(err, PortalError::StrategyNotSet));

    let director = BlockDirector::with_strategy(SelectionStrategy::SixArticles);
    let builder = director.construct_block(&mut list, &mut rng).unwrap();
    assert_eq!(builder.block().article_count(), 6);
    assert_eq!(list.len(), 3);
}

#[test]
fn test_assemble_partitions_input() {
    for len in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(len * 7);
        let mut list = candidates(len);
        let blocks = assemble_blocks(&mut list, &mut rng).unwrap();

        let placed: Vec<_> = blocks.articles().map(|a| a.id.0).collect();
        let distinct: HashSet<_> = placed.iter().copied().collect();
        assert_eq!(distinct.len(), placed.len(), "article placed twice for {}", len);
        assert_eq!(placed.len() + list.len(), len as usize);
        assert!(list.iter().all(|a| !distinct.contains(&a.id.0)));
        assert!(blocks.contains(BlockKind::SixArticles));
    }
}

#[test]
fn test_assemble_seven() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut list = candidates(7);
    let blocks = assemble_blocks(&mut list, &mut rng).unwrap();

    assert!(list.is_empty());
    assert!(blocks.missing_required().is_empty());
    assert_eq!(blocks.get(BlockKind::SixArticles).unwrap().len(), 1);
    assert!(!blocks.contains(BlockKind::SixArticles2));
}

#[test]
fn test_assemble_twelve() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut list = candidates(12);
    let blocks = assemble_blocks(&mut list, &mut rng).unwrap();

    let sizes: Vec<_> = blocks.iter().map(|(kind, p)| (kind, p.len())).collect();
    assert_eq!(
        sizes,
        vec![
            (BlockKind::OneArticle, 1),
            (BlockKind::TwoArticles, 2),
            (BlockKind::ThreeArticles, 3),
            (BlockKind::SixArticles, 3),
            (BlockKind::SixArticles2, 3),
        ]
    );
    assert!(list.is_empty());
}

#[test]
fn test_duplicate_handles_may_both_be_placed() {
    let mut rng = StdRng::seed_from_u64(4);
    let article = ArticleBuilder::new(1).title("Same").build().unwrap();
    let mut list = vec![article.clone(), article];
    let blocks = assemble_blocks(&mut list, &mut rng).unwrap();

    // One takes a copy, two is skipped, six takes the other copy
    assert_eq!(blocks.article_count(), 2);
    assert!(list.is_empty());
}
