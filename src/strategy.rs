//! Selection strategies
//!
//! A [`SelectionStrategy`] is a named way of building one block: each
//! [`build_block`](SelectionStrategy::build_block) call runs a fresh
//! [`BlockBuilder`] and hands it back. [`StrategyFacade`]s restrict the names
//! a caller may select, and [`assemble_blocks`] runs all four strategies in
//! front-page order.

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use tracing::debug;

use crate::article::Article;
use crate::block::Blocks;
use crate::builder::{BlockBuilder, BlockShape};
use crate::{PortalError, Result};

/// One strategy per builder shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionStrategy {
    /// Single headline article
    OneArticle,
    /// Two-article row
    TwoArticles,
    /// Three-article row
    ThreeArticles,
    /// Six-article grid
    SixArticles,
}

impl SelectionStrategy {
    /// Every strategy, in front-page order
    pub const ALL: [SelectionStrategy; 4] = [
        SelectionStrategy::OneArticle,
        SelectionStrategy::TwoArticles,
        SelectionStrategy::ThreeArticles,
        SelectionStrategy::SixArticles,
    ];

    /// Name accepted by [`select_strategy`]
    pub fn name(self) -> &'static str {
        match self {
            SelectionStrategy::OneArticle => "one_article",
            SelectionStrategy::TwoArticles => "two_articles",
            SelectionStrategy::ThreeArticles => "three_articles",
            SelectionStrategy::SixArticles => "six_articles",
        }
    }

    /// Shape of the builder this strategy runs
    pub fn shape(self) -> BlockShape {
        match self {
            SelectionStrategy::OneArticle => BlockShape::One,
            SelectionStrategy::TwoArticles => BlockShape::Two,
            SelectionStrategy::ThreeArticles => BlockShape::Three,
            SelectionStrategy::SixArticles => BlockShape::Six,
        }
    }

    /// Run a fresh builder against `articles` and return it
    pub fn build_block(
        self,
        articles: &mut Vec<Article>,
        rng: &mut dyn RngCore,
    ) -> Result<BlockBuilder> {
        let mut builder = BlockBuilder::new(self.shape());
        builder.build_block(articles, rng)?;
        Ok(builder)
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SelectionStrategy {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self> {
        SelectionStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| PortalError::UnknownStrategy(s.to_string()))
    }
}

/// Look up a strategy by exact name
///
/// # Example
///
/// ```
/// use towns_news::strategy::{select_strategy, SelectionStrategy};
///
/// assert_eq!(select_strategy("two_articles").unwrap(), SelectionStrategy::TwoArticles);
/// assert!(select_strategy("Two_Articles").is_err());
/// ```
pub fn select_strategy(name: &str) -> Result<SelectionStrategy> {
    name.parse()
}

/// Strategies grouped the way the front page selects them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyFacade {
    strategies: &'static [SelectionStrategy],
}

impl StrategyFacade {
    /// One- and three-article strategies
    pub const ONE_THREE: StrategyFacade = StrategyFacade {
        strategies: &[
            SelectionStrategy::OneArticle,
            SelectionStrategy::ThreeArticles,
        ],
    };

    /// Two-article strategy
    pub const TWO: StrategyFacade = StrategyFacade {
        strategies: &[SelectionStrategy::TwoArticles],
    };

    /// Six-article strategy
    pub const SIX: StrategyFacade = StrategyFacade {
        strategies: &[SelectionStrategy::SixArticles],
    };

    /// Strategies this facade can select
    pub fn strategies(&self) -> &'static [SelectionStrategy] {
        self.strategies
    }

    /// Select a strategy of this group by name
    pub fn select_strategy(&self, name: &str) -> Result<SelectionStrategy> {
        name.parse::<SelectionStrategy>()
            .ok()
            .filter(|strategy| self.strategies.contains(strategy))
            .ok_or_else(|| PortalError::UnknownStrategy(name.to_string()))
    }
}

/// Holds the current strategy and builds with it
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockDirector {
    strategy: Option<SelectionStrategy>,
}

impl BlockDirector {
    /// Director with no strategy set
    pub fn new() -> Self {
        Self::default()
    }

    /// Director starting with `strategy`
    pub fn with_strategy(strategy: SelectionStrategy) -> Self {
        Self {
            strategy: Some(strategy),
        }
    }

    /// Replace the current strategy
    pub fn set_strategy(&mut self, strategy: SelectionStrategy) {
        self.strategy = Some(strategy);
    }

    /// Current strategy
    pub fn strategy(&self) -> Option<SelectionStrategy> {
        self.strategy
    }

    /// Build with the current strategy
    ///
    /// Fails with [`PortalError::StrategyNotSet`] when no strategy was set.
    pub fn construct_block(
        &self,
        articles: &mut Vec<Article>,
        rng: &mut dyn RngCore,
    ) -> Result<BlockBuilder> {
        let strategy = self.strategy.ok_or(PortalError::StrategyNotSet)?;
        strategy.build_block(articles, rng)
    }
}

/// Front-page order: which facade supplies which strategy
const FRONT_PAGE: [(StrategyFacade, &str); 4] = [
    (StrategyFacade::ONE_THREE, "one_article"),
    (StrategyFacade::TWO, "two_articles"),
    (StrategyFacade::ONE_THREE, "three_articles"),
    (StrategyFacade::SIX, "six_articles"),
];

/// Run the four strategies in order against one shrinking list
///
/// Returns the merged blocks of all four builders.
pub fn assemble_blocks(candidates: &mut Vec<Article>, rng: &mut dyn RngCore) -> Result<Blocks> {
    let offered = candidates.len();
    let mut blocks = Blocks::new();
    for (facade, name) in FRONT_PAGE {
        let strategy = facade.select_strategy(name)?;
        blocks.merge(strategy.build_block(candidates, rng)?.into_block());
    }
    debug!(
        "Assembled {} of {} candidates into {}",
        blocks.article_count(),
        offered,
        blocks.describe()
    );
    Ok(blocks)
}
