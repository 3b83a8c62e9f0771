//! Homepage placement blocks
//!
//! A [`Blocks`] value maps each filled placement slot ([`BlockKind`]) to the
//! articles drawn for it. Builders fill it, observers read it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::article::Article;

/// Homepage placement slot
///
/// Variants are ordered the way the slots are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockKind {
    /// Single headline article
    #[serde(rename = "one_article_block")]
    OneArticle,
    /// Two-article row
    #[serde(rename = "two_articles_block")]
    TwoArticles,
    /// Three-article row
    #[serde(rename = "three_articles_block")]
    ThreeArticles,
    /// First half of the six-article grid
    #[serde(rename = "six_articles_block")]
    SixArticles,
    /// Second half of the six-article grid
    #[serde(rename = "six_articles_block2")]
    SixArticles2,
}

impl BlockKind {
    /// Slots every front page is expected to fill
    pub const REQUIRED: [BlockKind; 4] = [
        BlockKind::OneArticle,
        BlockKind::TwoArticles,
        BlockKind::ThreeArticles,
        BlockKind::SixArticles,
    ];

    /// Template key of the slot
    pub fn key(self) -> &'static str {
        match self {
            BlockKind::OneArticle => "one_article_block",
            BlockKind::TwoArticles => "two_articles_block",
            BlockKind::ThreeArticles => "three_articles_block",
            BlockKind::SixArticles => "six_articles_block",
            BlockKind::SixArticles2 => "six_articles_block2",
        }
    }

    /// Human-readable slot name used in error reports
    pub fn label(self) -> &'static str {
        match self {
            BlockKind::OneArticle => "one-article block",
            BlockKind::TwoArticles => "two-article block",
            BlockKind::ThreeArticles => "three-article block",
            BlockKind::SixArticles => "six-article block",
            BlockKind::SixArticles2 => "six-article block (second half)",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Articles placed in one slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Placement {
    /// The one-article slot holds a bare article
    Single(Article),
    /// Every other slot holds a list, possibly empty
    Group(Vec<Article>),
}

impl Placement {
    /// Placed articles as a slice
    pub fn articles(&self) -> &[Article] {
        match self {
            Placement::Single(article) => std::slice::from_ref(article),
            Placement::Group(articles) => articles,
        }
    }

    /// Number of placed articles
    pub fn len(&self) -> usize {
        self.articles().len()
    }

    /// True for an empty group
    pub fn is_empty(&self) -> bool {
        self.articles().is_empty()
    }
}

/// Placement slots filled by one or more builders
///
/// # Examples
///
/// ```
/// use towns_news::article::ArticleBuilder;
/// use towns_news::{BlockKind, Blocks, Placement};
///
/// let article = ArticleBuilder::new(1).title("Headline").build().unwrap();
/// let mut blocks = Blocks::new();
/// blocks.insert(BlockKind::OneArticle, Placement::Single(article));
///
/// assert!(blocks.contains(BlockKind::OneArticle));
/// assert_eq!(blocks.missing_required().len(), 3);
/// assert_eq!(blocks.article_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Blocks {
    slots: BTreeMap<BlockKind, Placement>,
}

impl Blocks {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill a slot, returning the previous placement
    pub fn insert(&mut self, kind: BlockKind, placement: Placement) -> Option<Placement> {
        self.slots.insert(kind, placement)
    }

    /// Placement of a slot
    pub fn get(&self, kind: BlockKind) -> Option<&Placement> {
        self.slots.get(&kind)
    }

    /// Check whether a slot key is present (an empty group counts as present)
    pub fn contains(&self, kind: BlockKind) -> bool {
        self.slots.contains_key(&kind)
    }

    /// Filled slot kinds, in slot order
    pub fn kinds(&self) -> Vec<BlockKind> {
        self.slots.keys().copied().collect()
    }

    /// Required slots whose key is absent
    pub fn missing_required(&self) -> Vec<BlockKind> {
        BlockKind::REQUIRED
            .into_iter()
            .filter(|kind| !self.contains(*kind))
            .collect()
    }

    /// Iterate over filled slots in slot order
    pub fn iter(&self) -> impl Iterator<Item = (BlockKind, &Placement)> {
        self.slots.iter().map(|(kind, placement)| (*kind, placement))
    }

    /// Iterate over every placed article, slot by slot
    pub fn articles(&self) -> impl Iterator<Item = &Article> {
        self.slots.values().flat_map(|placement| placement.articles())
    }

    /// Total number of placed articles
    pub fn article_count(&self) -> usize {
        self.slots.values().map(Placement::len).sum()
    }

    /// Number of slot keys present
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no slot key is present
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Move every slot of `other` into this mapping
    pub fn merge(&mut self, other: Blocks) {
        self.slots.extend(other.slots);
    }

    /// Comma-separated slot keys, or `"(empty)"`
    pub fn describe(&self) -> String {
        if self.slots.is_empty() {
            return "(empty)".to_string();
        }
        self.slots
            .keys()
            .map(|kind| kind.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
