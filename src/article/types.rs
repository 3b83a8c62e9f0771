//! Article type definitions
//!
//! This module contains the data structures the portal places on the homepage.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Name used for articles without an author
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Article primary key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub u64);

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ArticleId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Article author
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    /// Primary key
    pub id: u64,
    /// Display name
    pub name: String,
}

impl Author {
    /// Create an author
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Article tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Primary key
    pub id: u64,
    /// Tag name
    pub name: String,
}

impl Tag {
    /// Create a tag
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// News article
///
/// `save_count` and `comment_count` are aggregates supplied by the
/// repository when the article is loaded; they are not edited here.
///
/// # Examples
///
/// ```
/// use towns_news::article::ArticleBuilder;
/// use towns_news::{Author, Tag};
///
/// let article = ArticleBuilder::new(7)
///     .title("Bridge reopens after repairs")
///     .body("Traffic resumed on Monday morning.")
///     .author(Author::new(1, "Olena"))
///     .tag(Tag::new(3, "transport"))
///     .build()
///     .unwrap();
///
/// assert_eq!(article.author_name(), "Olena");
/// assert_eq!(article.display_tags(), "transport");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Primary key
    pub id: ArticleId,
    /// Headline
    pub title: String,
    /// Article text
    pub body: String,
    /// Author, if known
    pub author: Option<Author>,
    /// Publication date, if published
    pub published: Option<NaiveDate>,
    /// Attached tags
    pub tags: Vec<Tag>,
    /// Detail-page view counter
    pub views_count: u64,
    /// Number of users who saved the article
    pub save_count: u64,
    /// Number of comments
    pub comment_count: u64,
    /// Relative path of the article image
    pub image: Option<String>,
}

impl Article {
    /// Author name, or [`UNKNOWN_AUTHOR`] when the article has none
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map_or(UNKNOWN_AUTHOR, |author| author.name.as_str())
    }

    /// Iterate over the names of attached tags
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.name.as_str())
    }

    /// Comma-separated tag names
    pub fn display_tags(&self) -> String {
        self.tag_names().collect::<Vec<_>>().join(", ")
    }

    /// Count one detail-page view
    pub fn record_view(&mut self) {
        self.views_count += 1;
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
