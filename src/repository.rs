//! Article store access
//!
//! The portal's persistent store is an external collaborator. The block
//! pipeline and the report readers only need a handful of queries, captured
//! by [`ArticleRepository`]. [`InMemoryRepository`] backs tests and demos.
//!
//! # Example
//!
//! ```
//! use towns_news::article::ArticleBuilder;
//! use towns_news::{ArticleRepository, Author, InMemoryRepository};
//!
//! let repo = InMemoryRepository::new();
//! repo.insert_author(Author::new(1, "Olena"));
//! repo.insert_article(
//!     ArticleBuilder::new(1)
//!         .title("Market day moves to Saturday")
//!         .author(Author::new(1, "Olena"))
//!         .build()
//!         .unwrap(),
//! );
//!
//! assert_eq!(repo.articles().len(), 1);
//! assert!(repo.find_by_title("Market day moves to Saturday").is_some());
//! ```

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::article::{Article, ArticleId, Author, Tag};
use crate::validation::validate_prohibited_word;
use crate::{PortalError, Result};

/// Queries and mutations the portal needs from its article store
pub trait ArticleRepository: Send + Sync {
    /// All articles, in storage order
    fn articles(&self) -> Vec<Article>;

    /// Look up one article
    fn article(&self, id: ArticleId) -> Option<Article>;

    /// Store a new article or replace the one with the same id
    fn insert_article(&self, article: Article);

    /// Replace an existing article
    fn update_article(&self, article: Article) -> Result<()>;

    /// Delete an article, returning it
    fn delete_article(&self, id: ArticleId) -> Result<Article>;

    /// Count one detail-page view and return the new total
    fn record_view(&self, id: ArticleId) -> Result<u64>;

    /// All authors
    fn authors(&self) -> Vec<Author>;

    /// All tags
    fn tags(&self) -> Vec<Tag>;

    /// All prohibited words
    fn prohibited_words(&self) -> Vec<String>;

    /// Articles published on or after `since`; unpublished articles are skipped
    fn articles_published_since(&self, since: NaiveDate) -> Vec<Article> {
        self.articles()
            .into_iter()
            .filter(|article| article.published.is_some_and(|date| date >= since))
            .collect()
    }

    /// First article whose title matches exactly
    fn find_by_title(&self, title: &str) -> Option<Article> {
        self.articles()
            .into_iter()
            .find(|article| article.title == title)
    }
}

#[derive(Debug, Default)]
struct Tables {
    articles: BTreeMap<ArticleId, Article>,
    authors: BTreeMap<u64, Author>,
    tags: BTreeMap<u64, Tag>,
    prohibited_words: Vec<String>,
}

/// In-memory article store
///
/// Articles are kept ordered by id, which doubles as storage order.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the given articles
    ///
    /// Authors and tags referenced by the articles are registered too.
    pub fn with_articles(articles: impl IntoIterator<Item = Article>) -> Self {
        let repo = Self::new();
        for article in articles {
            if let Some(author) = &article.author {
                repo.insert_author(author.clone());
            }
            for tag in &article.tags {
                repo.insert_tag(tag.clone());
            }
            repo.insert_article(article);
        }
        repo
    }

    /// Register an author
    pub fn insert_author(&self, author: Author) {
        self.write().authors.insert(author.id, author);
    }

    /// Register a tag
    pub fn insert_tag(&self, tag: Tag) {
        self.write().tags.insert(tag.id, tag);
    }

    /// Add a prohibited word; adding an existing word is a no-op
    pub fn add_prohibited_word(&self, word: impl Into<String>) -> Result<()> {
        let word = word.into();
        validate_prohibited_word(&word)?;
        let mut tables = self.write();
        if !tables.prohibited_words.contains(&word) {
            tables.prohibited_words.push(word);
        }
        Ok(())
    }

    /// Remove a prohibited word, returning whether it was present
    pub fn remove_prohibited_word(&self, word: &str) -> bool {
        let mut tables = self.write();
        let before = tables.prohibited_words.len();
        tables.prohibited_words.retain(|w| w != word);
        tables.prohibited_words.len() != before
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl ArticleRepository for InMemoryRepository {
    fn articles(&self) -> Vec<Article> {
        self.read().articles.values().cloned().collect()
    }

    fn article(&self, id: ArticleId) -> Option<Article> {
        self.read().articles.get(&id).cloned()
    }

    fn insert_article(&self, article: Article) {
        self.write().articles.insert(article.id, article);
    }

    fn update_article(&self, article: Article) -> Result<()> {
        let mut tables = self.write();
        match tables.articles.get_mut(&article.id) {
            Some(slot) => {
                *slot = article;
                Ok(())
            }
            None => Err(PortalError::NoSuchArticle(article.id.0)),
        }
    }

    fn delete_article(&self, id: ArticleId) -> Result<Article> {
        self.write()
            .articles
            .remove(&id)
            .ok_or(PortalError::NoSuchArticle(id.0))
    }

    fn record_view(&self, id: ArticleId) -> Result<u64> {
        let mut tables = self.write();
        let article = tables
            .articles
            .get_mut(&id)
            .ok_or(PortalError::NoSuchArticle(id.0))?;
        article.record_view();
        Ok(article.views_count)
    }

    fn authors(&self) -> Vec<Author> {
        self.read().authors.values().cloned().collect()
    }

    fn tags(&self) -> Vec<Tag> {
        self.read().tags.values().cloned().collect()
    }

    fn prohibited_words(&self) -> Vec<String> {
        self.read().prohibited_words.clone()
    }
}
