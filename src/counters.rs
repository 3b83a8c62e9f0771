//! Running placement counters
//!
//! The popular-article and author-activity trackers accumulate counts across
//! assemblies. The counts live here, outside the observers, and are shared
//! explicitly: every facade created by one [`Portal`](crate::Portal) holds
//! the same [`SharedCounters`] handle, so counts survive from one request to
//! the next for the lifetime of the portal.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::article::ArticleId;

/// Counter store shared between facades
pub type SharedCounters = Arc<Mutex<CounterStore>>;

/// Per-article and per-author placement counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterStore {
    article_placements: BTreeMap<ArticleId, u64>,
    author_placements: BTreeMap<String, u64>,
}

impl CounterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store wrapped for sharing
    pub fn shared() -> SharedCounters {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Count one placement of an article, returning its new total
    pub fn record_article(&mut self, id: ArticleId) -> u64 {
        let count = self.article_placements.entry(id).or_insert(0);
        *count += 1;
        *count
    }

    /// Count one placement of an author's article, returning the new total
    pub fn record_author(&mut self, name: &str) -> u64 {
        let count = self.author_placements.entry(name.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Total placements of an article
    #[must_use]
    pub fn article_count(&self, id: ArticleId) -> u64 {
        self.article_placements.get(&id).copied().unwrap_or(0)
    }

    /// Total placements of an author's articles
    #[must_use]
    pub fn author_count(&self, name: &str) -> u64 {
        self.author_placements.get(name).copied().unwrap_or(0)
    }

    /// Snapshot of all article counters
    pub fn article_placements(&self) -> &BTreeMap<ArticleId, u64> {
        &self.article_placements
    }

    /// Snapshot of all author counters
    pub fn author_placements(&self) -> &BTreeMap<String, u64> {
        &self.author_placements
    }

    /// Reset every counter
    pub fn clear(&mut self) {
        self.article_placements.clear();
        self.author_placements.clear();
    }
}
