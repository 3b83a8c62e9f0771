//! Typed event-log records
//!
//! Every JSON channel stores one [`Stamped`] record per line. The plain-text
//! error channel stores bare lines ([`LogRecord::ErrorLine`]).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::LogChannel;
use crate::article::ArticleId;
use crate::block::BlockKind;

/// Record envelope carrying the write time and the assembly that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamped<T> {
    /// When the record was appended
    pub at: DateTime<Utc>,
    /// Assembly (one build-and-notify pass) the record belongs to
    pub assembly: Uuid,
    /// The record itself
    pub record: T,
}

/// Required blocks missing after an assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Human-readable summary
    pub error: String,
    /// Missing slots
    pub missing: Vec<BlockKind>,
}

/// Time between observer construction (or the previous notify) and notify
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreationTimeRecord {
    /// Slots present when the observer was notified
    pub blocks: Vec<BlockKind>,
    /// Elapsed wall-clock seconds
    pub elapsed_secs: f64,
}

/// Tags seen on placed articles for the first time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTagsRecord {
    /// Newly seen tag names, in discovery order
    pub tags: Vec<String>,
}

/// One prohibited word found in one placed article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordHit {
    /// Offending article
    pub article_id: ArticleId,
    /// Its title
    pub title: String,
    /// The word found
    pub word: String,
}

/// Prohibited words found in placed articles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProhibitedWordsRecord {
    /// All hits of the pass
    pub hits: Vec<WordHit>,
}

/// Who viewed which blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivityRecord {
    /// User name or "Anonymous"
    pub user: String,
    /// Slots shown to the user
    pub blocks: Vec<BlockKind>,
}

/// Placements of one article during one pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePlacement {
    /// Placed article
    pub article_id: ArticleId,
    /// Its title at placement time
    pub title: String,
    /// Times placed during the pass
    pub count: u64,
}

/// Popular-article tracker output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularArticlesRecord {
    /// Placements made by this pass
    pub placed: Vec<ArticlePlacement>,
    /// Counter store snapshot after this pass
    pub totals: BTreeMap<ArticleId, u64>,
}

/// Author activity tracker output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorActivityRecord {
    /// Placements per author name made by this pass
    pub placed: BTreeMap<String, u64>,
    /// Counter store snapshot after this pass
    pub totals: BTreeMap<String, u64>,
}

/// Placed article whose title is outside the SEO window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoIssueRecord {
    /// Offending article
    pub article_id: ArticleId,
    /// Its title
    pub title: String,
    /// Title length in characters
    pub length: usize,
    /// Window lower bound at check time
    pub min_length: usize,
    /// Window upper bound at check time
    pub max_length: usize,
}

/// Placed article that users have saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSaveRecord {
    /// Saved article
    pub article_id: ArticleId,
    /// Its title
    pub title: String,
    /// Save count at placement time
    pub saves: u64,
}

/// Anything an observer can ask the event log to append
#[derive(Debug, Clone, PartialEq)]
pub enum LogRecord {
    /// Plain line for the text error log
    ErrorLine(String),
    /// Structured error report
    Error(ErrorRecord),
    /// Block creation timing
    CreationTime(CreationTimeRecord),
    /// Newly seen tags
    NewTags(NewTagsRecord),
    /// Prohibited-word hits
    ProhibitedWords(ProhibitedWordsRecord),
    /// Block views
    UserActivity(UserActivityRecord),
    /// Article placement counters
    PopularArticles(PopularArticlesRecord),
    /// Author placement counters
    AuthorActivity(AuthorActivityRecord),
    /// SEO title issue
    SeoIssue(SeoIssueRecord),
    /// Saved article
    ArticleSave(ArticleSaveRecord),
}

impl LogRecord {
    /// Channel the record is appended to
    pub fn channel(&self) -> LogChannel {
        match self {
            LogRecord::ErrorLine(_) => LogChannel::Errors,
            LogRecord::Error(_) => LogChannel::ErrorsJson,
            LogRecord::CreationTime(_) => LogChannel::CreationTimes,
            LogRecord::NewTags(_) => LogChannel::NewTags,
            LogRecord::ProhibitedWords(_) => LogChannel::ProhibitedWords,
            LogRecord::UserActivity(_) => LogChannel::UserActivity,
            LogRecord::PopularArticles(_) => LogChannel::PopularArticles,
            LogRecord::AuthorActivity(_) => LogChannel::AuthorActivity,
            LogRecord::SeoIssue(_) => LogChannel::SeoTitles,
            LogRecord::ArticleSave(_) => LogChannel::ArticleSaves,
        }
    }
}
