//! Concrete observers

use std::collections::{BTreeMap, HashSet};
use std::time::Instant;

use tracing::debug;

use super::{Notification, Observer, ObserverKind};
use crate::Result;
use crate::config::SeoWindow;
use crate::counters::SharedCounters;
use crate::eventlog::{
    ArticlePlacement, ArticleSaveRecord, AuthorActivityRecord, CreationTimeRecord, ErrorRecord,
    LogRecord, NewTagsRecord, PopularArticlesRecord, ProhibitedWordsRecord, SeoIssueRecord,
    UserActivityRecord, WordHit,
};

/// Writes one plain error line per missing required block
#[derive(Debug, Clone, Copy, Default)]
pub struct TextErrorObserver;

impl Observer for TextErrorObserver {
    fn kind(&self) -> ObserverKind {
        ObserverKind::TextError
    }

    fn update(&mut self, event: &mut Notification<'_>) -> Result<()> {
        for kind in event.blocks().missing_required() {
            event.log(LogRecord::ErrorLine(format!(
                "Missing block: {}",
                kind.label()
            )));
        }
        Ok(())
    }
}

/// Writes one JSON record listing all missing required blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonErrorObserver;

impl Observer for JsonErrorObserver {
    fn kind(&self) -> ObserverKind {
        ObserverKind::JsonError
    }

    fn update(&mut self, event: &mut Notification<'_>) -> Result<()> {
        let missing = event.blocks().missing_required();
        if missing.is_empty() {
            return Ok(());
        }
        let labels: Vec<_> = missing.iter().map(|kind| kind.label()).collect();
        event.log(LogRecord::Error(ErrorRecord {
            error: format!("Errors: {} not found", labels.join(", ")),
            missing,
        }));
        Ok(())
    }
}

/// Tells the user how many articles were placed
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleCountObserver;

impl Observer for ArticleCountObserver {
    fn kind(&self) -> ObserverKind {
        ObserverKind::ArticleCount
    }

    fn update(&mut self, event: &mut Notification<'_>) -> Result<()> {
        let count = event.blocks().article_count();
        event.flash(format!("News updated: {} articles added.", count));
        Ok(())
    }
}

/// Measures time from construction (or the previous notify) to notify
#[derive(Debug, Clone, Copy)]
pub struct BlockCreationTimeObserver {
    started: Instant,
}

impl BlockCreationTimeObserver {
    /// Start timing now
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for BlockCreationTimeObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for BlockCreationTimeObserver {
    fn kind(&self) -> ObserverKind {
        ObserverKind::BlockCreationTime
    }

    fn update(&mut self, event: &mut Notification<'_>) -> Result<()> {
        let elapsed = self.started.elapsed();
        event.log(LogRecord::CreationTime(CreationTimeRecord {
            blocks: event.blocks().kinds(),
            elapsed_secs: elapsed.as_secs_f64(),
        }));
        self.started = Instant::now();
        Ok(())
    }
}

/// Logs tags on placed articles that were not known before
///
/// The known set is seeded at construction and grows with every
/// notification, so a tag is reported once per observer.
#[derive(Debug, Clone, Default)]
pub struct NewTagObserver {
    known: HashSet<String>,
}

impl NewTagObserver {
    /// Observer that already knows `tags`
    pub fn new(tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            known: tags.into_iter().map(|t| t.into()).collect(),
        }
    }

    /// Check whether a tag name is known
    pub fn knows(&self, tag: &str) -> bool {
        self.known.contains(tag)
    }
}

impl Observer for NewTagObserver {
    fn kind(&self) -> ObserverKind {
        ObserverKind::NewTag
    }

    fn update(&mut self, event: &mut Notification<'_>) -> Result<()> {
        let mut new_tags = Vec::new();
        for article in event.blocks().articles() {
            for name in article.tag_names() {
                if self.known.insert(name.to_string()) {
                    new_tags.push(name.to_string());
                }
            }
        }
        if !new_tags.is_empty() {
            debug!("New tags: {}", new_tags.join(", "));
            event.log(LogRecord::NewTags(NewTagsRecord { tags: new_tags }));
        }
        Ok(())
    }
}

/// Checks placed article bodies for prohibited words
///
/// Matching is a case-insensitive substring search.
#[derive(Debug, Clone, Default)]
pub struct ProhibitedWordsObserver {
    words: Vec<String>,
}

impl ProhibitedWordsObserver {
    /// Observer checking `words`; blank entries and duplicates are dropped
    pub fn new(words: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut unique: Vec<String> = Vec::new();
        for word in words {
            let word = word.into().trim().to_lowercase();
            if !word.is_empty() && !unique.contains(&word) {
                unique.push(word);
            }
        }
        Self { words: unique }
    }

    /// Words being checked, lower-cased
    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl Observer for ProhibitedWordsObserver {
    fn kind(&self) -> ObserverKind {
        ObserverKind::ProhibitedWords
    }

    fn update(&mut self, event: &mut Notification<'_>) -> Result<()> {
        let mut hits = Vec::new();
        for article in event.blocks().articles() {
            let content = article.body.to_lowercase();
            for word in &self.words {
                if content.contains(word.as_str()) {
                    hits.push(WordHit {
                        article_id: article.id,
                        title: article.title.clone(),
                        word: word.clone(),
                    });
                }
            }
        }
        if !hits.is_empty() {
            event.log(LogRecord::ProhibitedWords(ProhibitedWordsRecord { hits }));
        }
        Ok(())
    }
}

/// Logs which user viewed which blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct UserActivityObserver;

impl Observer for UserActivityObserver {
    fn kind(&self) -> ObserverKind {
        ObserverKind::UserActivity
    }

    fn update(&mut self, event: &mut Notification<'_>) -> Result<()> {
        event.log(LogRecord::UserActivity(UserActivityRecord {
            user: event.request().display_user().to_string(),
            blocks: event.blocks().kinds(),
        }));
        Ok(())
    }
}

/// Counts article placements in the shared counter store
#[derive(Debug, Clone)]
pub struct PopularArticleTracker {
    counters: SharedCounters,
}

impl PopularArticleTracker {
    /// Tracker counting into `counters`
    pub fn new(counters: SharedCounters) -> Self {
        Self { counters }
    }
}

impl Observer for PopularArticleTracker {
    fn kind(&self) -> ObserverKind {
        ObserverKind::PopularArticleTracker
    }

    fn update(&mut self, event: &mut Notification<'_>) -> Result<()> {
        let mut placed: Vec<ArticlePlacement> = Vec::new();
        let totals = {
            let mut store = self.counters.lock().unwrap_or_else(|e| e.into_inner());
            for article in event.blocks().articles() {
                store.record_article(article.id);
                match placed.iter_mut().find(|p| p.article_id == article.id) {
                    Some(entry) => entry.count += 1,
                    None => placed.push(ArticlePlacement {
                        article_id: article.id,
                        title: article.title.clone(),
                        count: 1,
                    }),
                }
            }
            store.article_placements().clone()
        };
        event.log(LogRecord::PopularArticles(PopularArticlesRecord {
            placed,
            totals,
        }));
        Ok(())
    }
}

/// Counts placements per author in the shared counter store
#[derive(Debug, Clone)]
pub struct AuthorActivityTracker {
    counters: SharedCounters,
}

impl AuthorActivityTracker {
    /// Tracker counting into `counters`
    pub fn new(counters: SharedCounters) -> Self {
        Self { counters }
    }
}

impl Observer for AuthorActivityTracker {
    fn kind(&self) -> ObserverKind {
        ObserverKind::AuthorActivityTracker
    }

    fn update(&mut self, event: &mut Notification<'_>) -> Result<()> {
        let mut placed: BTreeMap<String, u64> = BTreeMap::new();
        let totals = {
            let mut store = self.counters.lock().unwrap_or_else(|e| e.into_inner());
            for article in event.blocks().articles() {
                let author = article.author_name();
                store.record_author(author);
                *placed.entry(author.to_string()).or_insert(0) += 1;
            }
            store.author_placements().clone()
        };
        event.log(LogRecord::AuthorActivity(AuthorActivityRecord {
            placed,
            totals,
        }));
        Ok(())
    }
}

/// Flags placed articles whose title length is outside the SEO window
#[derive(Debug, Clone, Copy, Default)]
pub struct SeoTitleChecker {
    window: SeoWindow,
}

impl SeoTitleChecker {
    /// Checker using `window`
    pub fn new(window: SeoWindow) -> Self {
        Self { window }
    }
}

impl Observer for SeoTitleChecker {
    fn kind(&self) -> ObserverKind {
        ObserverKind::SeoTitleChecker
    }

    fn update(&mut self, event: &mut Notification<'_>) -> Result<()> {
        for article in event.blocks().articles() {
            if !self.window.accepts(&article.title) {
                event.log(LogRecord::SeoIssue(SeoIssueRecord {
                    article_id: article.id,
                    title: article.title.clone(),
                    length: article.title.chars().count(),
                    min_length: self.window.min_length,
                    max_length: self.window.max_length,
                }));
            }
        }
        Ok(())
    }
}

/// Logs placed articles that users have saved
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleSaveTracker;

impl Observer for ArticleSaveTracker {
    fn kind(&self) -> ObserverKind {
        ObserverKind::ArticleSaveTracker
    }

    fn update(&mut self, event: &mut Notification<'_>) -> Result<()> {
        for article in event.blocks().articles() {
            if article.save_count > 0 {
                event.log(LogRecord::ArticleSave(ArticleSaveRecord {
                    article_id: article.id,
                    title: article.title.clone(),
                    saves: article.save_count,
                }));
            }
        }
        Ok(())
    }
}
