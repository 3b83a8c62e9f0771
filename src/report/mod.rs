//! Report readers
//!
//! Admin report pages read back what the observers logged and join it with
//! the live article and author tables. [`Reports`] borrows the event log, the
//! repository and the configuration; its methods are grouped by family:
//!
//! - error: [`errors`](Reports::errors), [`clean_errors`](Reports::clean_errors),
//!   [`error_records`](Reports::error_records)
//! - activity: [`activity_report`](Reports::activity_report)
//! - tracker: [`article_views`](Reports::article_views),
//!   [`article_saves`](Reports::article_saves)
//! - word: [`word_report`](Reports::word_report) and its three tables
//! - count: [`creation_logs`](Reports::creation_logs),
//!   [`updates`](Reports::updates), [`overview`](Reports::overview)
//!
//! A missing log file never fails a report; it reads as an empty table, or
//! as a sentinel message for the error report. Logged names and titles that
//! no longer match a live row are dropped from joined tables.

mod activity;
mod count;
mod errors;
mod tracker;
mod word;

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::Result;
use crate::article::ArticleId;
use crate::config::PortalConfig;
use crate::eventlog::{EventLog, LogChannel, Stamped};
use crate::repository::ArticleRepository;

pub use self::activity::{ActivityReport, AuthorActivityRow, BlockViewRow};
pub use self::count::{CreationLogRow, Overview, UpdateRow};
pub use self::errors::{ERROR_LOG_NOT_FOUND, NO_CURRENT_ERRORS};
pub use self::tracker::{ArticleSavesRow, ArticleViewsRow};
pub use self::word::{ProhibitedWordsRow, SeoRow, TagsRow, WordReport};

/// Read-only view over the event log and the repository
#[derive(Clone, Copy)]
pub struct Reports<'a> {
    log: &'a EventLog,
    repo: &'a dyn ArticleRepository,
    config: &'a PortalConfig,
}

impl<'a> Reports<'a> {
    /// Reports over `log` and `repo`
    pub fn new(
        log: &'a EventLog,
        repo: &'a dyn ArticleRepository,
        config: &'a PortalConfig,
    ) -> Self {
        Self { log, repo, config }
    }

    /// Records of a JSON channel, empty when the file is missing
    fn records<T: DeserializeOwned>(&self, channel: LogChannel) -> Result<Vec<Stamped<T>>> {
        Ok(self.log.read_records(channel)?.unwrap_or_default())
    }

    /// Trimmed article title to article id; later articles win on duplicates
    fn title_index(&self) -> HashMap<String, ArticleId> {
        self.repo
            .articles()
            .into_iter()
            .map(|article| (article.title.trim().to_string(), article.id))
            .collect()
    }
}

/// Sort `(key, count)` pairs by count descending, then key ascending
fn sort_by_count<K: Ord>(rows: &mut [(K, u64)]) {
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
}
