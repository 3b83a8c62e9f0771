//! Count family reports

use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;

use super::Reports;
use crate::Result;
use crate::article::ArticleId;
use crate::eventlog::{CreationTimeRecord, LogChannel};

/// One logged block creation timing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreationLogRow {
    /// Block keys present at notify time
    pub block_type: String,
    /// Elapsed seconds, two decimals
    pub time_info: String,
}

/// Recently published article
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateRow {
    /// Article id
    pub id: ArticleId,
    /// Publication date, `YYYY-MM-DD`
    pub timestamp: String,
    /// Article title
    pub message: String,
}

/// Count family overview page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overview {
    /// Logged creation timings, oldest first
    pub creation_logs: Vec<CreationLogRow>,
    /// Articles published within the updates window
    pub updates: Vec<UpdateRow>,
}

impl Reports<'_> {
    /// Logged creation timings, oldest first
    pub fn creation_logs(&self) -> Result<Vec<CreationLogRow>> {
        Ok(self
            .records::<CreationTimeRecord>(LogChannel::CreationTimes)?
            .into_iter()
            .map(|stamped| {
                let record = stamped.record;
                let keys: Vec<&str> = record.blocks.iter().map(|kind| kind.key()).collect();
                CreationLogRow {
                    block_type: keys.join(", "),
                    time_info: format!("{:.2}", record.elapsed_secs),
                }
            })
            .collect())
    }

    /// Articles published within `updates_window_days` before `today`
    ///
    /// A negative window counts as zero days. A window reaching past the
    /// earliest representable date covers every published article.
    pub fn updates(&self, today: NaiveDate) -> Vec<UpdateRow> {
        let days = self.config.updates_window_days.max(0);
        let since = TimeDelta::try_days(days)
            .and_then(|window| today.checked_sub_signed(window))
            .unwrap_or(NaiveDate::MIN);
        self.repo
            .articles_published_since(since)
            .into_iter()
            .filter_map(|article| {
                let published = article.published?;
                Some(UpdateRow {
                    id: article.id,
                    timestamp: published.format("%Y-%m-%d").to_string(),
                    message: article.title,
                })
            })
            .collect()
    }

    /// Creation timings and recent updates
    pub fn overview(&self, today: NaiveDate) -> Result<Overview> {
        Ok(Overview {
            creation_logs: self.creation_logs()?,
            updates: self.updates(today),
        })
    }
}
