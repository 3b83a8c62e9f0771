//! Append-only event log
//!
//! Observers record what happened during an assembly into per-concern files
//! under one directory; report readers load them back.
//!
//! # Format
//!
//! - `errors.txt`: plain text, one line per missing block
//! - every other channel: newline-delimited JSON, one [`Stamped`] record per line
//!
//! Files are opened in append mode for every write and are not locked.
//! Concurrent writers interleave at line granularity.

mod records;

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{trace, warn};
use uuid::Uuid;

use crate::Result;

pub use self::records::{
    ArticlePlacement, ArticleSaveRecord, AuthorActivityRecord, CreationTimeRecord, ErrorRecord,
    LogRecord, NewTagsRecord, PopularArticlesRecord, ProhibitedWordsRecord, SeoIssueRecord,
    Stamped, UserActivityRecord, WordHit,
};

/// One event-log file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogChannel {
    /// Plain-text missing-block lines
    Errors,
    /// Structured missing-block reports
    ErrorsJson,
    /// Block views per user
    UserActivity,
    /// Author placement counters
    AuthorActivity,
    /// Article placement counters
    PopularArticles,
    /// Saved articles
    ArticleSaves,
    /// Newly seen tags
    NewTags,
    /// Prohibited-word hits
    ProhibitedWords,
    /// SEO title issues
    SeoTitles,
    /// Block creation timings
    CreationTimes,
}

impl LogChannel {
    /// Every channel
    pub const ALL: [LogChannel; 10] = [
        LogChannel::Errors,
        LogChannel::ErrorsJson,
        LogChannel::UserActivity,
        LogChannel::AuthorActivity,
        LogChannel::PopularArticles,
        LogChannel::ArticleSaves,
        LogChannel::NewTags,
        LogChannel::ProhibitedWords,
        LogChannel::SeoTitles,
        LogChannel::CreationTimes,
    ];

    /// File name inside the log directory
    pub fn file_name(self) -> &'static str {
        match self {
            LogChannel::Errors => "errors.txt",
            LogChannel::ErrorsJson => "errors.jsonl",
            LogChannel::UserActivity => "user_activity.jsonl",
            LogChannel::AuthorActivity => "author_activity.jsonl",
            LogChannel::PopularArticles => "popular_articles.jsonl",
            LogChannel::ArticleSaves => "article_saves.jsonl",
            LogChannel::NewTags => "new_tags.jsonl",
            LogChannel::ProhibitedWords => "prohibited_words.jsonl",
            LogChannel::SeoTitles => "seo_title_issues.jsonl",
            LogChannel::CreationTimes => "creation_times.jsonl",
        }
    }
}

impl fmt::Display for LogChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Directory of event-log files
#[derive(Debug, Clone)]
pub struct EventLog {
    dir: PathBuf,
}

impl EventLog {
    /// Event log rooted at `dir` (created on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Log directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a channel's file
    pub fn path(&self, channel: LogChannel) -> PathBuf {
        self.dir.join(channel.file_name())
    }

    /// Append a record produced by the given assembly
    pub fn append(&self, record: &LogRecord, assembly: Uuid) -> Result<()> {
        let channel = record.channel();
        match record {
            LogRecord::ErrorLine(line) => self.append_line(channel, line),
            LogRecord::Error(r) => self.append_stamped(channel, r, assembly),
            LogRecord::CreationTime(r) => self.append_stamped(channel, r, assembly),
            LogRecord::NewTags(r) => self.append_stamped(channel, r, assembly),
            LogRecord::ProhibitedWords(r) => self.append_stamped(channel, r, assembly),
            LogRecord::UserActivity(r) => self.append_stamped(channel, r, assembly),
            LogRecord::PopularArticles(r) => self.append_stamped(channel, r, assembly),
            LogRecord::AuthorActivity(r) => self.append_stamped(channel, r, assembly),
            LogRecord::SeoIssue(r) => self.append_stamped(channel, r, assembly),
            LogRecord::ArticleSave(r) => self.append_stamped(channel, r, assembly),
        }
    }

    fn append_stamped<T: Serialize>(
        &self,
        channel: LogChannel,
        record: &T,
        assembly: Uuid,
    ) -> Result<()> {
        let stamped = Stamped {
            at: Utc::now(),
            assembly,
            record,
        };
        let line = serde_json::to_string(&stamped)?;
        self.append_line(channel, &line)
    }

    /// Append one raw line to a channel
    pub fn append_line(&self, channel: LogChannel, line: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path(channel))?;
        file.write_all(format!("{}\n", line).as_bytes())?;
        trace!("Appended to {}: {}", channel, line);
        Ok(())
    }

    /// Read a channel's raw lines
    ///
    /// Returns `Ok(None)` when the file does not exist.
    pub fn read_lines(&self, channel: LogChannel) -> Result<Option<Vec<String>>> {
        match fs::read_to_string(self.path(channel)) {
            Ok(text) => Ok(Some(text.lines().map(str::to_string).collect())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Read a JSON channel's records
    ///
    /// Returns `Ok(None)` when the file does not exist. Blank lines are
    /// ignored; lines that do not decode as `Stamped<T>` are skipped with a
    /// warning.
    pub fn read_records<T: DeserializeOwned>(
        &self,
        channel: LogChannel,
    ) -> Result<Option<Vec<Stamped<T>>>> {
        let Some(lines) = self.read_lines(channel)? else {
            return Ok(None);
        };

        let mut records = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Stamped<T>>(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    "Skipping malformed record in {} line {}: {}",
                    channel,
                    index + 1,
                    e
                ),
            }
        }
        Ok(Some(records))
    }

    /// Delete a channel's file; a missing file is not an error
    pub fn clear(&self, channel: LogChannel) -> Result<()> {
        match fs::remove_file(self.path(channel)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
