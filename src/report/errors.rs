//! Error family reports

use tracing::debug;

use super::Reports;
use crate::Result;
use crate::eventlog::{ErrorRecord, LogChannel, Stamped};

/// Returned alone by [`Reports::errors`] when `errors.txt` does not exist
pub const ERROR_LOG_NOT_FOUND: &str = "Error log file not found.";

/// Returned alone by [`Reports::errors`] when `errors.txt` holds no errors
pub const NO_CURRENT_ERRORS: &str = "There are no current errors.";

impl Reports<'_> {
    /// Distinct non-empty lines of the plain-text error log
    ///
    /// Lines are trimmed and listed in first-seen order. A missing file
    /// yields `[ERROR_LOG_NOT_FOUND]`, a file without errors yields
    /// `[NO_CURRENT_ERRORS]`.
    pub fn errors(&self) -> Result<Vec<String>> {
        let Some(lines) = self.log.read_lines(LogChannel::Errors)? else {
            debug!("{} not found", LogChannel::Errors);
            return Ok(vec![ERROR_LOG_NOT_FOUND.to_string()]);
        };

        let unique = dedup(lines.iter().map(|line| line.trim()));
        if unique.is_empty() {
            return Ok(vec![NO_CURRENT_ERRORS.to_string()]);
        }
        Ok(unique)
    }

    /// Strip separator commas and whitespace from both ends of each error,
    /// then drop empties and duplicates
    pub fn clean_errors<S: AsRef<str>>(errors: &[S]) -> Vec<String> {
        dedup(errors.iter().map(|error| {
            error
                .as_ref()
                .trim_matches(|c: char| c == ',' || c == ' ')
                .trim()
        }))
    }

    /// Structured error records, oldest first
    pub fn error_records(&self) -> Result<Vec<Stamped<ErrorRecord>>> {
        self.records(LogChannel::ErrorsJson)
    }
}

fn dedup<'s>(items: impl Iterator<Item = &'s str>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for item in items {
        if !item.is_empty() && !unique.iter().any(|seen| seen == item) {
            unique.push(item.to_string());
        }
    }
    unique
}
