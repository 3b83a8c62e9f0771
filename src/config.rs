//! Portal configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::facade::Family;
use crate::observer::FaultPolicy;

/// Acceptable title length window for the SEO title check, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoWindow {
    /// Shortest acceptable title
    pub min_length: usize,
    /// Longest acceptable title
    pub max_length: usize,
}

impl SeoWindow {
    /// Create a window accepting titles of `min_length..=max_length` characters
    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
        }
    }

    /// Check whether a title falls inside the window
    #[must_use]
    pub fn accepts(&self, title: &str) -> bool {
        let length = title.chars().count();
        length >= self.min_length && length <= self.max_length
    }
}

impl Default for SeoWindow {
    fn default() -> Self {
        Self::new(50, 60)
    }
}

/// Portal configuration
///
/// Everything the block pipeline and the report readers need besides the
/// article repository.
///
/// # Example
///
/// ```
/// use towns_news::{Family, PortalConfig};
///
/// let config = PortalConfig::new("/var/log/towns-news")
///     .with_family(Family::Word)
///     .with_seo_window(40, 70)
///     .with_prohibited_words(vec!["spam"]);
///
/// assert_eq!(config.selected_family, Family::Word);
/// assert_eq!(config.seo_window.max_length, 70);
/// assert_eq!(config.updates_window_days, 180);
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Directory holding the per-concern event-log files
    pub log_dir: PathBuf,

    /// Title length window used by the SEO title checker
    #[serde(default)]
    pub seo_window: SeoWindow,

    /// Words checked by the prohibited-words observer, in addition to the
    /// repository's prohibited-word table
    #[serde(default)]
    pub prohibited_words: Vec<String>,

    /// How far back (in days) the count report looks for updates
    #[serde(default = "default_updates_window_days")]
    pub updates_window_days: i64,

    /// Family used for the front page; the key is case-insensitive
    #[serde(default)]
    pub selected_family: Family,

    /// What happens when an observer fails during notification
    #[serde(default)]
    pub fault_policy: FaultPolicy,
}

fn default_updates_window_days() -> i64 {
    180
}

impl PortalConfig {
    /// Create a configuration writing event logs under `log_dir`
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            seo_window: SeoWindow::default(),
            prohibited_words: Vec::new(),
            updates_window_days: default_updates_window_days(),
            selected_family: Family::default(),
            fault_policy: FaultPolicy::default(),
        }
    }

    /// Set the family used for the front page
    pub fn with_family(mut self, family: Family) -> Self {
        self.selected_family = family;
        self
    }

    /// Set the SEO title length window
    pub fn with_seo_window(mut self, min_length: usize, max_length: usize) -> Self {
        self.seo_window = SeoWindow::new(min_length, max_length);
        self
    }

    /// Set the extra prohibited words
    pub fn with_prohibited_words(mut self, words: Vec<impl Into<String>>) -> Self {
        self.prohibited_words = words.into_iter().map(|w| w.into()).collect();
        self
    }

    /// Set the updates window in days
    pub fn with_updates_window_days(mut self, days: i64) -> Self {
        self.updates_window_days = days;
        self
    }

    /// Set the observer fault policy
    pub fn with_fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.fault_policy = policy;
        self
    }
}
