//! Portal error types

use thiserror::Error;

/// Block assembly, event-log and report errors
#[derive(Error, Debug)]
pub enum PortalError {
    /// IO error while reading or appending an event log
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error while encoding an event-log record
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Facade family key not in {error, activity, tracker, word, count}
    #[error("Unknown facade type: {0}")]
    UnknownFacade(String),

    /// Strategy name not known to the selecting facade
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    /// Director asked to construct a block before a strategy was set
    #[error("No strategy set; set a strategy before constructing a block")]
    StrategyNotSet,

    /// An observer failed during notification
    #[error("Observer {observer} failed: {message}")]
    Observer {
        /// Observer name (e.g., "popular_article_tracker")
        observer: &'static str,
        /// Failure description
        message: String,
    },

    /// Article data violates a field constraint
    #[error("Invalid article: {0}")]
    InvalidArticle(String),

    /// No article with this id in the repository
    #[error("No such article: {0}")]
    NoSuchArticle(u64),

    /// The repository holds no articles to place
    #[error("No articles to display")]
    NoArticles,
}

/// Result type alias using PortalError
pub type Result<T> = std::result::Result<T, PortalError>;
