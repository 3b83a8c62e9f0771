//! Portal article model
//!
//! This module is organized into:
//! - `types`: Core data structures (Article, Author, Tag)
//! - `builder`: ArticleBuilder for constructing valid articles

mod builder;
mod types;

pub use self::builder::ArticleBuilder;
pub use self::types::{Article, ArticleId, Author, Tag, UNKNOWN_AUTHOR};
