//! Article field validation
//!
//! Field limits mirror the portal's storage schema. Lengths are counted in
//! characters, not bytes, so Cyrillic titles get the same room as ASCII ones.

use crate::{PortalError, Result};

/// Maximum article title length
pub const MAX_TITLE_LEN: usize = 100;
/// Maximum article body length
pub const MAX_BODY_LEN: usize = 1000;
/// Maximum author name length
pub const MAX_AUTHOR_NAME_LEN: usize = 50;
/// Maximum tag name length
pub const MAX_TAG_NAME_LEN: usize = 20;
/// Maximum prohibited word length
pub const MAX_PROHIBITED_WORD_LEN: usize = 255;

fn check_length(field: &str, value: &str, max: usize) -> Result<()> {
    let length = value.chars().count();
    if length > max {
        return Err(PortalError::InvalidArticle(format!(
            "{} is {} characters long, maximum is {}",
            field, length, max
        )));
    }
    Ok(())
}

fn check_not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PortalError::InvalidArticle(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(())
}

/// Validates an article title
///
/// # Examples
///
/// ```
/// use towns_news::validation::validate_title;
///
/// assert!(validate_title("City council approves new park").is_ok());
/// assert!(validate_title("   ").is_err());
/// assert!(validate_title(&"x".repeat(101)).is_err());
/// ```
pub fn validate_title(title: &str) -> Result<()> {
    check_not_blank("Title", title)?;
    check_length("Title", title, MAX_TITLE_LEN)
}

/// Validates an article body (may be empty)
pub fn validate_body(body: &str) -> Result<()> {
    check_length("Body", body, MAX_BODY_LEN)
}

/// Validates an author name
pub fn validate_author_name(name: &str) -> Result<()> {
    check_not_blank("Author name", name)?;
    check_length("Author name", name, MAX_AUTHOR_NAME_LEN)
}

/// Validates a tag name
///
/// # Examples
///
/// ```
/// use towns_news::validation::validate_tag_name;
///
/// assert!(validate_tag_name("politics").is_ok());
/// assert!(validate_tag_name("").is_err());
/// assert!(validate_tag_name("a-very-long-tag-name-indeed").is_err());
/// ```
pub fn validate_tag_name(name: &str) -> Result<()> {
    check_not_blank("Tag name", name)?;
    check_length("Tag name", name, MAX_TAG_NAME_LEN)
}

/// Validates a prohibited word
pub fn validate_prohibited_word(word: &str) -> Result<()> {
    check_not_blank("Prohibited word", word)?;
    check_length("Prohibited word", word, MAX_PROHIBITED_WORD_LEN)
}
