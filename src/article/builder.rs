//! Article builder for constructing valid articles

use chrono::NaiveDate;

use super::types::{Article, ArticleId, Author, Tag};
use crate::validation::{validate_author_name, validate_body, validate_tag_name, validate_title};
use crate::{PortalError, Result};

#[must_use]
#[derive(Debug, Clone)]
pub struct ArticleBuilder {
    id: ArticleId,
    title: Option<String>,
    body: String,
    author: Option<Author>,
    published: Option<NaiveDate>,
    tags: Vec<Tag>,
    views_count: u64,
    save_count: u64,
    comment_count: u64,
    image: Option<String>,
}

impl ArticleBuilder {
    /// Create a new ArticleBuilder for the given article id
    pub fn new(id: impl Into<ArticleId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            body: String::new(),
            author: None,
            published: None,
            tags: Vec::new(),
            views_count: 0,
            save_count: 0,
            comment_count: 0,
            image: None,
        }
    }

    /// Set the title (required)
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the article text
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the author
    pub fn author(mut self, author: Author) -> Self {
        self.author = Some(author);
        self
    }

    /// Set the publication date
    pub fn published(mut self, date: NaiveDate) -> Self {
        self.published = Some(date);
        self
    }

    /// Add a single tag
    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Replace all tags
    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the view counter
    pub fn views(mut self, views: u64) -> Self {
        self.views_count = views;
        self
    }

    /// Set the save count aggregate
    pub fn saves(mut self, saves: u64) -> Self {
        self.save_count = saves;
        self
    }

    /// Set the comment count aggregate
    pub fn comments(mut self, comments: u64) -> Self {
        self.comment_count = comments;
        self
    }

    /// Set the image path
    pub fn image(mut self, path: impl Into<String>) -> Self {
        self.image = Some(path.into());
        self
    }

    /// Build the article, validating field limits
    ///
    /// Returns an error if the title is missing or any field exceeds its limit.
    pub fn build(self) -> Result<Article> {
        let title = self
            .title
            .ok_or_else(|| PortalError::InvalidArticle("Title is required".to_string()))?;

        validate_title(&title)?;
        validate_body(&self.body)?;
        if let Some(author) = &self.author {
            validate_author_name(&author.name)?;
        }
        for tag in &self.tags {
            validate_tag_name(&tag.name)?;
        }

        Ok(Article {
            id: self.id,
            title,
            body: self.body,
            author: self.author,
            published: self.published,
            tags: self.tags,
            views_count: self.views_count,
            save_count: self.save_count,
            comment_count: self.comment_count,
            image: self.image,
        })
    }
}
