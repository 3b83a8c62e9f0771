//! Word family reports

use std::collections::HashSet;

use serde::Serialize;

use super::Reports;
use crate::Result;
use crate::article::ArticleId;
use crate::eventlog::{LogChannel, SeoIssueRecord};

/// Article containing prohibited words
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProhibitedWordsRow {
    /// Article id
    pub id: ArticleId,
    /// Article title
    pub title: String,
    /// Words found, comma-separated, in table order
    pub words: String,
}

/// Tags of one article
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagsRow {
    /// Article id
    pub id: ArticleId,
    /// Article title
    pub title: String,
    /// Tag names, comma-separated
    pub tags: String,
}

/// SEO verdict for one title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoRow {
    /// Article id
    pub id: ArticleId,
    /// Article title
    pub title: String,
    /// False when the title was logged as outside the SEO window
    pub passes: bool,
}

/// The three word family tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WordReport {
    /// Articles with prohibited words
    pub prohibited_words: Vec<ProhibitedWordsRow>,
    /// Tags per article
    pub tags: Vec<TagsRow>,
    /// SEO verdict per title
    pub seo: Vec<SeoRow>,
}

impl Reports<'_> {
    /// Every article whose body contains a word of the prohibited-word table
    ///
    /// Case-sensitive substring match over all articles, placed or not.
    pub fn prohibited_words_data(&self) -> Vec<ProhibitedWordsRow> {
        let words = self.repo.prohibited_words();
        self.repo
            .articles()
            .into_iter()
            .filter_map(|article| {
                let found: Vec<&str> = words
                    .iter()
                    .filter(|word| article.body.contains(word.as_str()))
                    .map(String::as_str)
                    .collect();
                if found.is_empty() {
                    return None;
                }
                Some(ProhibitedWordsRow {
                    id: article.id,
                    title: article.title.clone(),
                    words: found.join(", "),
                })
            })
            .collect()
    }

    /// Tag list of every article
    pub fn tags_data(&self) -> Vec<TagsRow> {
        self.repo
            .articles()
            .into_iter()
            .map(|article| TagsRow {
                id: article.id,
                tags: article.display_tags(),
                title: article.title,
            })
            .collect()
    }

    /// SEO verdict per distinct title
    ///
    /// Logged titles that still exist come first as failing, then every
    /// other article as passing. Without an SEO log the table is empty.
    pub fn seo_data(&self) -> Result<Vec<SeoRow>> {
        let Some(issues) = self
            .log
            .read_records::<SeoIssueRecord>(LogChannel::SeoTitles)?
        else {
            return Ok(Vec::new());
        };

        let mut seen: HashSet<String> = HashSet::new();
        let mut rows = Vec::new();
        for stamped in issues {
            if seen.contains(&stamped.record.title) {
                continue;
            }
            if let Some(article) = self.repo.find_by_title(&stamped.record.title) {
                seen.insert(article.title.clone());
                rows.push(SeoRow {
                    id: article.id,
                    title: article.title,
                    passes: false,
                });
            }
        }
        for article in self.repo.articles() {
            if seen.insert(article.title.clone()) {
                rows.push(SeoRow {
                    id: article.id,
                    title: article.title,
                    passes: true,
                });
            }
        }
        Ok(rows)
    }

    /// All three word tables
    pub fn word_report(&self) -> Result<WordReport> {
        Ok(WordReport {
            prohibited_words: self.prohibited_words_data(),
            tags: self.tags_data(),
            seo: self.seo_data()?,
        })
    }
}
