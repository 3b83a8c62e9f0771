//! Tracker family reports

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;

use super::{Reports, sort_by_count};
use crate::Result;
use crate::article::ArticleId;
use crate::eventlog::{ArticleSaveRecord, LogChannel, PopularArticlesRecord};

/// Placements per article
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleViewsRow {
    /// Live article id
    pub id: ArticleId,
    /// Trimmed title as logged
    pub title: String,
    /// Placements summed over every logged pass
    pub views: u64,
}

/// Saves per article
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleSavesRow {
    /// Live article id
    pub id: ArticleId,
    /// Trimmed title as logged
    pub title: String,
    /// Logged save counts summed over every pass
    pub saves: u64,
}

impl Reports<'_> {
    /// Most placed articles first
    pub fn article_views(&self) -> Result<Vec<ArticleViewsRow>> {
        let mut views: BTreeMap<String, u64> = BTreeMap::new();
        for stamped in self.records::<PopularArticlesRecord>(LogChannel::PopularArticles)? {
            for placement in stamped.record.placed {
                *views.entry(placement.title.trim().to_string()).or_insert(0) += placement.count;
            }
        }
        Ok(self
            .join_titles(views)
            .into_iter()
            .map(|(id, title, views)| ArticleViewsRow { id, title, views })
            .collect())
    }

    /// Most saved articles first
    pub fn article_saves(&self) -> Result<Vec<ArticleSavesRow>> {
        let mut saves: BTreeMap<String, u64> = BTreeMap::new();
        for stamped in self.records::<ArticleSaveRecord>(LogChannel::ArticleSaves)? {
            let record = stamped.record;
            *saves.entry(record.title.trim().to_string()).or_insert(0) += record.saves;
        }
        Ok(self
            .join_titles(saves)
            .into_iter()
            .map(|(id, title, saves)| ArticleSavesRow { id, title, saves })
            .collect())
    }

    /// Sort title counts descending and join them to live articles
    fn join_titles(&self, counts: BTreeMap<String, u64>) -> Vec<(ArticleId, String, u64)> {
        let index = self.title_index();
        let mut ranked: Vec<(String, u64)> = counts.into_iter().collect();
        sort_by_count(&mut ranked);
        ranked
            .into_iter()
            .filter_map(|(title, count)| match index.get(&title) {
                Some(&id) => Some((id, title, count)),
                None => {
                    trace!("Dropping counts for unknown title {:?}", title);
                    None
                }
            })
            .collect()
    }
}
