//! Activity family reports

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::trace;

use super::{Reports, sort_by_count};
use crate::Result;
use crate::block::BlockKind;
use crate::eventlog::{AuthorActivityRecord, LogChannel, UserActivityRecord};

/// Articles placed per author
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorActivityRow {
    /// Author primary key
    pub id: u64,
    /// Author name as logged
    pub name: String,
    /// Placements summed over every logged pass
    pub count: u64,
}

/// Views per block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockViewRow {
    /// Viewed block
    pub block: BlockKind,
    /// Number of logged views
    pub views: u64,
}

/// Activity family report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityReport {
    /// Authors by placements, most placed first
    pub authors: Vec<AuthorActivityRow>,
    /// Blocks by views, most viewed first
    pub block_views: Vec<BlockViewRow>,
}

impl Reports<'_> {
    /// Author placements and block views
    ///
    /// Placements are summed per trimmed author name and joined to the author
    /// table; names without a live author are dropped.
    pub fn activity_report(&self) -> Result<ActivityReport> {
        let mut placed: BTreeMap<String, u64> = BTreeMap::new();
        for stamped in self.records::<AuthorActivityRecord>(LogChannel::AuthorActivity)? {
            for (name, count) in stamped.record.placed {
                *placed.entry(name.trim().to_string()).or_insert(0) += count;
            }
        }

        let authors: HashMap<String, u64> = self
            .repo
            .authors()
            .into_iter()
            .map(|author| (author.name.trim().to_string(), author.id))
            .collect();

        let mut ranked: Vec<(String, u64)> = placed.into_iter().collect();
        sort_by_count(&mut ranked);
        let authors = ranked
            .into_iter()
            .filter_map(|(name, count)| match authors.get(&name) {
                Some(&id) => Some(AuthorActivityRow { id, name, count }),
                None => {
                    trace!("Dropping activity for unknown author {:?}", name);
                    None
                }
            })
            .collect();

        let mut views: BTreeMap<BlockKind, u64> = BTreeMap::new();
        for stamped in self.records::<UserActivityRecord>(LogChannel::UserActivity)? {
            for block in stamped.record.blocks {
                *views.entry(block).or_insert(0) += 1;
            }
        }
        let mut ranked: Vec<(BlockKind, u64)> = views.into_iter().collect();
        sort_by_count(&mut ranked);
        let block_views = ranked
            .into_iter()
            .map(|(block, views)| BlockViewRow { block, views })
            .collect();

        Ok(ActivityReport {
            authors,
            block_views,
        })
    }
}
