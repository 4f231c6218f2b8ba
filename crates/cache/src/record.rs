// crates/cache/src/record.rs
//! Persisted form of the loved-listings set

use lovedlist_core::{ItemId, LovedSet};
use serde::{Deserialize, Serialize};

/// The single record the cache persists: the loved item IDs plus the
/// timestamp of the last successful remote sync.
///
/// Wire form is JSON: `{"itemIds": ["..."], "timestamp": 1700000000000}`.
/// Unknown fields are ignored so newer app versions can extend the record
/// without breaking older readers; `timestamp` is absent until the first
/// successful sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    /// Deduplicated loved item IDs, stored in sorted order
    #[serde(default)]
    pub item_ids: Vec<ItemId>,

    /// Epoch millis of the last successful remote sync, if any
    #[serde(rename = "timestamp", default, skip_serializing_if = "Option::is_none")]
    pub last_synced_at_millis: Option<i64>,
}

impl CacheRecord {
    /// The empty record used for cold starts
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a record from the in-memory set
    pub fn from_set(set: &LovedSet, last_synced_at_millis: Option<i64>) -> Self {
        Self {
            item_ids: set.to_sorted_ids(),
            last_synced_at_millis,
        }
    }

    /// Rebuilds the in-memory set, dropping any duplicate IDs
    pub fn to_set(&self) -> LovedSet {
        self.item_ids.iter().cloned().collect()
    }

    /// Returns true if the record holds no items and no sync timestamp
    pub fn is_empty(&self) -> bool {
        self.item_ids.is_empty() && self.last_synced_at_millis.is_none()
    }
}
