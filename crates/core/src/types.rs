// crates/core/src/types.rs
//! Core loved-listing types

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Opaque listing identifier, issued by the marketplace backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an item ID from a string
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the item ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set of listings the current user has marked as loved
///
/// Membership is boolean per identifier; inserting an already-present
/// identifier or removing an absent one is a no-op. Only the sync engine
/// mutates this set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LovedSet {
    items: HashSet<ItemId>,
}

impl LovedSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the item is loved
    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.contains(id)
    }

    /// Inserts an item; returns true if membership changed
    pub fn insert(&mut self, id: ItemId) -> bool {
        self.items.insert(id)
    }

    /// Removes an item; returns true if membership changed
    pub fn remove(&mut self, id: &ItemId) -> bool {
        self.items.remove(id)
    }

    /// Sets membership to an explicit value; returns true if it changed
    pub fn set(&mut self, id: &ItemId, loved: bool) -> bool {
        if loved {
            self.insert(id.clone())
        } else {
            self.remove(id)
        }
    }

    /// Number of loved items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is loved
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes all items
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterates over the loved item IDs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter()
    }

    /// Item IDs in a stable (sorted) order, for persistence
    pub fn to_sorted_ids(&self) -> Vec<ItemId> {
        let mut ids: Vec<ItemId> = self.items.iter().cloned().collect();
        ids.sort();
        ids
    }
}

impl FromIterator<ItemId> for LovedSet {
    fn from_iter<T: IntoIterator<Item = ItemId>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
