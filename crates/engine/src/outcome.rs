// crates/engine/src/outcome.rs
//! Operation result objects
//!
//! Every engine operation resolves to an outcome rather than an error
//! type: the UI always receives the final loved-state alongside a
//! `success` flag, an optional human-readable `error` (remote failures),
//! and an optional `warning` (storage failures, which degrade the session
//! to in-memory-only but never fail the operation).

use lovedlist_core::ItemId;
use std::collections::HashMap;

/// Result of a single toggle
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    /// Whether the toggle (or its queueing, while cold) succeeded
    pub success: bool,
    /// Final loved-state for the item, authoritative when the server answered
    pub is_loved: bool,
    /// Authoritative love count, when the server confirmed the toggle
    pub love_count: Option<u64>,
    /// True if the engine was cold and the toggle waits for replay
    pub queued: bool,
    /// Remote failure description, for the UI's "try again" affordance
    pub error: Option<String>,
    /// Storage failure description; the session continues cache-less
    pub warning: Option<String>,
}

impl ToggleOutcome {
    /// Server confirmed (or corrected) the toggle
    pub fn confirmed(is_loved: bool, love_count: u64) -> Self {
        Self {
            success: true,
            is_loved,
            love_count: Some(love_count),
            queued: false,
            error: None,
            warning: None,
        }
    }

    /// Remote call failed; membership was rolled back to `is_loved`
    pub fn rolled_back(is_loved: bool, error: String) -> Self {
        Self {
            success: false,
            is_loved,
            love_count: None,
            queued: false,
            error: Some(error),
            warning: None,
        }
    }

    /// Toggle accepted while cold, to be replayed after initialization
    pub fn queued(projected_is_loved: bool) -> Self {
        Self {
            success: true,
            is_loved: projected_is_loved,
            love_count: None,
            queued: true,
            error: None,
            warning: None,
        }
    }

    /// Attaches a storage warning, keeping any earlier one
    pub fn with_warning(mut self, warning: Option<String>) -> Self {
        self.warning = self.warning.or(warning);
        self
    }
}

/// Result of a full reconciliation against the remote authority
#[derive(Debug, Clone)]
pub struct SyncOutcome {
    /// Whether the remote list was fetched and applied
    pub success: bool,
    /// Number of loved items after the operation
    pub loved_count: usize,
    /// Remote failure description; prior state is left untouched
    pub error: Option<String>,
    /// Storage failure description
    pub warning: Option<String>,
}

impl SyncOutcome {
    /// Reconciliation applied; the set now holds `loved_count` items
    pub fn applied(loved_count: usize) -> Self {
        Self {
            success: true,
            loved_count,
            error: None,
            warning: None,
        }
    }

    /// Remote fetch failed; prior state remains authoritative
    pub fn failed(loved_count: usize, error: String) -> Self {
        Self {
            success: false,
            loved_count,
            error: Some(error),
            warning: None,
        }
    }

    /// Attaches a storage warning
    pub fn with_warning(mut self, warning: Option<String>) -> Self {
        self.warning = self.warning.or(warning);
        self
    }
}

/// Result of a bulk membership check
#[derive(Debug, Clone)]
pub struct BulkCheckOutcome {
    /// Whether the server answered the batch
    pub success: bool,
    /// Authoritative membership per queried item, for immediate rendering
    pub status: HashMap<ItemId, bool>,
    /// Remote failure description; prior state is left untouched
    pub error: Option<String>,
    /// Storage failure description
    pub warning: Option<String>,
}

impl BulkCheckOutcome {
    /// Server answered; results were merged into the loved set
    pub fn merged(status: HashMap<ItemId, bool>) -> Self {
        Self {
            success: true,
            status,
            error: None,
            warning: None,
        }
    }

    /// Remote check failed; prior state remains authoritative
    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            status: HashMap::new(),
            error: Some(error),
            warning: None,
        }
    }

    /// Attaches a storage warning
    pub fn with_warning(mut self, warning: Option<String>) -> Self {
        self.warning = self.warning.or(warning);
        self
    }
}
