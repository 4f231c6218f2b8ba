// crates/core/src/lib.rs
//! Shared vocabulary types for the loved-listings cache
//!
//! Every other crate in the workspace speaks in terms of these types:
//! - [`ItemId`] — opaque server-issued listing identifier
//! - [`LovedSet`] — deduplicated membership set of loved listings

mod types;

pub use types::{ItemId, LovedSet};
