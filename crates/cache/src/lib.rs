// crates/cache/src/lib.rs
//! On-device persistence for the loved-listings set
//!
//! A [`LocalCacheStore`] keeps exactly one [`CacheRecord`] under a fixed
//! key in a [`KeyValueStore`]. The record is overwritten wholesale on every
//! change; there are no partial patches, so a torn write can never leave a
//! half-updated set behind.
//!
//! Loading never fails: a missing or undecodable record is a cold-start
//! condition, not an error, and yields the empty record.

mod error;
mod kv;
mod record;
mod store;

pub use error::{CacheError, CacheResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use record::CacheRecord;
pub use store::LocalCacheStore;

/// Storage key the cache record lives under
pub const LOVED_CACHE_KEY: &str = "loved_listings_cache";
