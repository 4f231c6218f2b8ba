// crates/cache/src/store.rs
//! The local cache store facade

use crate::error::CacheResult;
use crate::kv::KeyValueStore;
use crate::record::CacheRecord;
use crate::LOVED_CACHE_KEY;

/// Durable storage of one [`CacheRecord`] under the fixed loved-cache key.
///
/// The sync engine is the only caller; no other component reads or writes
/// the key. `load` never fails — a corrupted or missing record is a
/// cold-start condition and degrades to the empty record.
pub struct LocalCacheStore<K: KeyValueStore> {
    kv: K,
}

impl<K: KeyValueStore> LocalCacheStore<K> {
    /// Wraps a key/value backend
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Loads the cache record, or the empty record on absence or corruption
    pub fn load(&self) -> CacheRecord {
        let raw = match self.kv.get(LOVED_CACHE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::info!("No loved-listings cache found, starting cold");
                return CacheRecord::empty();
            }
            Err(e) => {
                log::warn!("Loved-listings cache unreadable, starting cold: {e}");
                return CacheRecord::empty();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Loved-listings cache corrupted, starting cold: {e}");
                CacheRecord::empty()
            }
        }
    }

    /// Overwrites the stored record wholesale
    pub fn save(&self, record: &CacheRecord) -> CacheResult<()> {
        let json = serde_json::to_string(record)?;
        self.kv.set(LOVED_CACHE_KEY, &json)
    }

    /// Removes the stored record; succeeds if none exists
    pub fn clear(&self) -> CacheResult<()> {
        self.kv.remove(LOVED_CACHE_KEY)
    }
}
