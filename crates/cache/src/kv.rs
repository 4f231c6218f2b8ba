// crates/cache/src/kv.rs
//! Key/value backends for the cache record
//!
//! The on-device store the marketplace app ships with is only reachable
//! through this trait; the cache never talks to disk directly. [`FileStore`]
//! is the durable backend (one file per key, atomic writes); [`MemoryStore`]
//! backs tests and cache-less sessions after a storage failure.

use crate::error::{CacheError, CacheResult};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Minimal string key/value storage contract
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if the key is absent
    fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores the value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> CacheResult<()>;

    /// Removes the key; succeeds if the key was already absent
    fn remove(&self, key: &str) -> CacheResult<()>;
}

/// File-backed store: each key is a JSON file inside one directory.
///
/// Writes go through a temp file in the same directory followed by an
/// atomic rename, so readers never observe a partially written value.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at the given directory, creating it if needed
    pub fn new(dir: impl Into<PathBuf>) -> CacheResult<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| CacheError::DirectoryCreationError {
                path: dir.clone(),
                source: e,
            })?;
            log::info!("Created cache directory: {}", dir.display());
        }
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn write_atomic(&self, path: &Path, key: &str, value: &str) -> CacheResult<()> {
        let mut temp = NamedTempFile::new_in(&self.dir).map_err(|e| CacheError::WriteError {
            key: key.to_string(),
            source: e,
        })?;
        temp.write_all(value.as_bytes())
            .and_then(|()| temp.flush())
            .map_err(|e| CacheError::WriteError {
                key: key.to_string(),
                source: e,
            })?;
        temp.persist(path).map_err(|e| CacheError::WriteError {
            key: key.to_string(),
            source: e.error,
        })?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path).map_err(|e| CacheError::ReadError {
            key: key.to_string(),
            source: e,
        })?;
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        let path = self.path_for(key);
        self.write_atomic(&path, key, value)?;
        log::debug!("Wrote cache key '{}' to {}", key, path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::WriteError {
                key: key.to_string(),
                source: e,
            }),
        }
    }
}

/// In-memory store for tests and cache-less sessions
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| CacheError::StorageUnavailable("lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| CacheError::StorageUnavailable("lock poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| CacheError::StorageUnavailable("lock poisoned".to_string()))?;
        values.remove(key);
        Ok(())
    }
}
