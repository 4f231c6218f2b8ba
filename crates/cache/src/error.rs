// crates/cache/src/error.rs
//! Error types for cache persistence

use std::path::PathBuf;
use thiserror::Error;

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur while persisting the loved-listings cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to read from the backing store
    #[error("Failed to read cache key '{key}': {source}")]
    ReadError {
        key: String,
        source: std::io::Error,
    },

    /// Failed to write to the backing store
    #[error("Failed to write cache key '{key}': {source}")]
    WriteError {
        key: String,
        source: std::io::Error,
    },

    /// Failed to serialize the cache record
    #[error("Failed to serialize cache record: {0}")]
    SerializeError(#[from] serde_json::Error),

    /// Store directory could not be created
    #[error("Failed to create cache directory at {path}: {source}")]
    DirectoryCreationError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Backing store is unavailable
    #[error("Cache storage unavailable: {0}")]
    StorageUnavailable(String),
}
