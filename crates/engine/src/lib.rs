// crates/engine/src/lib.rs
//! Loved-listings synchronization engine
//!
//! Owns the authoritative in-memory view of which listings the current
//! user has loved and keeps it eventually consistent with the marketplace
//! backend:
//! - Instant reads from memory; optimistic toggles that flip state before
//!   the network answers
//! - Rollback on remote failure, single-item correction on server
//!   disagreement, last-response-wins under racing double-taps
//! - Durable persistence through the local cache store, surviving restart
//! - Subscriber notification for UI re-render on every visible change
//!
//! One engine is constructed per authenticated session and passed by
//! reference to consumers; `clear_all` is the sign-out teardown.
//!
//! # Example
//!
//! ```no_run
//! use lovedlist_cache::{FileStore, LocalCacheStore};
//! use lovedlist_core::ItemId;
//! use lovedlist_engine::SyncEngine;
//! use lovedlist_remote::{ClientConfig, HttpLoveService, StaticTokenProvider};
//!
//! # async fn run() {
//! let remote = HttpLoveService::new(
//!     ClientConfig::new("https://api.example.com"),
//!     StaticTokenProvider::new("token"),
//! )
//! .unwrap();
//! let cache = LocalCacheStore::new(FileStore::new("/data/cache").unwrap());
//!
//! let engine = SyncEngine::new(remote, cache);
//! engine.initialize().await;
//!
//! let outcome = engine.toggle(&ItemId::new("listing-1")).await;
//! assert!(outcome.success);
//! # }
//! ```

mod engine;
mod outcome;
mod subscriber;

pub use engine::SyncEngine;
pub use outcome::{BulkCheckOutcome, SyncOutcome, ToggleOutcome};
pub use subscriber::Subscription;
