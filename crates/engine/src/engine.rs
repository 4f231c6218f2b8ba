// crates/engine/src/engine.rs
//! The sync engine

use crate::outcome::{BulkCheckOutcome, SyncOutcome, ToggleOutcome};
use crate::subscriber::{SubscriberList, Subscription};
use chrono::{DateTime, Utc};
use lovedlist_cache::{CacheRecord, KeyValueStore, LocalCacheStore};
use lovedlist_core::{ItemId, LovedSet};
use lovedlist_remote::RemoteLoveService;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// In-memory engine state, guarded by one mutex.
///
/// The lock is never held across a suspension point: every operation
/// completes its synchronous mutation (the optimistic prelude, a rollback,
/// a merge) before the task yields to storage or the network, so reads in
/// between observe a consistent, possibly optimistic, set.
struct EngineState {
    loved: LovedSet,
    last_synced_at_millis: Option<i64>,
    /// False until `initialize` has loaded the cache (Cold), true after (Warm)
    warm: bool,
    /// Toggles issued while Cold, replayed in issue order once Warm
    cold_queue: Vec<ItemId>,
    /// Bumped on sign-out and wholesale replacement; a toggle whose remote
    /// call was outstanding across the bump must not settle into the new set
    epoch: u64,
}

impl EngineState {
    fn cold() -> Self {
        Self {
            loved: LovedSet::new(),
            last_synced_at_millis: None,
            warm: false,
            cold_queue: Vec::new(),
            epoch: 0,
        }
    }
}

/// Authoritative client-side view of the user's loved listings.
///
/// Reads are synchronous and served from memory. Mutations apply
/// optimistically, persist through the local cache store, notify
/// subscribers, then reconcile with the remote authority: a failed remote
/// call rolls the item back, a disagreeing one is corrected to the
/// server's value. Racing toggles on one item follow last-response-wins —
/// whichever server response arrives last determines membership.
///
/// Construct one engine per authenticated session; call [`clear_all`] on
/// sign-out.
///
/// [`clear_all`]: SyncEngine::clear_all
pub struct SyncEngine<R, K>
where
    R: RemoteLoveService,
    K: KeyValueStore,
{
    remote: R,
    cache: LocalCacheStore<K>,
    state: Mutex<EngineState>,
    subscribers: Arc<Mutex<SubscriberList>>,
}

impl<R, K> SyncEngine<R, K>
where
    R: RemoteLoveService,
    K: KeyValueStore,
{
    /// Creates a Cold engine; call [`initialize`] before rendering
    ///
    /// [`initialize`]: SyncEngine::initialize
    pub fn new(remote: R, cache: LocalCacheStore<K>) -> Self {
        Self {
            remote,
            cache,
            state: Mutex::new(EngineState::cold()),
            subscribers: Arc::new(Mutex::new(SubscriberList::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Saves the current set; a failure degrades to in-memory-only
    fn persist_locked(&self, state: &EngineState) -> Option<String> {
        let record = CacheRecord::from_set(&state.loved, state.last_synced_at_millis);
        match self.cache.save(&record) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("Failed to persist loved cache, continuing in memory: {e}");
                Some(e.to_string())
            }
        }
    }

    /// Invokes every subscriber with the snapshot, outside the state lock
    fn notify(&self, snapshot: &LovedSet) {
        let callbacks = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot();
        for callback in callbacks {
            callback(snapshot);
        }
    }

    /// Loads the cached loved set and transitions Cold to Warm.
    ///
    /// Never fails: an unreadable cache yields an empty Warm set. Calling
    /// it again while Warm is a no-op. Subscribers are not notified for
    /// the load itself; toggles queued while Cold are replayed afterwards
    /// in issue order and notify as usual.
    pub async fn initialize(&self) {
        let queued = {
            let mut state = self.state();
            if state.warm {
                return;
            }
            let record = self.cache.load();
            state.loved = record.to_set();
            state.last_synced_at_millis = record.last_synced_at_millis;
            state.warm = true;
            log::info!("Loved cache warm with {} items", state.loved.len());
            std::mem::take(&mut state.cold_queue)
        };
        self.replay(queued).await;
    }

    async fn replay(&self, queued: Vec<ItemId>) {
        for item_id in queued {
            let outcome = self.toggle(&item_id).await;
            if !outcome.success {
                // No caller is waiting on a replayed toggle; rollback
                // already restored a consistent state
                log::warn!(
                    "Replayed love toggle for {item_id} failed: {}",
                    outcome.error.as_deref().unwrap_or("unknown")
                );
            }
        }
    }

    /// True once `initialize` (or a successful remote sync) has completed
    pub fn is_initialized(&self) -> bool {
        self.state().warm
    }

    /// Current loved-state for the item; `false` while Cold
    pub fn is_loved(&self, item_id: &ItemId) -> bool {
        let state = self.state();
        state.warm && state.loved.contains(item_id)
    }

    /// Number of loved listings; `0` while Cold
    pub fn loved_count(&self) -> usize {
        let state = self.state();
        if state.warm {
            state.loved.len()
        } else {
            0
        }
    }

    /// Time of the last successful remote reconciliation, if any
    pub fn last_synced_at(&self) -> Option<DateTime<Utc>> {
        self.state()
            .last_synced_at_millis
            .and_then(DateTime::from_timestamp_millis)
    }

    /// Flips loved-state for one listing.
    ///
    /// The flip is applied, persisted, and announced to subscribers before
    /// the remote call is issued, so the UI reacts instantly. The remote
    /// answer then settles the toggle: confirmation is a no-op, a
    /// disagreeing server value replaces the optimistic one, and a failure
    /// rolls the item back to its state at the start of this call.
    pub async fn toggle(&self, item_id: &ItemId) -> ToggleOutcome {
        let (previous, epoch, warning, snapshot) = {
            let mut state = self.state();
            if !state.warm {
                state.cold_queue.push(item_id.clone());
                let flips = state.cold_queue.iter().filter(|q| *q == item_id).count();
                log::debug!("Engine cold, queued love toggle for {item_id}");
                return ToggleOutcome::queued(flips % 2 == 1);
            }
            let previous = state.loved.contains(item_id);
            state.loved.set(item_id, !previous);
            let warning = self.persist_locked(&state);
            (previous, state.epoch, warning, state.loved.clone())
        };
        self.notify(&snapshot);

        match self.remote.toggle(item_id).await {
            Ok(resp) if resp.success => {
                // Last-response-wins: adopt the server's value only if it
                // differs from whatever membership is current by now. A
                // sign-out or wholesale replacement while the call was
                // outstanding invalidates the toggle entirely
                let (corrected, correction_warning) = {
                    let mut state = self.state();
                    if state.epoch == epoch && state.loved.contains(item_id) != resp.is_loved {
                        state.loved.set(item_id, resp.is_loved);
                        let w = self.persist_locked(&state);
                        (Some(state.loved.clone()), w)
                    } else {
                        if state.epoch != epoch {
                            log::debug!("Discarding stale toggle response for {item_id}");
                        }
                        (None, None)
                    }
                };
                if let Some(snapshot) = corrected {
                    log::debug!(
                        "Server corrected loved-state for {item_id} to {}",
                        resp.is_loved
                    );
                    self.notify(&snapshot);
                }
                ToggleOutcome::confirmed(resp.is_loved, resp.love_count)
                    .with_warning(warning)
                    .with_warning(correction_warning)
            }
            Ok(_) => {
                log::warn!("Server declined love toggle for {item_id}");
                self.roll_back(item_id, previous, epoch, "server declined the toggle".to_string())
                    .with_warning(warning)
            }
            Err(e) => {
                log::warn!("Love toggle for {item_id} failed: {e}");
                self.roll_back(item_id, previous, epoch, e.to_string())
                    .with_warning(warning)
            }
        }
    }

    /// Restores the item to its pre-call membership after a remote failure.
    ///
    /// A no-op when the epoch moved on: the pre-call value belongs to a
    /// session or set that no longer exists.
    fn roll_back(&self, item_id: &ItemId, previous: bool, epoch: u64, error: String) -> ToggleOutcome {
        let (snapshot, warning) = {
            let mut state = self.state();
            if state.epoch == epoch && state.loved.set(item_id, previous) {
                let w = self.persist_locked(&state);
                (Some(state.loved.clone()), w)
            } else {
                // Epoch moved on, or a racing toggle already restored this
                // value
                (None, None)
            }
        };
        if let Some(snapshot) = snapshot {
            self.notify(&snapshot);
        }
        ToggleOutcome::rolled_back(previous, error).with_warning(warning)
    }

    /// Replaces the loved set wholesale with the remote authority's view.
    ///
    /// Used after sign-in and on suspected drift (pull-to-refresh). A Cold
    /// engine becomes Warm on success, since the remote list supersedes
    /// anything the cache holds. Failure leaves the prior state untouched.
    pub async fn sync_from_remote(&self) -> SyncOutcome {
        match self.remote.fetch_all().await {
            Ok(resp) if resp.success => {
                let (snapshot, warning, queued) = {
                    let mut state = self.state();
                    state.loved = resp
                        .loved_items
                        .iter()
                        .map(|item| item.item_id.clone())
                        .collect();
                    state.last_synced_at_millis = Some(Utc::now().timestamp_millis());
                    state.warm = true;
                    // Outstanding toggles predate the replaced set; their
                    // rollbacks and corrections must not land in it
                    state.epoch += 1;
                    let warning = self.persist_locked(&state);
                    (
                        state.loved.clone(),
                        warning,
                        std::mem::take(&mut state.cold_queue),
                    )
                };
                log::info!("Reconciled loved set from remote: {} items", snapshot.len());
                self.notify(&snapshot);
                self.replay(queued).await;
                SyncOutcome::applied(self.loved_count()).with_warning(warning)
            }
            Ok(_) => {
                log::warn!("Server declined loved-list fetch");
                SyncOutcome::failed(self.loved_count(), "server declined the fetch".to_string())
            }
            Err(e) => {
                log::warn!("Loved-list fetch failed: {e}");
                SyncOutcome::failed(self.loved_count(), e.to_string())
            }
        }
    }

    /// Fetches authoritative loved-state for a batch of listings and
    /// merges it into the set: `true` inserts, explicit `false` removes.
    ///
    /// Used for freshly loaded result pages the local set may not cover.
    /// Failure leaves the prior state untouched.
    pub async fn check_bulk(&self, item_ids: &[ItemId]) -> BulkCheckOutcome {
        if item_ids.is_empty() {
            return BulkCheckOutcome::merged(Default::default());
        }

        match self.remote.check_many(item_ids).await {
            Ok(resp) if resp.success => {
                let (snapshot, warning) = {
                    let mut state = self.state();
                    let mut changed = false;
                    for (item_id, loved) in &resp.status {
                        changed |= state.loved.set(item_id, *loved);
                    }
                    if changed {
                        let w = self.persist_locked(&state);
                        (Some(state.loved.clone()), w)
                    } else {
                        (None, None)
                    }
                };
                if let Some(snapshot) = snapshot {
                    self.notify(&snapshot);
                }
                BulkCheckOutcome::merged(resp.status).with_warning(warning)
            }
            Ok(_) => {
                log::warn!("Server declined bulk loved-state check");
                BulkCheckOutcome::failed("server declined the check".to_string())
            }
            Err(e) => {
                log::warn!("Bulk loved-state check failed: {e}");
                BulkCheckOutcome::failed(e.to_string())
            }
        }
    }

    /// Sign-out teardown: empties the set, discards queued and in-flight
    /// toggles, clears the on-device cache, and notifies subscribers.
    ///
    /// The engine stays usable afterwards; every `is_loved` answers
    /// `false` until a new session syncs.
    pub fn clear_all(&self) -> SyncOutcome {
        let snapshot = {
            let mut state = self.state();
            let had_items = !state.loved.is_empty();
            state.loved.clear();
            state.cold_queue.clear();
            state.last_synced_at_millis = None;
            // Invalidate every outstanding toggle; a late response must
            // not resurrect the previous user's loved state
            state.epoch += 1;
            had_items.then(|| state.loved.clone())
        };
        let warning = match self.cache.clear() {
            Ok(()) => None,
            Err(e) => {
                log::warn!("Failed to clear loved cache on sign-out: {e}");
                Some(e.to_string())
            }
        };
        if let Some(snapshot) = snapshot {
            self.notify(&snapshot);
        }
        SyncOutcome::applied(0).with_warning(warning)
    }

    /// Registers a callback invoked with the full set on every change.
    ///
    /// Deregistration is explicit through the returned handle; the
    /// subscriber list lives and dies with the engine instance.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&LovedSet) + Send + Sync + 'static,
    {
        let id = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add(Arc::new(callback));
        Subscription::new(id, Arc::downgrade(&self.subscribers))
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
