// crates/engine/src/subscriber.rs
//! Subscriber registration for loved-set change notification

use lovedlist_core::LovedSet;
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Callback invoked with a snapshot of the full loved set on every change
pub type SubscriberCallback = Arc<dyn Fn(&LovedSet) + Send + Sync>;

/// Registered callbacks, keyed by a monotonically increasing ID.
///
/// Lives for the lifetime of the engine instance; screens register on
/// mount and deregister through their [`Subscription`] handle on unmount.
#[derive(Default)]
pub(crate) struct SubscriberList {
    next_id: u64,
    entries: Vec<(u64, SubscriberCallback)>,
}

impl SubscriberList {
    pub(crate) fn add(&mut self, callback: SubscriberCallback) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Clones the callbacks so they can be invoked outside any lock
    pub(crate) fn snapshot(&self) -> Vec<SubscriberCallback> {
        self.entries.iter().map(|(_, cb)| cb.clone()).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Handle returned by `subscribe`; deregistration is explicit.
///
/// Dropping the handle without calling [`unsubscribe`] leaves the
/// callback registered until the engine itself is torn down.
///
/// [`unsubscribe`]: Subscription::unsubscribe
pub struct Subscription {
    id: u64,
    list: Weak<Mutex<SubscriberList>>,
}

impl Subscription {
    pub(crate) fn new(id: u64, list: Weak<Mutex<SubscriberList>>) -> Self {
        Self { id, list }
    }

    /// Removes the callback; returns true if it was still registered
    pub fn unsubscribe(self) -> bool {
        match self.list.upgrade() {
            Some(list) => {
                let mut list = list.lock().unwrap_or_else(PoisonError::into_inner);
                list.remove(self.id)
            }
            // Engine already torn down
            None => false,
        }
    }
}
