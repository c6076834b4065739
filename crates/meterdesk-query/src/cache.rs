//! Process-wide query cache.
//!
//! A pure associative store from [`QueryKey`] to [`QueryState`]: no fetch
//! logic, no staleness decisions. Observers subscribed to a key are notified
//! synchronously on every write or removal. Entries with no observers and no
//! pending fetch are reclaimed by [`QueryCache::sweep`] once their retention
//! window has passed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::time::Instant;

use crate::keys::QueryKey;
use crate::state::QueryState;

/// What happened to a cache entry, as seen by an observer.
#[derive(Debug, Clone, Copy)]
pub enum CacheEvent<'a> {
    Updated(&'a QueryState),
    Removed,
}

type Observer = Arc<dyn Fn(CacheEvent<'_>) + Send + Sync>;

/// In-memory cache shared by the coordinator, the prefetcher and the views.
///
/// Thread-safe via internal locks; data loss on restart is acceptable (the
/// cache is a performance layer, not a system of record).
#[derive(Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, QueryState>>,
    observers: Mutex<HashMap<QueryKey, Vec<(u64, Observer)>>>,
    next_observer_id: AtomicU64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &QueryKey) -> Option<QueryState> {
        self.entries.read().get(key).cloned()
    }

    /// Insert or replace the state for `key`, notifying observers.
    pub fn set(&self, key: QueryKey, state: QueryState) {
        let snapshot = state.clone();
        self.entries.write().insert(key.clone(), state);
        self.notify(&key, CacheEvent::Updated(&snapshot));
    }

    /// Mutate the state for `key` in place (inserting an idle entry first if
    /// absent), notify observers, and return the updated state.
    pub fn update(&self, key: &QueryKey, f: impl FnOnce(&mut QueryState)) -> QueryState {
        let snapshot = {
            let mut entries = self.entries.write();
            let state = entries.entry(key.clone()).or_insert_with(QueryState::idle);
            f(state);
            state.clone()
        };
        self.notify(key, CacheEvent::Updated(&snapshot));
        snapshot
    }

    pub fn remove(&self, key: &QueryKey) -> Option<QueryState> {
        let removed = self.entries.write().remove(key);
        if removed.is_some() {
            self.notify(key, CacheEvent::Removed);
        }
        removed
    }

    /// Subscribe to changes of one key. Dropping the returned subscription
    /// unsubscribes.
    pub fn subscribe(
        self: &Arc<Self>,
        key: &QueryKey,
        observer: impl Fn(CacheEvent<'_>) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.next_observer_id.fetch_add(1, Ordering::Relaxed);
        self.observers
            .lock()
            .entry(key.clone())
            .or_default()
            .push((id, Arc::new(observer)));
        Subscription {
            cache: Arc::clone(self),
            key: key.clone(),
            id,
        }
    }

    pub fn observer_count(&self, key: &QueryKey) -> usize {
        self.observers.lock().get(key).map_or(0, Vec::len)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Remove entries whose retention window has elapsed, provided nobody is
    /// observing them and no fetch is pending. Returns the removed keys so
    /// the coordinator can drop its per-key bookkeeping.
    pub fn sweep(&self, now: Instant, retention: Duration) -> Vec<QueryKey> {
        let mut removed = Vec::new();
        {
            let observers = self.observers.lock();
            let mut entries = self.entries.write();
            entries.retain(|key, state| {
                if state.is_fetching {
                    return true;
                }
                if observers.get(key).is_some_and(|obs| !obs.is_empty()) {
                    return true;
                }
                let expired = match state.fetched_at {
                    Some(at) => now >= at + retention,
                    // Never-fetched entries hold nothing worth keeping.
                    None => true,
                };
                if expired {
                    removed.push(key.clone());
                }
                !expired
            });
        }
        for key in &removed {
            self.notify(key, CacheEvent::Removed);
        }
        removed
    }

    /// Synchronous notification; observer callbacks run outside the entry
    /// lock so they may read the cache.
    fn notify(&self, key: &QueryKey, event: CacheEvent<'_>) {
        let observers: Vec<Observer> = self
            .observers
            .lock()
            .get(key)
            .map(|obs| obs.iter().map(|(_, o)| Arc::clone(o)).collect())
            .unwrap_or_default();
        for observer in observers {
            observer(event);
        }
    }

    fn unsubscribe(&self, key: &QueryKey, id: u64) {
        let mut observers = self.observers.lock();
        if let Some(list) = observers.get_mut(key) {
            list.retain(|(entry_id, _)| *entry_id != id);
            if list.is_empty() {
                observers.remove(key);
            }
        }
    }
}

/// Active observation of one key; unsubscribes on drop.
pub struct Subscription {
    cache: Arc<QueryCache>,
    key: QueryKey,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cache.unsubscribe(&self.key, self.id);
    }
}
