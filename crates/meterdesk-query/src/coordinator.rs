//! Fetch coordination: staleness, deduplication, retries, ordering.
//!
//! [`QueryCoordinator::ensure`] is the single read path: fresh cached data
//! is returned without a remote call; anything absent or stale triggers a
//! fetch. Concurrent callers for the same key attach to the one in-flight
//! fetch instead of issuing duplicates. Responses are applied in per-key
//! issue order: each fetch carries a monotonically increasing ordinal and a
//! superseded response is silently dropped (counted, never an error).
//!
//! Fetches run on spawned tasks, so a caller that stops waiting does not
//! cancel the fetch; the result still lands in the cache for future readers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use meterdesk_types::{ActionResult, ActionValue};

use crate::cache::QueryCache;
use crate::config::QueryConfig;
use crate::keys::QueryKey;
use crate::metrics::QueryMetrics;
use crate::state::QueryState;

/// A remote read: cheap to clone, callable once per attempt.
pub type Fetcher = Arc<dyn Fn() -> BoxFuture<'static, ActionResult<ActionValue>> + Send + Sync>;

/// Per-key logic deciding cached-vs-refetch, built on [`QueryCache`].
pub struct QueryCoordinator {
    cache: Arc<QueryCache>,
    config: QueryConfig,
    metrics: QueryMetrics,
    /// One completion channel per key with a fetch in flight.
    in_flight: Mutex<HashMap<QueryKey, broadcast::Sender<()>>>,
    /// Next request ordinal per key (fetches and pushes share the sequence).
    ordinals: Mutex<HashMap<QueryKey, u64>>,
}

impl QueryCoordinator {
    pub fn new(config: QueryConfig) -> Self {
        Self {
            cache: Arc::new(QueryCache::new()),
            config,
            metrics: QueryMetrics::default(),
            in_flight: Mutex::new(HashMap::new()),
            ordinals: Mutex::new(HashMap::new()),
        }
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    pub fn metrics(&self) -> &QueryMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Current cached state for `key`, without triggering anything.
    pub fn read(&self, key: &QueryKey) -> Option<QueryState> {
        self.cache.get(key)
    }

    /// Serve `key` from the cache if fresh, otherwise fetch (attaching to an
    /// in-flight fetch when one exists). Resolves once the entry is settled.
    pub async fn ensure(
        self: &Arc<Self>,
        key: QueryKey,
        fetcher: Fetcher,
        stale_window: Option<Duration>,
    ) -> QueryState {
        self.ensure_inner(key, fetcher, stale_window, false).await
    }

    /// Like [`ensure`](Self::ensure), but bypasses the staleness check. The
    /// previous value stays visible while the refetch is in flight.
    pub async fn revalidate(
        self: &Arc<Self>,
        key: QueryKey,
        fetcher: Fetcher,
        stale_window: Option<Duration>,
    ) -> QueryState {
        self.ensure_inner(key, fetcher, stale_window, true).await
    }

    async fn ensure_inner(
        self: &Arc<Self>,
        key: QueryKey,
        fetcher: Fetcher,
        stale_window: Option<Duration>,
        force: bool,
    ) -> QueryState {
        let now = Instant::now();
        self.sweep_expired(now);

        if !force {
            if let Some(state) = self.cache.get(&key) {
                if state.is_fresh(now) {
                    self.metrics.record_hit();
                    return state;
                }
            }
        }
        self.metrics.record_miss();

        // Dedup: exactly one fetch per key may be in flight. Whoever finds
        // no channel installed becomes the owner and spawns the fetch;
        // everyone else just waits on the owner's completion signal.
        let (rx, owned) = {
            let mut in_flight = self.in_flight.lock();
            match in_flight.get(&key) {
                Some(tx) => (tx.subscribe(), false),
                None => {
                    let (tx, rx) = broadcast::channel(1);
                    in_flight.insert(key.clone(), tx);
                    (rx, true)
                }
            }
        };

        if owned {
            let ordinal = self.next_ordinal(&key);
            let window = stale_window.unwrap_or(self.config.stale_window);
            self.cache.update(&key, QueryState::begin_fetch);
            debug!(key = %key, ordinal, force, "issuing fetch");
            tokio::spawn(Arc::clone(self).run_fetch(key.clone(), fetcher, window, ordinal));
        } else {
            self.metrics.record_dedup_join();
            debug!(key = %key, "attached to in-flight fetch");
        }

        let mut rx = rx;
        // A closed channel means the owner already settled the entry.
        let _ = rx.recv().await;
        self.cache.get(&key).unwrap_or_else(QueryState::idle)
    }

    /// Fetch with bounded retry, apply in ordinal order, signal waiters.
    async fn run_fetch(
        self: Arc<Self>,
        key: QueryKey,
        fetcher: Fetcher,
        stale_window: Duration,
        ordinal: u64,
    ) {
        let mut attempt = 0u32;
        let outcome = loop {
            self.metrics.record_fetch();
            match fetcher().await {
                Ok(value) => break Ok(value),
                Err(err) if attempt < self.config.retry_limit => {
                    let delay = self.config.backoff_delay(attempt);
                    debug!(
                        key = %key,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "fetch failed, backing off"
                    );
                    self.metrics.record_retry();
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => break Err(err),
            }
        };

        self.apply_outcome(&key, outcome, ordinal, stale_window);

        let sender = self.in_flight.lock().remove(&key);
        if let Some(tx) = sender {
            // No receivers is fine: every waiter may have gone away.
            let _ = tx.send(());
        }
    }

    fn apply_outcome(
        &self,
        key: &QueryKey,
        outcome: ActionResult<ActionValue>,
        ordinal: u64,
        stale_window: Duration,
    ) {
        let now = Instant::now();
        let mut dropped = false;
        self.cache.update(key, |state| {
            if state.supersedes(ordinal) {
                // A newer write (out-of-band push) landed first. The entry
                // keeps the newer data; this fetch just winds down.
                state.is_fetching = false;
                dropped = true;
                return;
            }
            match outcome {
                Ok(value) => {
                    state.apply_success(Arc::new(value), ordinal, now, stale_window, false)
                }
                Err(err) => state.apply_error(err, ordinal, now, false),
            }
        });
        if dropped {
            self.metrics.record_stale_drop();
            debug!(key = %key, ordinal, "dropped superseded response");
        }
    }

    /// Apply an out-of-band value (e.g. a pushed notification batch) through
    /// the same per-key ordering discipline as fetch responses.
    pub fn apply_push(
        &self,
        key: &QueryKey,
        value: ActionValue,
        stale_window: Option<Duration>,
    ) -> QueryState {
        let ordinal = self.next_ordinal(key);
        let window = stale_window.unwrap_or(self.config.stale_window);
        let now = Instant::now();
        debug!(key = %key, ordinal, "applying out-of-band update");
        self.cache.update(key, |state| {
            let still_fetching = state.is_fetching;
            state.apply_success(Arc::new(value), ordinal, now, window, still_fetching);
        })
    }

    /// Run a write operation with the same bounded-retry policy as reads.
    /// The final error propagates to the caller so the initiating action can
    /// react; nothing is cached.
    pub async fn mutate(&self, op: &str, run: Fetcher) -> ActionResult<ActionValue> {
        self.metrics.record_mutation();
        let mut attempt = 0u32;
        loop {
            match run().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.config.retry_limit => {
                    let delay = self.config.backoff_delay(attempt);
                    warn!(op, attempt, error = %err, "mutation failed, retrying after backoff");
                    self.metrics.record_retry();
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Reclaim expired unobserved entries now.
    pub fn sweep(&self) {
        self.sweep_expired(Instant::now());
    }

    fn sweep_expired(&self, now: Instant) {
        let removed = self.cache.sweep(now, self.config.retention);
        if !removed.is_empty() {
            self.metrics.record_evictions(removed.len() as u64);
            let mut ordinals = self.ordinals.lock();
            for key in &removed {
                ordinals.remove(key);
            }
        }
    }

    fn next_ordinal(&self, key: &QueryKey) -> u64 {
        let mut ordinals = self.ordinals.lock();
        let counter = ordinals.entry(key.clone()).or_insert(0);
        *counter += 1;
        *counter
    }
}
