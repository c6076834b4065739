//! Coordinator metrics (thread-safe counters).

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters for cache traffic and fetch behavior.
#[derive(Debug, Clone, Default)]
pub struct QueryMetrics {
    /// Reads served fresh from the cache without a remote call.
    pub cache_hits: Arc<AtomicU64>,
    /// Reads that had to go remote (absent or stale).
    pub cache_misses: Arc<AtomicU64>,
    /// Remote fetches actually issued (retries included).
    pub fetches: Arc<AtomicU64>,
    /// Callers that attached to an in-flight fetch instead of issuing one.
    pub dedup_joins: Arc<AtomicU64>,
    /// Retry attempts after a failed fetch.
    pub retries: Arc<AtomicU64>,
    /// Superseded responses dropped by the per-key ordering discipline.
    pub stale_drops: Arc<AtomicU64>,
    /// Entries reclaimed by retention sweeps.
    pub evictions: Arc<AtomicU64>,
    /// Mutations executed.
    pub mutations: Arc<AtomicU64>,
}

impl QueryMetrics {
    pub fn record_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch(&self) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dedup_join(&self) {
        self.dedup_joins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_drop(&self) {
        self.stale_drops.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_evictions(&self, n: u64) {
        self.evictions.fetch_add(n, Ordering::Relaxed);
    }

    pub fn record_mutation(&self) {
        self.mutations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            fetches: self.fetches.load(Ordering::Relaxed),
            dedup_joins: self.dedup_joins.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            stale_drops: self.stale_drops.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            mutations: self.mutations.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub fetches: u64,
    pub dedup_joins: u64,
    pub retries: u64,
    pub stale_drops: u64,
    pub evictions: u64,
    pub mutations: u64,
}
