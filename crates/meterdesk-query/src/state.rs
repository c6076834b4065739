//! Per-key cached query state and its lifecycle transitions.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use meterdesk_types::{ActionError, ActionValue};

/// Fetch lifecycle of one cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Created but never fetched.
    Idle,
    /// First fetch in flight, no previous value to show.
    Loading,
    /// Last fetch succeeded; `value` is populated.
    Success,
    /// Last fetch failed; `error` is populated (a stale value may remain).
    Error,
}

/// Cached state for one query key.
///
/// The value is held behind `Arc` so consumers share it read-only with the
/// cache. During a revalidation the previous value stays visible
/// (stale-while-revalidate); `is_fetching` is the only signal that a refresh
/// is underway.
#[derive(Debug, Clone)]
pub struct QueryState {
    pub status: QueryStatus,
    pub value: Option<Arc<ActionValue>>,
    pub error: Option<ActionError>,
    pub fetched_at: Option<Instant>,
    pub stale_at: Option<Instant>,
    pub is_fetching: bool,
    /// Ordinal of the last response applied to this entry. Responses with a
    /// lower ordinal are superseded and must be dropped.
    pub(crate) last_applied_ordinal: u64,
}

impl QueryState {
    pub fn idle() -> Self {
        Self {
            status: QueryStatus::Idle,
            value: None,
            error: None,
            fetched_at: None,
            stale_at: None,
            is_fetching: false,
            last_applied_ordinal: 0,
        }
    }

    /// Fresh means: successful, and the staleness window has not elapsed.
    pub fn is_fresh(&self, now: Instant) -> bool {
        self.status == QueryStatus::Success && self.stale_at.is_some_and(|at| now < at)
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Mark a fetch as started. Only a first-ever fetch shows as `Loading`;
    /// a revalidation keeps the current status and value.
    pub(crate) fn begin_fetch(&mut self) {
        if self.value.is_none() {
            self.status = QueryStatus::Loading;
        }
        self.is_fetching = true;
    }

    pub(crate) fn apply_success(
        &mut self,
        value: Arc<ActionValue>,
        ordinal: u64,
        now: Instant,
        stale_window: Duration,
        still_fetching: bool,
    ) {
        self.status = QueryStatus::Success;
        self.value = Some(value);
        self.error = None;
        self.fetched_at = Some(now);
        self.stale_at = Some(now + stale_window);
        self.is_fetching = still_fetching;
        self.last_applied_ordinal = ordinal;
    }

    /// `now` is recorded as the settle time so errored entries age out of
    /// the cache through the same retention clock as successes.
    pub(crate) fn apply_error(
        &mut self,
        error: ActionError,
        ordinal: u64,
        now: Instant,
        still_fetching: bool,
    ) {
        self.status = QueryStatus::Error;
        self.error = Some(error);
        self.fetched_at = Some(now);
        self.is_fetching = still_fetching;
        self.last_applied_ordinal = ordinal;
    }

    /// Whether `ordinal` is superseded by an already-applied response.
    pub(crate) fn supersedes(&self, ordinal: u64) -> bool {
        ordinal <= self.last_applied_ordinal
    }
}
