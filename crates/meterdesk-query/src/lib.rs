//! Query cache and fetch coordination for the meterdesk data plane.
//!
//! This crate provides:
//! - [`QueryKey`]: typed, centralized cache-key construction per logical query
//! - [`QueryCache`]: process-wide key -> state store with synchronous
//!   subscriber notification and retention-based sweeping
//! - [`QueryCoordinator`]: staleness checks, in-flight deduplication, bounded
//!   retry with exponential backoff, and per-key response ordering
//! - [`push`]: an out-of-band channel writer that goes through the same
//!   per-key ordering discipline as fetch responses
//!
//! The coordinator serves fresh cached data without touching the remote
//! layer; anything stale or absent goes through exactly one fetch per key at
//! a time, and a superseded response is dropped rather than allowed to
//! clobber newer data.

pub mod cache;
pub mod config;
pub mod coordinator;
pub mod keys;
pub mod metrics;
pub mod push;
pub mod state;

pub use cache::{CacheEvent, QueryCache, Subscription};
pub use config::QueryConfig;
pub use coordinator::{Fetcher, QueryCoordinator};
pub use keys::{KeyPart, QueryKey};
pub use metrics::{MetricsSnapshot, QueryMetrics};
pub use push::{spawn_push_consumer, PushUpdate};
pub use state::{QueryState, QueryStatus};
