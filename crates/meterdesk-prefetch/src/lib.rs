//! Speculative prefetch orchestration for the meterdesk data plane.
//!
//! Ahead of user navigation, the orchestrator pushes a prioritized batch of
//! fetches into the query cache: a critical wave (highest-traffic views)
//! followed by a secondary wave (report aggregates). Both waves join with
//! settle-all semantics; prefetching is best effort and never fails the
//! caller. A one-shot guard, owned by the application and injected here,
//! bounds the whole thing to one pass per process lifetime.
//!
//! The [`specs`] module is the single source of (key, fetcher, staleness)
//! triples. Views request data through the same constructors, which is what
//! makes a prefetched entry an exact cache hit later.

pub mod guard;
pub mod orchestrator;
pub mod specs;

pub use guard::PrefetchGuard;
pub use orchestrator::{PrefetchConfig, PrefetchOrchestrator};
pub use specs::{QuerySpec, DEFAULT_CHART_DAYS};
