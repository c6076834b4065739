//! Remote action layer seam for meterdesk.
//!
//! The data plane never talks to a transport directly; everything remote
//! goes through the [`ActionClient`] trait, one async method per named
//! operation. [`MemoryActionClient`] is the in-memory reference backend:
//! fixture-driven, failure-scriptable, and counting every call so tests can
//! assert how many remote round-trips a scenario really issued.

pub mod client;
pub mod memory;

pub use client::ActionClient;
pub use memory::{Fixtures, MemoryActionClient};
