//! One-shot guard bounding orchestration to a single pass per process.

use std::sync::atomic::{AtomicBool, Ordering};

/// Owned token recording whether the prefetch pass has happened.
///
/// Constructed once at application start and injected into the orchestrator;
/// mounting the orchestration entry point again (layout re-render, repeated
/// wiring) finds the token spent and does nothing.
#[derive(Debug, Default)]
pub struct PrefetchGuard {
    has_run: AtomicBool,
}

impl PrefetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the single pass. Returns true exactly once.
    pub fn try_acquire(&self) -> bool {
        !self.has_run.swap(true, Ordering::SeqCst)
    }

    pub fn has_run(&self) -> bool {
        self.has_run.load(Ordering::SeqCst)
    }
}
