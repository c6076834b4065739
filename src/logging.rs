//! Tracing subscriber setup for binaries and integration tests.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber, honoring `RUST_LOG`. Defaults to `info`
/// for this workspace and `warn` for everything else. Safe to call more
/// than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,meterdesk=info"));
    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
