//! Coordinator tuning knobs.

use std::time::Duration;

use meterdesk_types::env::env_var_or;

/// Timing and retry configuration for the query coordinator.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Default staleness window when a query spec does not name its own.
    pub stale_window: Duration,
    /// How long an unobserved, idle entry stays cached after its last fetch.
    pub retention: Duration,
    /// Retries after the first failed attempt (reads and mutations alike).
    pub retry_limit: u32,
    /// First backoff delay; doubles per attempt.
    pub backoff_base: Duration,
    /// Upper bound on the backoff delay.
    pub backoff_cap: Duration,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stale_window: Duration::from_secs(60),
            retention: Duration::from_secs(300),
            retry_limit: 1,
            backoff_base: Duration::from_millis(500),
            backoff_cap: Duration::from_secs(30),
        }
    }
}

impl QueryConfig {
    /// Defaults with `METERDESK_*` environment overrides applied.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            stale_window: Duration::from_millis(env_var_or(
                "METERDESK_STALE_MS",
                defaults.stale_window.as_millis() as u64,
            )),
            retention: Duration::from_millis(env_var_or(
                "METERDESK_RETENTION_MS",
                defaults.retention.as_millis() as u64,
            )),
            retry_limit: env_var_or("METERDESK_RETRY_LIMIT", defaults.retry_limit),
            backoff_base: Duration::from_millis(env_var_or(
                "METERDESK_BACKOFF_BASE_MS",
                defaults.backoff_base.as_millis() as u64,
            )),
            backoff_cap: Duration::from_millis(env_var_or(
                "METERDESK_BACKOFF_CAP_MS",
                defaults.backoff_cap.as_millis() as u64,
            )),
        }
    }

    /// Backoff for a given zero-based attempt: base doubling, capped.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.backoff_base
            .saturating_mul(factor)
            .min(self.backoff_cap)
    }
}
