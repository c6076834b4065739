//! Two-wave prefetch orchestration.
//!
//! The critical wave covers the views a user lands on first (dashboard
//! chart, first sales page, agents, first agent-transaction page, inventory
//! counts); the secondary wave warms the report aggregates. Waves join with
//! settle-all semantics: every task runs to completion, per-task failures
//! are captured and logged, and nothing propagates to the caller.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::time::sleep;
use tracing::{debug, warn};

use meterdesk_actions::ActionClient;
use meterdesk_query::QueryCoordinator;
use meterdesk_types::env::env_var_or;
use meterdesk_types::DayWindow;

use crate::guard::PrefetchGuard;
use crate::specs::{self, QuerySpec, DEFAULT_CHART_DAYS};

/// Orchestration tuning knobs.
#[derive(Debug, Clone)]
pub struct PrefetchConfig {
    /// Pause before the critical wave, so prefetching does not compete with
    /// first-paint work.
    pub warmup_delay: Duration,
    /// Dashboard chart window to warm.
    pub chart_days: u32,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            warmup_delay: Duration::from_millis(500),
            chart_days: DEFAULT_CHART_DAYS,
        }
    }
}

impl PrefetchConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            warmup_delay: Duration::from_millis(env_var_or(
                "METERDESK_WARMUP_MS",
                defaults.warmup_delay.as_millis() as u64,
            )),
            chart_days: env_var_or("METERDESK_CHART_DAYS", defaults.chart_days),
        }
    }
}

/// Issues the speculative fetch waves into the query cache.
pub struct PrefetchOrchestrator {
    coordinator: Arc<QueryCoordinator>,
    client: Arc<dyn ActionClient>,
    guard: Arc<PrefetchGuard>,
    config: PrefetchConfig,
}

impl PrefetchOrchestrator {
    pub fn new(
        coordinator: Arc<QueryCoordinator>,
        client: Arc<dyn ActionClient>,
        guard: Arc<PrefetchGuard>,
    ) -> Self {
        Self::with_config(coordinator, client, guard, PrefetchConfig::default())
    }

    pub fn with_config(
        coordinator: Arc<QueryCoordinator>,
        client: Arc<dyn ActionClient>,
        guard: Arc<PrefetchGuard>,
        config: PrefetchConfig,
    ) -> Self {
        Self {
            coordinator,
            client,
            guard,
            config,
        }
    }

    /// The highest-traffic views, warmed first.
    pub fn critical_wave(&self) -> Vec<QuerySpec> {
        vec![
            specs::sales_chart(&self.client, self.config.chart_days),
            specs::sale_batches(&self.client, 1, None),
            specs::agents(&self.client),
            specs::agent_transactions(&self.client, 1),
            specs::inventory_summary(&self.client),
        ]
    }

    /// Report aggregates, warmed after the critical wave settles.
    pub fn secondary_wave(&self) -> Vec<QuerySpec> {
        vec![
            specs::users(&self.client),
            specs::sales_detail(&self.client, DayWindow::Today),
            specs::sales_detail(&self.client, DayWindow::Yesterday),
            specs::top_sellers(&self.client),
            specs::best_selling(&self.client),
            specs::customer_types(&self.client),
        ]
    }

    /// Run the two waves, at most once per process lifetime.
    ///
    /// Never fails: each task captures its own error, each wave settles
    /// fully, and wave-level failures are only logged. A second invocation
    /// (or a concurrent one) finds the guard spent and returns immediately.
    pub async fn run_once(&self) {
        if !self.guard.try_acquire() {
            debug!("prefetch pass already ran, skipping");
            return;
        }

        sleep(self.config.warmup_delay).await;
        self.settle_wave("critical", self.critical_wave()).await;
        self.settle_wave("secondary", self.secondary_wave()).await;
    }

    async fn settle_wave(&self, wave: &str, specs: Vec<QuerySpec>) {
        let total = specs.len();
        let tasks = specs.into_iter().map(|spec| {
            let coordinator = Arc::clone(&self.coordinator);
            async move {
                let state = coordinator
                    .ensure(spec.key.clone(), spec.fetcher, Some(spec.stale_window))
                    .await;
                match &state.error {
                    Some(err) => {
                        warn!(key = %spec.key, error = %err, "prefetch task failed");
                        false
                    }
                    None => true,
                }
            }
        });

        let settled = join_all(tasks).await;
        let failed = settled.iter().filter(|ok| !**ok).count();
        if failed > 0 {
            warn!(wave, failed, total, "prefetch wave settled with failures");
        } else {
            debug!(wave, total, "prefetch wave settled");
        }
    }
}
