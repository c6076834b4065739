//! Application assembly: one client, one coordinator, one prefetch guard,
//! and view factories over the shared cache.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use meterdesk_actions::ActionClient;
use meterdesk_prefetch::{PrefetchConfig, PrefetchGuard, PrefetchOrchestrator, DEFAULT_CHART_DAYS};
use meterdesk_query::{
    spawn_push_consumer, MetricsSnapshot, PushUpdate, QueryConfig, QueryCoordinator,
};
use meterdesk_types::Role;
use meterdesk_views::{
    AgentsView, DashboardView, NotificationsView, ReportsView, SalesView, UsersView,
};

/// The assembled data plane.
///
/// Everything shares one coordinator (and thus one cache); the prefetch
/// guard is injected here so tests can wire a fresh one per scenario while
/// the running app holds a single process-wide guard.
pub struct App {
    client: Arc<dyn ActionClient>,
    coordinator: Arc<QueryCoordinator>,
    guard: Arc<PrefetchGuard>,
    prefetch_config: PrefetchConfig,
}

impl App {
    pub fn new(client: Arc<dyn ActionClient>) -> Self {
        Self::with_configs(
            client,
            QueryConfig::default(),
            PrefetchConfig::default(),
            Arc::new(PrefetchGuard::new()),
        )
    }

    /// Defaults with `METERDESK_*` environment overrides applied.
    pub fn from_env(client: Arc<dyn ActionClient>) -> Self {
        Self::with_configs(
            client,
            QueryConfig::from_env(),
            PrefetchConfig::from_env(),
            Arc::new(PrefetchGuard::new()),
        )
    }

    pub fn with_configs(
        client: Arc<dyn ActionClient>,
        query_config: QueryConfig,
        prefetch_config: PrefetchConfig,
        guard: Arc<PrefetchGuard>,
    ) -> Self {
        Self {
            client,
            coordinator: Arc::new(QueryCoordinator::new(query_config)),
            guard,
            prefetch_config,
        }
    }

    pub fn coordinator(&self) -> &Arc<QueryCoordinator> {
        &self.coordinator
    }

    pub fn client(&self) -> &Arc<dyn ActionClient> {
        &self.client
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.coordinator.metrics().snapshot()
    }

    /// The one-shot startup warmer, sharing this app's guard and cache.
    pub fn orchestrator(&self) -> PrefetchOrchestrator {
        PrefetchOrchestrator::with_config(
            Arc::clone(&self.coordinator),
            Arc::clone(&self.client),
            Arc::clone(&self.guard),
            self.prefetch_config.clone(),
        )
    }

    /// Wire a push channel into the cache. The returned sender goes to the
    /// notification transport; the consumer runs until the channel closes.
    pub fn push_channel(&self, capacity: usize) -> (mpsc::Sender<PushUpdate>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity);
        let handle = spawn_push_consumer(Arc::clone(&self.coordinator), rx);
        (tx, handle)
    }

    pub fn dashboard(&self) -> DashboardView {
        DashboardView::new(
            Arc::clone(&self.client),
            Arc::clone(&self.coordinator),
            self.prefetch_config.chart_days,
        )
    }

    pub fn sales(&self) -> SalesView {
        SalesView::new(Arc::clone(&self.client), Arc::clone(&self.coordinator))
    }

    pub fn agents(&self) -> AgentsView {
        AgentsView::new(Arc::clone(&self.client), Arc::clone(&self.coordinator))
    }

    pub fn reports(&self, viewer: Role) -> ReportsView {
        ReportsView::new(
            Arc::clone(&self.client),
            Arc::clone(&self.coordinator),
            viewer,
        )
    }

    pub fn users(&self) -> UsersView {
        UsersView::new(Arc::clone(&self.client), Arc::clone(&self.coordinator))
    }

    pub fn notifications(&self) -> NotificationsView {
        NotificationsView::new(Arc::clone(&self.client), Arc::clone(&self.coordinator))
    }
}

/// `App::new` but with a zero-delay prefetch and a caller-held guard, for
/// tests and demos that want deterministic warmup timing.
pub fn app_with_guard(client: Arc<dyn ActionClient>, guard: Arc<PrefetchGuard>) -> App {
    App::with_configs(
        client,
        QueryConfig::default(),
        PrefetchConfig {
            warmup_delay: std::time::Duration::ZERO,
            chart_days: DEFAULT_CHART_DAYS,
        },
        guard,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use meterdesk_actions::MemoryActionClient;

    #[tokio::test(start_paused = true)]
    async fn test_views_share_one_cache() {
        let client = Arc::new(MemoryActionClient::new());
        let app = App::new(Arc::clone(&client) as Arc<dyn ActionClient>);

        app.dashboard().load().await;
        app.dashboard().load().await;

        // A second view instance hits the entries the first one warmed.
        assert_eq!(client.calls("sales_chart"), 1);
        assert_eq!(client.calls("inventory_summary"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shared_guard_spans_orchestrator_instances() {
        let client = Arc::new(MemoryActionClient::new());
        let guard = Arc::new(PrefetchGuard::new());
        let app = app_with_guard(Arc::clone(&client) as Arc<dyn ActionClient>, guard);

        app.orchestrator().run_once().await;
        let first = client.total_calls();
        assert!(first > 0);

        // A fresh orchestrator over the same app must not re-run the waves.
        app.orchestrator().run_once().await;
        assert_eq!(client.total_calls(), first);
    }
}
