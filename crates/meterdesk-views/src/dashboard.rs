//! Dashboard page data: sales chart plus inventory summary.

use std::sync::Arc;

use meterdesk_actions::ActionClient;
use meterdesk_prefetch::specs;
use meterdesk_query::QueryCoordinator;
use meterdesk_types::{ActionError, ActionValue, ChartPoint, InventorySummary};

use crate::compose::{any_fetching, any_loading, first_error, run_spec};

pub struct DashboardView {
    client: Arc<dyn ActionClient>,
    coordinator: Arc<QueryCoordinator>,
    chart_days: u32,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardModel {
    pub chart: Vec<ChartPoint>,
    pub inventory: InventorySummary,
    pub is_loading: bool,
    pub is_fetching: bool,
    pub error: Option<ActionError>,
}

impl DashboardView {
    pub fn new(
        client: Arc<dyn ActionClient>,
        coordinator: Arc<QueryCoordinator>,
        chart_days: u32,
    ) -> Self {
        Self {
            client,
            coordinator,
            chart_days,
        }
    }

    /// Cache-first load of both dashboard sources.
    pub async fn load(&self) -> DashboardModel {
        self.assemble(false).await
    }

    /// Forced revalidation; cached values stay visible while in flight.
    pub async fn refetch(&self) -> DashboardModel {
        self.assemble(true).await
    }

    async fn assemble(&self, force: bool) -> DashboardModel {
        let (chart, inventory) = tokio::join!(
            run_spec(
                &self.coordinator,
                specs::sales_chart(&self.client, self.chart_days),
                force,
            ),
            run_spec(
                &self.coordinator,
                specs::inventory_summary(&self.client),
                force,
            ),
        );

        DashboardModel {
            chart: chart
                .value
                .as_deref()
                .and_then(ActionValue::as_sales_chart)
                .map(<[ChartPoint]>::to_vec)
                .unwrap_or_default(),
            inventory: inventory
                .value
                .as_deref()
                .and_then(ActionValue::as_inventory)
                .cloned()
                .unwrap_or_default(),
            is_loading: any_loading(&[&chart, &inventory]),
            is_fetching: any_fetching(&[&chart, &inventory]),
            error: first_error(&[&chart, &inventory]),
        }
    }
}
