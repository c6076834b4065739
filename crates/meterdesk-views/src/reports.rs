//! Reports page data: seller totals, product and customer breakdowns,
//! today/yesterday detail, and the admin-only earnings summary.

use std::sync::Arc;

use meterdesk_actions::ActionClient;
use meterdesk_prefetch::specs;
use meterdesk_query::{QueryCoordinator, QueryState};
use meterdesk_types::{
    ActionError, ActionValue, CustomerTypeSlice, DayWindow, EarningsSummary, ProductCount, Role,
    SaleDetail, SellerRow, SellerTotal,
};

use crate::aggregate::{best_product, seller_totals};
use crate::compose::{any_fetching, any_loading, first_error, run_spec};

pub struct ReportsView {
    client: Arc<dyn ActionClient>,
    coordinator: Arc<QueryCoordinator>,
    viewer: Role,
}

#[derive(Debug, Clone, Default)]
pub struct ReportsModel {
    pub seller_totals: Vec<SellerTotal>,
    pub top_sellers: Vec<SellerRow>,
    pub best_selling: Vec<ProductCount>,
    pub customer_types: Vec<CustomerTypeSlice>,
    pub today: Vec<SaleDetail>,
    pub yesterday: Vec<SaleDetail>,
    /// Populated for admin viewers only.
    pub earnings: Option<EarningsSummary>,
    pub is_loading: bool,
    pub is_fetching: bool,
    pub error: Option<ActionError>,
}

impl ReportsModel {
    /// Headline product for the best-selling card.
    pub fn best_product(&self) -> Option<&ProductCount> {
        best_product(&self.best_selling)
    }
}

impl ReportsView {
    pub fn new(
        client: Arc<dyn ActionClient>,
        coordinator: Arc<QueryCoordinator>,
        viewer: Role,
    ) -> Self {
        Self {
            client,
            coordinator,
            viewer,
        }
    }

    pub async fn load(&self) -> ReportsModel {
        self.assemble(false).await
    }

    pub async fn refetch(&self) -> ReportsModel {
        self.assemble(true).await
    }

    async fn assemble(&self, force: bool) -> ReportsModel {
        let (top_sellers, best_selling, customer_types, today, yesterday) = tokio::join!(
            run_spec(&self.coordinator, specs::top_sellers(&self.client), force),
            run_spec(&self.coordinator, specs::best_selling(&self.client), force),
            run_spec(&self.coordinator, specs::customer_types(&self.client), force),
            run_spec(
                &self.coordinator,
                specs::sales_detail(&self.client, DayWindow::Today),
                force,
            ),
            run_spec(
                &self.coordinator,
                specs::sales_detail(&self.client, DayWindow::Yesterday),
                force,
            ),
        );

        // The earnings query is only issued for admins; a disabled query
        // contributes nothing to loading or error state.
        let earnings: Option<QueryState> = if self.viewer.is_admin() {
            Some(run_spec(&self.coordinator, specs::earnings(&self.client), force).await)
        } else {
            None
        };

        let mut states = vec![
            &top_sellers,
            &best_selling,
            &customer_types,
            &today,
            &yesterday,
        ];
        if let Some(state) = earnings.as_ref() {
            states.push(state);
        }

        let raw_sellers = top_sellers
            .value
            .as_deref()
            .and_then(ActionValue::as_top_sellers)
            .unwrap_or_default();

        ReportsModel {
            seller_totals: seller_totals(raw_sellers),
            top_sellers: raw_sellers.to_vec(),
            best_selling: best_selling
                .value
                .as_deref()
                .and_then(ActionValue::as_best_selling)
                .map(<[ProductCount]>::to_vec)
                .unwrap_or_default(),
            customer_types: customer_types
                .value
                .as_deref()
                .and_then(ActionValue::as_customer_types)
                .map(<[CustomerTypeSlice]>::to_vec)
                .unwrap_or_default(),
            today: today
                .value
                .as_deref()
                .and_then(ActionValue::as_sales_detail)
                .map(<[SaleDetail]>::to_vec)
                .unwrap_or_default(),
            yesterday: yesterday
                .value
                .as_deref()
                .and_then(ActionValue::as_sales_detail)
                .map(<[SaleDetail]>::to_vec)
                .unwrap_or_default(),
            earnings: earnings.as_ref().and_then(|state| {
                state
                    .value
                    .as_deref()
                    .and_then(ActionValue::as_earnings)
                    .cloned()
            }),
            is_loading: any_loading(&states),
            is_fetching: any_fetching(&states),
            error: first_error(&states),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meterdesk_actions::{Fixtures, MemoryActionClient};
    use meterdesk_query::QueryConfig;

    fn seeded() -> Arc<MemoryActionClient> {
        Arc::new(MemoryActionClient::with_fixtures(Fixtures {
            top_sellers: vec![
                SellerRow {
                    user_name: "ama".to_string(),
                    total_sales: "10".to_string(),
                },
                SellerRow {
                    user_name: "kofi".to_string(),
                    total_sales: "5".to_string(),
                },
                SellerRow {
                    user_name: "ama".to_string(),
                    total_sales: "3".to_string(),
                },
            ],
            best_selling: vec![
                ProductCount {
                    product: "three-phase meter".to_string(),
                    count: 4,
                },
                ProductCount {
                    product: "single-phase meter".to_string(),
                    count: 9,
                },
            ],
            earnings: EarningsSummary {
                total_earnings: 12_500.0,
                this_month: 1_800.0,
                commission_owed: 240.0,
            },
            ..Fixtures::default()
        }))
    }

    fn view(client: &Arc<MemoryActionClient>, viewer: Role) -> ReportsView {
        ReportsView::new(
            Arc::clone(client) as Arc<dyn ActionClient>,
            Arc::new(QueryCoordinator::new(QueryConfig::default())),
            viewer,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_admin_gets_earnings_and_derived_totals() {
        let client = seeded();
        let model = view(&client, Role::Admin).load().await;

        assert_eq!(
            model.seller_totals,
            vec![
                SellerTotal {
                    user_name: "ama".to_string(),
                    total_sales: 13.0,
                },
                SellerTotal {
                    user_name: "kofi".to_string(),
                    total_sales: 5.0,
                },
            ]
        );
        assert_eq!(
            model.earnings.as_ref().map(|e| e.total_earnings),
            Some(12_500.0)
        );
        assert_eq!(
            model.best_product().map(|p| p.product.as_str()),
            Some("single-phase meter")
        );
        assert_eq!(client.calls("earnings"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_admin_never_issues_earnings() {
        let client = seeded();
        let model = view(&client, Role::User).load().await;

        assert!(model.earnings.is_none());
        assert!(!model.is_loading);
        assert!(model.error.is_none());
        assert_eq!(client.calls("earnings"), 0);
        assert_eq!(client.calls("top_sellers"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_earnings_failure_cannot_surface() {
        let client = seeded();
        client.fail_with("earnings", ActionError::Rejected("forbidden".to_string()));

        let model = view(&client, Role::User).load().await;
        assert!(model.error.is_none());
        assert_eq!(client.calls("earnings"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_both_day_windows_are_separate_queries() {
        let client = seeded();
        view(&client, Role::User).load().await;
        assert_eq!(client.calls("sales_detail"), 2);
    }
}
