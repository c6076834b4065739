//! End-to-end warm start: run the prefetch waves, then load every page and
//! assert the cache serves them without further remote traffic.

use std::sync::Arc;

use chrono::Utc;

use meterdesk::app::app_with_guard;
use meterdesk::{ActionClient, Fixtures, MemoryActionClient, PrefetchGuard, Role};
use meterdesk_types::{
    Agent, AgentTransaction, ChartPoint, InventorySummary, SaleBatch, SellerRow, User,
};

fn fixtures() -> Fixtures {
    Fixtures {
        chart: vec![ChartPoint {
            label: "2026-08-28".to_string(),
            total: 360.0,
        }],
        sale_batches: vec![SaleBatch {
            id: 1,
            product: "single-phase meter".to_string(),
            quantity: 2,
            unit_price: 30.0,
            seller: "ama".to_string(),
            customer_type: "landlord".to_string(),
            created_at: Utc::now(),
        }],
        agents: vec![Agent {
            id: 1,
            name: "kofi".to_string(),
            phone: "0244-000-111".to_string(),
            balance: 150.0,
        }],
        agent_transactions: vec![AgentTransaction {
            id: 1,
            agent_name: "kofi".to_string(),
            amount: 20.0,
            kind: "top-up".to_string(),
            created_at: Utc::now(),
        }],
        inventory: InventorySummary {
            total_meters: 500,
            in_stock: 320,
            sold: 175,
            faulty: 5,
        },
        users: vec![User {
            id: 1,
            name: "ama".to_string(),
            email: "ama@example.com".to_string(),
            role: Role::Admin,
        }],
        top_sellers: vec![SellerRow {
            user_name: "ama".to_string(),
            total_sales: "360".to_string(),
        }],
        ..Fixtures::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_warmed_cache_serves_every_page_without_remote_calls() {
    meterdesk::logging::init();
    let client = Arc::new(MemoryActionClient::with_fixtures(fixtures()));
    let app = app_with_guard(
        Arc::clone(&client) as Arc<dyn ActionClient>,
        Arc::new(PrefetchGuard::new()),
    );

    app.orchestrator().run_once().await;
    let warmed = client.total_calls();
    assert_eq!(warmed, 11);

    let dashboard = app.dashboard().load().await;
    let sales = app.sales().load().await;
    let agents = app.agents().load().await;
    let reports = app.reports(Role::User).load().await;
    let users = app.users().load().await;

    assert_eq!(dashboard.chart.len(), 1);
    assert_eq!(sales.batches.items.len(), 1);
    assert_eq!(agents.agents.len(), 1);
    assert_eq!(reports.seller_totals.len(), 1);
    assert_eq!(users.users.len(), 1);

    // Every page was served from the warmed cache.
    assert_eq!(client.total_calls(), warmed);

    let metrics = app.metrics();
    assert_eq!(metrics.fetches, warmed);
    assert!(metrics.cache_hits >= 11);
}

#[tokio::test(start_paused = true)]
async fn test_admin_earnings_is_the_only_cold_query_after_warmup() {
    let client = Arc::new(MemoryActionClient::with_fixtures(fixtures()));
    let app = app_with_guard(
        Arc::clone(&client) as Arc<dyn ActionClient>,
        Arc::new(PrefetchGuard::new()),
    );

    app.orchestrator().run_once().await;
    let warmed = client.total_calls();

    // Earnings is admin-gated and deliberately outside both waves.
    let reports = app.reports(Role::Admin).load().await;
    assert!(reports.earnings.is_some());
    assert_eq!(client.total_calls(), warmed + 1);
    assert_eq!(client.calls("earnings"), 1);
}
