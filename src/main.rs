//! Demo binary: wire the data plane over the in-memory backend, run the
//! startup prefetch, load every page once, and print the cache metrics.
//!
//! Intended as a smoke-run and a wiring reference; a real deployment swaps
//! [`MemoryActionClient`] for an `ActionClient` over an actual transport.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use meterdesk::{App, Fixtures, MemoryActionClient, QueryKey, Role};
use meterdesk_query::PushUpdate;
use meterdesk_types::{
    ActionValue, Agent, ChartPoint, CustomerTypeSlice, EarningsSummary, InventorySummary, NewSale,
    Notification, ProductCount, SaleBatch, SellerRow, User,
};

fn demo_fixtures() -> Fixtures {
    Fixtures {
        chart: (1..=7)
            .map(|d| ChartPoint {
                label: format!("2026-08-{d:02}"),
                total: 120.0 * d as f64,
            })
            .collect(),
        sale_batches: (0..12)
            .map(|i| SaleBatch {
                id: i + 1,
                product: if i % 3 == 0 {
                    "three-phase meter"
                } else {
                    "single-phase meter"
                }
                .to_string(),
                quantity: 1 + (i as u32 % 4),
                unit_price: 30.0,
                seller: if i % 2 == 0 { "ama" } else { "kofi" }.to_string(),
                customer_type: "landlord".to_string(),
                created_at: Utc::now(),
            })
            .collect(),
        agents: vec![Agent {
            id: 1,
            name: "kofi".to_string(),
            phone: "0244-000-111".to_string(),
            balance: 150.0,
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
        top_sellers: vec![
            SellerRow {
                user_name: "ama".to_string(),
                total_sales: "410.50".to_string(),
            },
            SellerRow {
                user_name: "kofi".to_string(),
                total_sales: "220.00".to_string(),
            },
        ],
        best_selling: vec![ProductCount {
            product: "single-phase meter".to_string(),
            count: 9,
        }],
        customer_types: vec![CustomerTypeSlice {
            customer_type: "landlord".to_string(),
            count: 12,
        }],
        earnings: EarningsSummary {
            total_earnings: 12_500.0,
            this_month: 1_800.0,
            commission_owed: 240.0,
        },
        ..Fixtures::default()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    meterdesk::logging::init();

    let client = Arc::new(MemoryActionClient::with_fixtures(demo_fixtures()));
    let app = App::from_env(Arc::clone(&client) as Arc<dyn meterdesk::ActionClient>);

    app.orchestrator().run_once().await;
    info!(calls = client.total_calls(), "prefetch waves settled");

    let dashboard = app.dashboard().load().await;
    info!(
        points = dashboard.chart.len(),
        in_stock = dashboard.inventory.in_stock,
        "dashboard loaded"
    );

    let reports = app.reports(Role::Admin).load().await;
    info!(
        sellers = reports.seller_totals.len(),
        earnings = reports.earnings.map(|e| e.total_earnings),
        "reports loaded"
    );

    let batch = app
        .sales()
        .record_sale(NewSale {
            product: "three-phase meter".to_string(),
            quantity: 2,
            unit_price: 55.0,
            seller: "ama".to_string(),
            customer_type: "estate".to_string(),
        })
        .await?;
    info!(id = batch.id, "sale recorded");

    // Out-of-band path: a pushed notification lands in the cache without a
    // remote call.
    let (push_tx, push_handle) = app.push_channel(8);
    push_tx
        .send(PushUpdate {
            key: QueryKey::notifications(),
            value: ActionValue::Notifications(vec![Notification {
                id: uuid::Uuid::new_v4(),
                message: "low stock: single-phase meter".to_string(),
                created_at: Utc::now(),
            }]),
        })
        .await?;
    drop(push_tx);
    push_handle.await?;
    let notifications = app.notifications().peek();
    info!(count = notifications.notifications.len(), "notifications after push");

    println!(
        "{}",
        serde_json::to_string_pretty(&app.metrics())?
    );
    Ok(())
}
