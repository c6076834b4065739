//! Shared fixtures for the cross-crate integration suite.

use std::sync::Arc;

use chrono::Utc;

use meterdesk_actions::{Fixtures, MemoryActionClient};
use meterdesk_types::{
    Agent, AgentTransaction, ChartPoint, CustomerTypeSlice, EarningsSummary, InventorySummary,
    ProductCount, Role, SaleBatch, SaleDetail, SellerRow, User,
};

pub fn sale_batch(id: u64, seller: &str) -> SaleBatch {
    SaleBatch {
        id,
        product: "single-phase meter".to_string(),
        quantity: 1,
        unit_price: 30.0,
        seller: seller.to_string(),
        customer_type: "landlord".to_string(),
        created_at: Utc::now(),
    }
}

/// One row in every fixture table, so any operation returns data.
pub fn standard_fixtures() -> Fixtures {
    Fixtures {
        chart: vec![ChartPoint {
            label: "2026-08-28".to_string(),
            total: 360.0,
        }],
        sale_batches: vec![sale_batch(1, "ama"), sale_batch(2, "kofi")],
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
        sales_today: vec![SaleDetail {
            product: "single-phase meter".to_string(),
            quantity: 2,
            amount: 60.0,
            seller: "ama".to_string(),
            sold_at: Utc::now(),
        }],
        sales_yesterday: vec![SaleDetail {
            product: "three-phase meter".to_string(),
            quantity: 1,
            amount: 55.0,
            seller: "kofi".to_string(),
            sold_at: Utc::now(),
        }],
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

pub fn seeded_client() -> Arc<MemoryActionClient> {
    Arc::new(MemoryActionClient::with_fixtures(standard_fixtures()))
}
