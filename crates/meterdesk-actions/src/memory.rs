//! In-memory reference backend for the action layer.
//!
//! Serves fixture rows from process memory, counts every call per
//! operation, and can be scripted to fail a given operation. Used by the
//! facade's demo wiring and by the integration tests, which lean on the
//! call counters to prove how many remote round-trips a scenario issued.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use meterdesk_types::{
    ActionError, ActionResult, Agent, AgentTransaction, ChartPoint, CustomerTypeSlice, DayWindow,
    EarningsSummary, InventorySummary, NewSale, Notification, Page, ProductCount, SaleBatch,
    SaleDetail, SellerRow, User,
};

use crate::client::ActionClient;

const PAGE_SIZE: usize = 10;

/// Fixture rows served by [`MemoryActionClient`].
#[derive(Debug, Default, Clone)]
pub struct Fixtures {
    pub chart: Vec<ChartPoint>,
    pub sale_batches: Vec<SaleBatch>,
    pub agents: Vec<Agent>,
    pub agent_transactions: Vec<AgentTransaction>,
    pub inventory: InventorySummary,
    pub users: Vec<User>,
    pub sales_today: Vec<SaleDetail>,
    pub sales_yesterday: Vec<SaleDetail>,
    pub top_sellers: Vec<SellerRow>,
    pub best_selling: Vec<ProductCount>,
    pub customer_types: Vec<CustomerTypeSlice>,
    pub earnings: EarningsSummary,
    pub notifications: Vec<Notification>,
}

/// Fixture-backed [`ActionClient`] with per-operation call counters and
/// scriptable failures.
#[derive(Default)]
pub struct MemoryActionClient {
    fixtures: RwLock<Fixtures>,
    calls: Mutex<HashMap<&'static str, u64>>,
    failures: Mutex<HashMap<&'static str, ActionError>>,
}

impl MemoryActionClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fixtures(fixtures: Fixtures) -> Self {
        Self {
            fixtures: RwLock::new(fixtures),
            ..Self::default()
        }
    }

    /// Replace the fixture set wholesale.
    pub fn set_fixtures(&self, fixtures: Fixtures) {
        *self.fixtures.write() = fixtures;
    }

    /// Mutate fixtures in place (e.g. append rows between view loads).
    pub fn update_fixtures(&self, f: impl FnOnce(&mut Fixtures)) {
        f(&mut self.fixtures.write());
    }

    /// Make every subsequent call to `op` fail with `err` until cleared.
    /// Operation names match the `ActionClient` method names.
    pub fn fail_with(&self, op: &'static str, err: ActionError) {
        self.failures.lock().insert(op, err);
    }

    pub fn clear_failure(&self, op: &str) {
        self.failures.lock().remove(op);
    }

    /// How many times `op` has been called.
    pub fn calls(&self, op: &str) -> u64 {
        self.calls.lock().get(op).copied().unwrap_or(0)
    }

    /// Total calls across all operations.
    pub fn total_calls(&self) -> u64 {
        self.calls.lock().values().sum()
    }

    fn record(&self, op: &'static str) -> ActionResult<()> {
        *self.calls.lock().entry(op).or_insert(0) += 1;
        match self.failures.lock().get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn paginate<T: Clone>(rows: &[T], page: u32) -> Page<T> {
        let page = page.max(1);
        let start = (page as usize - 1) * PAGE_SIZE;
        let items: Vec<T> = rows.iter().skip(start).take(PAGE_SIZE).cloned().collect();
        Page {
            items,
            page,
            total_pages: rows.len().div_ceil(PAGE_SIZE) as u32,
            total_items: rows.len() as u64,
        }
    }
}

#[async_trait]
impl ActionClient for MemoryActionClient {
    async fn sales_chart(&self, days: u32) -> ActionResult<Vec<ChartPoint>> {
        self.record("sales_chart")?;
        let chart = &self.fixtures.read().chart;
        let take = (days as usize).min(chart.len());
        Ok(chart[chart.len() - take..].to_vec())
    }

    async fn sale_batches(&self, page: u32, seller: Option<String>) -> ActionResult<Page<SaleBatch>> {
        self.record("sale_batches")?;
        let fixtures = self.fixtures.read();
        match seller {
            Some(name) => {
                let rows: Vec<SaleBatch> = fixtures
                    .sale_batches
                    .iter()
                    .filter(|b| b.seller == name)
                    .cloned()
                    .collect();
                Ok(Self::paginate(&rows, page))
            }
            None => Ok(Self::paginate(&fixtures.sale_batches, page)),
        }
    }

    async fn agents(&self) -> ActionResult<Vec<Agent>> {
        self.record("agents")?;
        Ok(self.fixtures.read().agents.clone())
    }

    async fn agent_transactions(&self, page: u32) -> ActionResult<Page<AgentTransaction>> {
        self.record("agent_transactions")?;
        Ok(Self::paginate(&self.fixtures.read().agent_transactions, page))
    }

    async fn inventory_summary(&self) -> ActionResult<InventorySummary> {
        self.record("inventory_summary")?;
        Ok(self.fixtures.read().inventory.clone())
    }

    async fn users(&self) -> ActionResult<Vec<User>> {
        self.record("users")?;
        Ok(self.fixtures.read().users.clone())
    }

    async fn sales_detail(&self, window: DayWindow) -> ActionResult<Vec<SaleDetail>> {
        self.record("sales_detail")?;
        let fixtures = self.fixtures.read();
        Ok(match window {
            DayWindow::Today => fixtures.sales_today.clone(),
            DayWindow::Yesterday => fixtures.sales_yesterday.clone(),
        })
    }

    async fn top_sellers(&self) -> ActionResult<Vec<SellerRow>> {
        self.record("top_sellers")?;
        Ok(self.fixtures.read().top_sellers.clone())
    }

    async fn best_selling(&self) -> ActionResult<Vec<ProductCount>> {
        self.record("best_selling")?;
        Ok(self.fixtures.read().best_selling.clone())
    }

    async fn customer_types(&self) -> ActionResult<Vec<CustomerTypeSlice>> {
        self.record("customer_types")?;
        Ok(self.fixtures.read().customer_types.clone())
    }

    async fn earnings(&self) -> ActionResult<EarningsSummary> {
        self.record("earnings")?;
        Ok(self.fixtures.read().earnings.clone())
    }

    async fn notifications(&self) -> ActionResult<Vec<Notification>> {
        self.record("notifications")?;
        Ok(self.fixtures.read().notifications.clone())
    }

    async fn record_sale(&self, sale: NewSale) -> ActionResult<SaleBatch> {
        self.record("record_sale")?;
        let mut fixtures = self.fixtures.write();
        let batch = SaleBatch {
            id: fixtures.sale_batches.len() as u64 + 1,
            product: sale.product,
            quantity: sale.quantity,
            unit_price: sale.unit_price,
            seller: sale.seller,
            customer_type: sale.customer_type,
            created_at: Utc::now(),
        };
        fixtures.sale_batches.insert(0, batch.clone());
        fixtures.notifications.insert(
            0,
            Notification {
                id: Uuid::new_v4(),
                message: format!("sale recorded: {} x{}", batch.product, batch.quantity),
                created_at: batch.created_at,
            },
        );
        Ok(batch)
    }
}
