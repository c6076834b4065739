//! The `ActionClient` trait: one async method per named remote operation.

use async_trait::async_trait;

use meterdesk_types::{
    ActionResult, Agent, AgentTransaction, ChartPoint, CustomerTypeSlice, DayWindow,
    EarningsSummary, InventorySummary, NewSale, Notification, Page, ProductCount, SaleBatch,
    SaleDetail, SellerRow, User,
};

/// Asynchronous client for the remote action layer.
///
/// Reads are idempotent; `record_sale` is the one write. Implementations own
/// their transport and timeouts; they do no caching or retrying of their own
/// (that is the coordinator's job).
#[async_trait]
pub trait ActionClient: Send + Sync {
    /// Daily sales totals for the last `days` days (dashboard chart).
    async fn sales_chart(&self, days: u32) -> ActionResult<Vec<ChartPoint>>;

    /// One page of recorded sale batches, newest first, optionally filtered
    /// by seller name.
    async fn sale_batches(&self, page: u32, seller: Option<String>)
        -> ActionResult<Page<SaleBatch>>;

    /// All registered agents.
    async fn agents(&self) -> ActionResult<Vec<Agent>>;

    /// One page of agent float transactions, newest first.
    async fn agent_transactions(&self, page: u32) -> ActionResult<Page<AgentTransaction>>;

    /// Aggregate stock counts.
    async fn inventory_summary(&self) -> ActionResult<InventorySummary>;

    /// All back-office user accounts.
    async fn users(&self) -> ActionResult<Vec<User>>;

    /// Detailed sales rows for today or yesterday.
    async fn sales_detail(&self, window: DayWindow) -> ActionResult<Vec<SaleDetail>>;

    /// Raw per-seller totals (one row per seller per day).
    async fn top_sellers(&self) -> ActionResult<Vec<SellerRow>>;

    /// Units sold per product.
    async fn best_selling(&self) -> ActionResult<Vec<ProductCount>>;

    /// Sales count per customer type.
    async fn customer_types(&self) -> ActionResult<Vec<CustomerTypeSlice>>;

    /// Earnings aggregate. Admin-only; callers gate on role before issuing.
    async fn earnings(&self) -> ActionResult<EarningsSummary>;

    /// Unread notifications.
    async fn notifications(&self) -> ActionResult<Vec<Notification>>;

    /// Record a new sale. Non-idempotent; the coordinator bounds retries.
    async fn record_sale(&self, sale: NewSale) -> ActionResult<SaleBatch>;
}
