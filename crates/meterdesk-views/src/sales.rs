//! Sales page data: paginated batches plus the record-sale mutation.

use std::sync::Arc;

use tracing::debug;

use meterdesk_actions::ActionClient;
use meterdesk_prefetch::specs;
use meterdesk_query::{Fetcher, QueryCoordinator};
use meterdesk_types::{ActionError, ActionResult, ActionValue, NewSale, Page, SaleBatch};

use crate::compose::run_spec;

pub struct SalesView {
    client: Arc<dyn ActionClient>,
    coordinator: Arc<QueryCoordinator>,
}

#[derive(Debug, Clone, Default)]
pub struct SalesModel {
    pub batches: Page<SaleBatch>,
    pub seller: Option<String>,
    pub is_loading: bool,
    pub is_fetching: bool,
    pub error: Option<ActionError>,
}

impl SalesView {
    pub fn new(client: Arc<dyn ActionClient>, coordinator: Arc<QueryCoordinator>) -> Self {
        Self {
            client,
            coordinator,
        }
    }

    /// First page, no seller filter, cache-first.
    pub async fn load(&self) -> SalesModel {
        self.load_page(1, None, false).await
    }

    /// Forced revalidation of the first page.
    pub async fn refetch(&self) -> SalesModel {
        self.load_page(1, None, true).await
    }

    /// One page under an optional seller filter. Each (page, seller) pair is
    /// its own cache entry.
    pub async fn load_page(&self, page: u32, seller: Option<String>, force: bool) -> SalesModel {
        let state = run_spec(
            &self.coordinator,
            specs::sale_batches(&self.client, page, seller.clone()),
            force,
        )
        .await;

        SalesModel {
            batches: state
                .value
                .as_deref()
                .and_then(ActionValue::as_sale_batches)
                .cloned()
                .unwrap_or_default(),
            seller,
            is_loading: state.status == meterdesk_query::QueryStatus::Loading,
            is_fetching: state.is_fetching,
            error: state.error,
        }
    }

    /// Fetch the page after `model`'s and append its rows. A model already
    /// on its last page comes back unchanged. On a failed fetch the
    /// accumulated rows and pagination envelope are kept as they were, so a
    /// later retry can pick up where this one left off.
    pub async fn load_more(&self, mut model: SalesModel) -> SalesModel {
        if !model.batches.has_more() {
            return model;
        }
        let next = self
            .load_page(model.batches.page + 1, model.seller.clone(), false)
            .await;
        model.is_fetching = next.is_fetching;
        if next.error.is_some() {
            model.error = next.error;
            return model;
        }
        model.batches.items.extend(next.batches.items);
        model.batches.page = next.batches.page;
        model.batches.total_pages = next.batches.total_pages;
        model.batches.total_items = next.batches.total_items;
        model.error = None;
        model
    }

    /// Record a new sale, then force-revalidate the first unfiltered page so
    /// the list reflects the write.
    pub async fn record_sale(&self, sale: NewSale) -> ActionResult<SaleBatch> {
        let client = Arc::clone(&self.client);
        let op: Fetcher = Arc::new(move || {
            let client = Arc::clone(&client);
            let sale = sale.clone();
            Box::pin(async move { client.record_sale(sale).await.map(ActionValue::RecordedSale) })
        });

        let recorded = self.coordinator.mutate("record_sale", op).await?;
        let batch = recorded
            .as_recorded_sale()
            .cloned()
            .ok_or_else(|| ActionError::Rejected("malformed record_sale response".to_string()))?;

        debug!(id = batch.id, "sale recorded, revalidating first page");
        self.refetch().await;
        Ok(batch)
    }
}
