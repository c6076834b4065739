//! One constructor per logical query.
//!
//! A [`QuerySpec`] bundles the cache key, the fetcher closure over the
//! action client, and the staleness window for one logical query. Both the
//! prefetch waves and the feature views obtain their triples here, so a key
//! or window change happens in exactly one place.

use std::sync::Arc;
use std::time::Duration;

use meterdesk_actions::ActionClient;
use meterdesk_query::{Fetcher, QueryKey};
use meterdesk_types::{ActionValue, DayWindow};

/// Dashboard chart window prefetched by default.
pub const DEFAULT_CHART_DAYS: u32 = 30;

/// Staleness windows per query class.
pub mod windows {
    use std::time::Duration;

    /// High-churn dashboard numbers.
    pub const DASHBOARD: Duration = Duration::from_secs(60);
    /// Paginated operational lists.
    pub const LISTS: Duration = Duration::from_secs(120);
    /// Report aggregates recomputed server-side on a slow cadence.
    pub const REPORTS: Duration = Duration::from_secs(300);
}

/// A logical query: cache identity plus how to fetch it.
pub struct QuerySpec {
    pub key: QueryKey,
    pub fetcher: Fetcher,
    pub stale_window: Duration,
}

pub fn sales_chart(client: &Arc<dyn ActionClient>, days: u32) -> QuerySpec {
    let client = Arc::clone(client);
    QuerySpec {
        key: QueryKey::sales_chart(days),
        fetcher: Arc::new(move || {
            let client = Arc::clone(&client);
            Box::pin(async move { client.sales_chart(days).await.map(ActionValue::SalesChart) })
        }),
        stale_window: windows::DASHBOARD,
    }
}

pub fn sale_batches(client: &Arc<dyn ActionClient>, page: u32, seller: Option<String>) -> QuerySpec {
    let client = Arc::clone(client);
    QuerySpec {
        key: QueryKey::sale_batches(page, seller.as_deref()),
        fetcher: Arc::new(move || {
            let client = Arc::clone(&client);
            let seller = seller.clone();
            Box::pin(async move {
                client
                    .sale_batches(page, seller)
                    .await
                    .map(ActionValue::SaleBatches)
            })
        }),
        stale_window: windows::LISTS,
    }
}

pub fn agents(client: &Arc<dyn ActionClient>) -> QuerySpec {
    let client = Arc::clone(client);
    QuerySpec {
        key: QueryKey::agents(),
        fetcher: Arc::new(move || {
            let client = Arc::clone(&client);
            Box::pin(async move { client.agents().await.map(ActionValue::Agents) })
        }),
        stale_window: windows::LISTS,
    }
}

pub fn agent_transactions(client: &Arc<dyn ActionClient>, page: u32) -> QuerySpec {
    let client = Arc::clone(client);
    QuerySpec {
        key: QueryKey::agent_transactions(page),
        fetcher: Arc::new(move || {
            let client = Arc::clone(&client);
            Box::pin(async move {
                client
                    .agent_transactions(page)
                    .await
                    .map(ActionValue::AgentTransactions)
            })
        }),
        stale_window: windows::LISTS,
    }
}

pub fn inventory_summary(client: &Arc<dyn ActionClient>) -> QuerySpec {
    let client = Arc::clone(client);
    QuerySpec {
        key: QueryKey::inventory_summary(),
        fetcher: Arc::new(move || {
            let client = Arc::clone(&client);
            Box::pin(async move { client.inventory_summary().await.map(ActionValue::Inventory) })
        }),
        stale_window: windows::DASHBOARD,
    }
}

pub fn users(client: &Arc<dyn ActionClient>) -> QuerySpec {
    let client = Arc::clone(client);
    QuerySpec {
        key: QueryKey::users(),
        fetcher: Arc::new(move || {
            let client = Arc::clone(&client);
            Box::pin(async move { client.users().await.map(ActionValue::Users) })
        }),
        stale_window: windows::LISTS,
    }
}

pub fn sales_detail(client: &Arc<dyn ActionClient>, window: DayWindow) -> QuerySpec {
    let client = Arc::clone(client);
    QuerySpec {
        key: QueryKey::sales_detail(window),
        fetcher: Arc::new(move || {
            let client = Arc::clone(&client);
            Box::pin(async move {
                client
                    .sales_detail(window)
                    .await
                    .map(ActionValue::SalesDetail)
            })
        }),
        stale_window: windows::REPORTS,
    }
}

pub fn top_sellers(client: &Arc<dyn ActionClient>) -> QuerySpec {
    let client = Arc::clone(client);
    QuerySpec {
        key: QueryKey::top_sellers(),
        fetcher: Arc::new(move || {
            let client = Arc::clone(&client);
            Box::pin(async move { client.top_sellers().await.map(ActionValue::TopSellers) })
        }),
        stale_window: windows::REPORTS,
    }
}

pub fn best_selling(client: &Arc<dyn ActionClient>) -> QuerySpec {
    let client = Arc::clone(client);
    QuerySpec {
        key: QueryKey::best_selling(),
        fetcher: Arc::new(move || {
            let client = Arc::clone(&client);
            Box::pin(async move { client.best_selling().await.map(ActionValue::BestSelling) })
        }),
        stale_window: windows::REPORTS,
    }
}

pub fn customer_types(client: &Arc<dyn ActionClient>) -> QuerySpec {
    let client = Arc::clone(client);
    QuerySpec {
        key: QueryKey::customer_types(),
        fetcher: Arc::new(move || {
            let client = Arc::clone(&client);
            Box::pin(async move {
                client
                    .customer_types()
                    .await
                    .map(ActionValue::CustomerTypes)
            })
        }),
        stale_window: windows::REPORTS,
    }
}

pub fn earnings(client: &Arc<dyn ActionClient>) -> QuerySpec {
    let client = Arc::clone(client);
    QuerySpec {
        key: QueryKey::earnings(),
        fetcher: Arc::new(move || {
            let client = Arc::clone(&client);
            Box::pin(async move { client.earnings().await.map(ActionValue::Earnings) })
        }),
        stale_window: windows::REPORTS,
    }
}

pub fn notifications(client: &Arc<dyn ActionClient>) -> QuerySpec {
    let client = Arc::clone(client);
    QuerySpec {
        key: QueryKey::notifications(),
        fetcher: Arc::new(move || {
            let client = Arc::clone(&client);
            Box::pin(async move {
                client
                    .notifications()
                    .await
                    .map(ActionValue::Notifications)
            })
        }),
        stale_window: windows::DASHBOARD,
    }
}
