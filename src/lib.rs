//! meterdesk
//!
//! Cache-coordinated data plane for a meter-sales point-of-sale dashboard:
//!
//! - **Query layer**: typed cache keys, a staleness-aware cache, and a
//!   coordinator that dedups, retries, and orders remote fetches
//! - **Prefetch**: a one-shot, two-wave warmup of the highest-traffic
//!   queries at startup
//! - **Views**: per-page models (dashboard, sales, agents, reports, users,
//!   notifications) composed from the shared cache
//!
//! See [`app::App`] for the assembled wiring.

pub mod app;
pub mod logging;

pub use app::App;

pub use meterdesk_actions::{ActionClient, Fixtures, MemoryActionClient};
pub use meterdesk_prefetch::{PrefetchConfig, PrefetchGuard, PrefetchOrchestrator};
pub use meterdesk_query::{
    MetricsSnapshot, QueryConfig, QueryCoordinator, QueryKey, QueryState, QueryStatus,
};
pub use meterdesk_types::{ActionError, ActionResult, ActionValue, DayWindow, Role};
pub use meterdesk_views::{
    AgentsView, DashboardView, NotificationsView, ReportsView, SalesView, UsersView,
};
