//! Per-page view models for the meterdesk dashboard.
//!
//! Each view composes one or more coordinated queries into a single model:
//! per-source data defaulted to empty values when absent, `is_loading`
//! OR-ed across enabled sources, the first error encountered, and a
//! `refetch` path that bypasses staleness while keeping the old data
//! visible. Derivations (seller totals, best product) are pure functions in
//! [`aggregate`].

pub mod agents;
pub mod aggregate;
mod compose;
pub mod dashboard;
pub mod notifications;
pub mod reports;
pub mod sales;
pub mod users;

pub use agents::{AgentsModel, AgentsView};
pub use dashboard::{DashboardModel, DashboardView};
pub use notifications::{NotificationsModel, NotificationsView};
pub use reports::{ReportsModel, ReportsView};
pub use sales::{SalesModel, SalesView};
pub use users::{UsersModel, UsersView};
