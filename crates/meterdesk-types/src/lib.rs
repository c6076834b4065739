//! Shared domain types for the meterdesk data plane.
//!
//! This crate holds the row shapes returned by the remote action layer
//! (sales, agents, users, inventory, report aggregates), the pagination
//! envelope, viewer roles, and the [`ActionValue`]/[`ActionError`] pair that
//! the query layer caches and propagates.

pub mod action;
pub mod env;
pub mod rows;

pub use action::{ActionError, ActionResult, ActionValue, DayWindow};
pub use rows::{
    Agent, AgentTransaction, ChartPoint, CustomerTypeSlice, EarningsSummary, InventorySummary,
    NewSale, Notification, Page, ProductCount, Role, SaleBatch, SaleDetail, SellerRow, SellerTotal,
    User,
};
