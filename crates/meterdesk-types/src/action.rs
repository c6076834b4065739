//! Results and errors of remote actions.
//!
//! Every named remote operation resolves to one [`ActionValue`] variant. The
//! query cache stores values behind `Arc` untyped by key, so consumers narrow
//! back to their row type through the `as_*` accessors; a mismatch simply
//! reads as absent data, never a panic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rows::{
    Agent, AgentTransaction, ChartPoint, CustomerTypeSlice, EarningsSummary, InventorySummary,
    Notification, Page, ProductCount, SaleBatch, SaleDetail, SellerRow, User,
};

/// Which day the detailed-sales report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayWindow {
    Today,
    Yesterday,
}

impl DayWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayWindow::Today => "today",
            DayWindow::Yesterday => "yesterday",
        }
    }
}

/// Error surfaced by a remote action.
///
/// `Transport` covers network-level failures; `Rejected` carries the
/// remote's own message for business-rule failures. Cloneable so the query
/// state can hold a copy while the caller keeps the original.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("remote rejected the operation: {0}")]
    Rejected(String),
}

impl ActionError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ActionError::Transport(_))
    }
}

pub type ActionResult<T> = Result<T, ActionError>;

/// The successful payload of one remote action, as cached by the query
/// layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionValue {
    SalesChart(Vec<ChartPoint>),
    SaleBatches(Page<SaleBatch>),
    Agents(Vec<Agent>),
    AgentTransactions(Page<AgentTransaction>),
    Inventory(InventorySummary),
    Users(Vec<User>),
    SalesDetail(Vec<SaleDetail>),
    TopSellers(Vec<SellerRow>),
    BestSelling(Vec<ProductCount>),
    CustomerTypes(Vec<CustomerTypeSlice>),
    Earnings(EarningsSummary),
    Notifications(Vec<Notification>),
    RecordedSale(SaleBatch),
}

impl ActionValue {
    pub fn as_sales_chart(&self) -> Option<&[ChartPoint]> {
        match self {
            ActionValue::SalesChart(points) => Some(points),
            _ => None,
        }
    }

    pub fn as_sale_batches(&self) -> Option<&Page<SaleBatch>> {
        match self {
            ActionValue::SaleBatches(page) => Some(page),
            _ => None,
        }
    }

    pub fn as_agents(&self) -> Option<&[Agent]> {
        match self {
            ActionValue::Agents(agents) => Some(agents),
            _ => None,
        }
    }

    pub fn as_agent_transactions(&self) -> Option<&Page<AgentTransaction>> {
        match self {
            ActionValue::AgentTransactions(page) => Some(page),
            _ => None,
        }
    }

    pub fn as_inventory(&self) -> Option<&InventorySummary> {
        match self {
            ActionValue::Inventory(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn as_users(&self) -> Option<&[User]> {
        match self {
            ActionValue::Users(users) => Some(users),
            _ => None,
        }
    }

    pub fn as_sales_detail(&self) -> Option<&[SaleDetail]> {
        match self {
            ActionValue::SalesDetail(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_top_sellers(&self) -> Option<&[SellerRow]> {
        match self {
            ActionValue::TopSellers(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_best_selling(&self) -> Option<&[ProductCount]> {
        match self {
            ActionValue::BestSelling(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_customer_types(&self) -> Option<&[CustomerTypeSlice]> {
        match self {
            ActionValue::CustomerTypes(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_earnings(&self) -> Option<&EarningsSummary> {
        match self {
            ActionValue::Earnings(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn as_notifications(&self) -> Option<&[Notification]> {
        match self {
            ActionValue::Notifications(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_recorded_sale(&self) -> Option<&SaleBatch> {
        match self {
            ActionValue::RecordedSale(batch) => Some(batch),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_narrows_to_matching_variant() {
        let value = ActionValue::SalesChart(vec![ChartPoint {
            label: "2026-08-01".to_string(),
            total: 120.0,
        }]);
        assert_eq!(value.as_sales_chart().map(<[_]>::len), Some(1));
        assert!(value.as_agents().is_none());
        assert!(value.as_inventory().is_none());
    }

    #[test]
    fn test_error_classification() {
        assert!(ActionError::Transport("connection reset".into()).is_transport());
        assert!(!ActionError::Rejected("quantity must be positive".into()).is_transport());
    }

    #[test]
    fn test_day_window_labels() {
        assert_eq!(DayWindow::Today.as_str(), "today");
        assert_eq!(DayWindow::Yesterday.as_str(), "yesterday");
    }
}
