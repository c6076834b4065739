//! Row shapes returned by the remote action layer.
//!
//! These mirror what the backing store hands back per named operation. They
//! are deliberately plain data: the query layer caches them untouched and
//! the view layer derives its models from them with pure functions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Viewer permission level, used to gate admin-only queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Pagination envelope for list operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_pages: 0,
            total_items: 0,
        }
    }

    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// One point on the dashboard sales chart (a day and its total).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub total: f64,
}

/// One recorded sale of a batch of meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleBatch {
    pub id: u64,
    pub product: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub seller: String,
    pub customer_type: String,
    pub created_at: DateTime<Utc>,
}

impl SaleBatch {
    pub fn total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// Request body for recording a new sale (the one mutation the data plane
/// owns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSale {
    pub product: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub seller: String,
    pub customer_type: String,
}

/// A field agent who sells meters on commission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: u64,
    pub name: String,
    pub phone: String,
    pub balance: f64,
}

/// A top-up or deduction on an agent's float balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentTransaction {
    pub id: u64,
    pub agent_name: String,
    pub amount: f64,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

/// A back-office user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Aggregate stock counts for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_meters: u64,
    pub in_stock: u64,
    pub sold: u64,
    pub faulty: u64,
}

/// One line of the today/yesterday detailed sales report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDetail {
    pub product: String,
    pub quantity: u32,
    pub amount: f64,
    pub seller: String,
    pub sold_at: DateTime<Utc>,
}

/// Raw per-seller row as the remote reports it. `total_sales` arrives as a
/// decimal string; [`SellerTotal`] is the parsed, summed form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerRow {
    pub user_name: String,
    pub total_sales: String,
}

/// Derived per-seller total, summed across that seller's raw rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerTotal {
    pub user_name: String,
    pub total_sales: f64,
}

/// Units sold per product, for the best-selling-product report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCount {
    pub product: String,
    pub count: u64,
}

/// Sales count per customer type, for the distribution report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerTypeSlice {
    pub customer_type: String,
    pub count: u64,
}

/// Admin-only earnings aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EarningsSummary {
    pub total_earnings: f64,
    pub this_month: f64,
    pub commission_owed: f64,
}

/// A pushed notification (new sale, low stock, agent top-up).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_has_more() {
        let page = Page {
            items: vec![1, 2, 3],
            page: 1,
            total_pages: 3,
            total_items: 9,
        };
        assert!(page.has_more());

        let last = Page {
            items: vec![7, 8, 9],
            page: 3,
            total_pages: 3,
            total_items: 9,
        };
        assert!(!last.has_more());
        assert!(!Page::<u32>::empty().has_more());
    }

    #[test]
    fn test_sale_batch_total() {
        let sale = SaleBatch {
            id: 1,
            product: "single-phase meter".to_string(),
            quantity: 4,
            unit_price: 25.5,
            seller: "amara".to_string(),
            customer_type: "landlord".to_string(),
            created_at: Utc::now(),
        };
        assert!((sale.total() - 102.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_role_gating_predicate() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::User.is_admin());
    }

    #[test]
    fn test_notification_serializes_with_uuid() {
        let note = Notification {
            id: Uuid::new_v4(),
            message: "low stock: single-phase meter".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&note).unwrap();
        assert!(json.contains(&note.id.to_string()));

        let back: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, note);
    }
}
