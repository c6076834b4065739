//! Typed cache-key construction.
//!
//! A [`QueryKey`] is an ordered sequence of primitive parts; two keys share
//! a cache entry iff their sequences are equal element by element. Every
//! call site that must agree on a key (the prefetch plan and the view that
//! later reads it) goes through the same named constructor here, so a key
//! shape only ever changes in one place.

use std::fmt;

use smallvec::SmallVec;

use meterdesk_types::DayWindow;

/// One element of a query key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Str(String),
    Int(i64),
    /// Explicit absence marker for optional parameters, so that
    /// "no filter" and "filter omitted" hash identically.
    Absent,
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Str(s) => write!(f, "{s}"),
            KeyPart::Int(n) => write!(f, "{n}"),
            KeyPart::Absent => write!(f, "-"),
        }
    }
}

/// Ordered tuple identifying one cacheable request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(SmallVec<[KeyPart; 4]>);

impl QueryKey {
    fn scoped(scope: &str) -> Self {
        let mut parts = SmallVec::new();
        parts.push(KeyPart::Str(scope.to_string()));
        Self(parts)
    }

    fn with_int(mut self, n: i64) -> Self {
        self.0.push(KeyPart::Int(n));
        self
    }

    fn with_str(mut self, s: &str) -> Self {
        self.0.push(KeyPart::Str(s.to_string()));
        self
    }

    fn with_opt_str(mut self, s: Option<&str>) -> Self {
        match s {
            Some(s) => self.0.push(KeyPart::Str(s.to_string())),
            None => self.0.push(KeyPart::Absent),
        }
        self
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    // ==================== One constructor per logical query ====================

    /// Dashboard sales chart over the last `days` days.
    pub fn sales_chart(days: u32) -> Self {
        Self::scoped("sales-chart").with_int(i64::from(days))
    }

    /// One page of sale batches, optionally filtered by seller.
    pub fn sale_batches(page: u32, seller: Option<&str>) -> Self {
        Self::scoped("sale-batches")
            .with_int(i64::from(page))
            .with_opt_str(seller)
    }

    pub fn agents() -> Self {
        Self::scoped("agents")
    }

    pub fn agent_transactions(page: u32) -> Self {
        Self::scoped("agent-transactions").with_int(i64::from(page))
    }

    pub fn inventory_summary() -> Self {
        Self::scoped("inventory-summary")
    }

    pub fn users() -> Self {
        Self::scoped("users")
    }

    pub fn sales_detail(window: DayWindow) -> Self {
        Self::scoped("sales-detail").with_str(window.as_str())
    }

    pub fn top_sellers() -> Self {
        Self::scoped("top-sellers")
    }

    pub fn best_selling() -> Self {
        Self::scoped("best-selling")
    }

    pub fn customer_types() -> Self {
        Self::scoped("customer-types")
    }

    pub fn earnings() -> Self {
        Self::scoped("earnings")
    }

    pub fn notifications() -> Self {
        Self::scoped("notifications")
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}
