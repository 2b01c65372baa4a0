//! # Domain Types
//!
//! Core domain types used throughout the Lume sales tracker.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sale       │   │      Goal       │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  user_id        │   │  user_id        │   │  user_id        │       │
//! │  │  cost_cents     │   │  month YYYY-MM  │   │  name           │       │
//! │  │  sale_cents     │   │  target_cents   │   │  contact_handle │       │
//! │  │  date           │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │ PaymentMethod   │  Pix | Cash | Card                                 │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Owning-User Scoping
//! Every entity carries a `user_id`. Multi-tenant isolation is by row filter,
//! not by separate schemas: every read in lume-db is filtered to the owning
//! user, and the providers refuse to operate without a signed-in session.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid for a sale.
///
/// ## Note
/// The payment method is captured on the entry form but the row store does
/// not persist it; sales read back from storage default to [`PaymentMethod::Cash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Instant bank transfer (PIX).
    Pix,
    /// Physical cash payment.
    Cash,
    /// Card payment (credit or debit).
    Card,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One recorded sale transaction.
///
/// ## Totals At Storage Time
/// A sale entered as `quantity × unit price` is aggregated before storage:
/// `cost_cents` and `sale_cents` hold the *totals* (`q·c` and `q·p`), and the
/// label carries the quantity (`"3x Lip Gloss"`). Rows read back therefore
/// always have `quantity == 1`.
///
/// ## Derived Profit Invariant
/// Profit is never stored. [`Sale::profit`] recomputes `sale - cost` at read
/// time, independent of how totals were written.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning user this sale belongs to.
    pub user_id: String,

    /// Display label, including the entered quantity (e.g. "2x Body Splash").
    pub product_name: String,

    /// Quantity. Always 1 for rows read from storage (totals are aggregated).
    pub quantity: i64,

    /// Total cost in centavos.
    pub cost_cents: i64,

    /// Total sale price in centavos.
    pub sale_cents: i64,

    /// Calendar day of the transaction, as entered on the form.
    #[ts(as = "String")]
    pub date: NaiveDate,

    /// How the customer paid. Defaulted on read (not persisted).
    pub payment_method: PaymentMethod,

    /// Optional link to a registered customer. May dangle after the customer
    /// is deleted; sales are never removed with their customer.
    pub customer_id: Option<String>,

    /// When the sale row was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the total profit, recomputed as `sale - cost`.
    #[inline]
    pub fn profit(&self) -> Money {
        Money::from_cents(self.sale_cents - self.cost_cents)
    }

    /// Returns the total profit in centavos.
    #[inline]
    pub fn profit_cents(&self) -> i64 {
        self.sale_cents - self.cost_cents
    }

    /// Returns the `YYYY-MM` month key of this sale's transaction date.
    #[inline]
    pub fn month_key(&self) -> String {
        month_key(self.date)
    }
}

// =============================================================================
// Goal
// =============================================================================

/// A monthly profit target.
///
/// ## Invariant
/// At most one goal per (user, month) pair. This is enforced by
/// upsert-by-lookup in the store provider, not by a storage constraint.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Goal {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning user this goal belongs to.
    pub user_id: String,

    /// Calendar month key in `YYYY-MM` form.
    pub month: String,

    /// Target profit for the month, in centavos.
    pub target_cents: i64,

    /// When the goal row was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Returns the target as a Money value.
    #[inline]
    pub fn target(&self) -> Money {
        Money::from_cents(self.target_cents)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A contact record optionally linked to sales.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning user this customer belongs to.
    pub user_id: String,

    /// Customer name. Non-empty at entry time; no further invariant.
    pub name: String,

    /// Optional contact handle (phone / messaging number).
    pub contact_handle: Option<String>,

    /// When the customer row was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Month Key Helper
// =============================================================================

/// Formats a calendar day as a `YYYY-MM` month key.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use lume_core::types::month_key;
///
/// let day = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
/// assert_eq!(month_key(day), "2024-05");
/// ```
#[inline]
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(cost: i64, sale_price: i64) -> Sale {
        Sale {
            id: "s-1".to_string(),
            user_id: "u-1".to_string(),
            product_name: "1x Perfume 50ml".to_string(),
            quantity: 1,
            cost_cents: cost,
            sale_cents: sale_price,
            date: NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
            payment_method: PaymentMethod::Pix,
            customer_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_profit_is_derived() {
        let s = sale(3000, 8000);
        assert_eq!(s.profit_cents(), 5000);
        assert_eq!(s.profit().cents(), 5000);
    }

    #[test]
    fn test_profit_can_be_negative() {
        let s = sale(8000, 3000);
        assert_eq!(s.profit_cents(), -5000);
    }

    #[test]
    fn test_month_key() {
        let s = sale(1, 2);
        assert_eq!(s.month_key(), "2024-05");

        let january = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        assert_eq!(month_key(january), "2025-01");
    }

    #[test]
    fn test_payment_method_default() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
    }
}
