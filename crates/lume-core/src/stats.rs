//! # Derived Statistics
//!
//! The dashboard's aggregate figures, computed from the loaded working set.
//!
//! ## How The Snapshot Is Computed
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Derived Statistics Calculator                        │
//! │                                                                         │
//! │  sales: &[Sale] ──┬──► filter(date == today) ──► sum(profit), count    │
//! │                   │                                                     │
//! │                   └──► filter(month == current) ─► sum(profit), count  │
//! │                                                        │                │
//! │  goals: &[Goal] ─────► find(month == current) ─────────┤                │
//! │                                                        ▼                │
//! │                                   progress = profit / target × 100      │
//! │                                   (0 when no target; UNCLAMPED)         │
//! │                                                                         │
//! │  Two linear filters + sum reductions + one lookup. No sorting, no      │
//! │  index — fine at single-user, low-volume scale; degrades linearly      │
//! │  with history size.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity
//! The calculator is a pure, synchronous function of its inputs. The current
//! day is an *argument*, not a clock read, so tests are deterministic. The
//! caller passes the local-clock day; there is no timezone normalization
//! between the stored date and the running process (a known gap for users
//! crossing timezones at a month boundary).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{month_key, Goal, Sale};

// =============================================================================
// Snapshot
// =============================================================================

/// Aggregate figures for the dashboard, recomputed after every data reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    /// Total profit of sales dated today, in centavos.
    pub today_profit_cents: i64,

    /// Number of sales dated today.
    pub today_sales_count: usize,

    /// Total profit of sales in the current calendar month, in centavos.
    pub month_profit_cents: i64,

    /// Number of sales in the current calendar month.
    pub month_sales_count: usize,

    /// Target profit for the current month, in centavos. Zero when no goal
    /// is set.
    pub month_target_cents: i64,

    /// Progress toward the month goal as a percentage.
    ///
    /// Zero when no target is set (never NaN or infinity). **Unclamped**:
    /// may exceed 100 when the month outperforms the goal. The progress bar
    /// clamps for display separately.
    pub month_goal_progress: f64,
}

// =============================================================================
// Calculator
// =============================================================================

/// Computes the dashboard snapshot from the loaded sales and goals.
///
/// ## Arguments
/// * `sales` - All loaded sales for the signed-in user
/// * `goals` - All loaded goals for the signed-in user
/// * `today` - The current calendar day (caller passes the local-clock day)
///
/// ## Edge Cases
/// - Zero sales yields zero profit and zero count without error
/// - A zero or unset target forces progress to 0 (no division by zero)
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use lume_core::stats::compute_snapshot;
///
/// let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
/// let snapshot = compute_snapshot(&[], &[], today);
/// assert_eq!(snapshot.today_sales_count, 0);
/// assert_eq!(snapshot.month_goal_progress, 0.0);
/// ```
pub fn compute_snapshot(sales: &[Sale], goals: &[Goal], today: NaiveDate) -> StatsSnapshot {
    let current_month = month_key(today);

    let mut today_profit_cents = 0i64;
    let mut today_sales_count = 0usize;
    let mut month_profit_cents = 0i64;
    let mut month_sales_count = 0usize;

    for sale in sales {
        if sale.date == today {
            today_profit_cents += sale.profit_cents();
            today_sales_count += 1;
        }
        if sale.month_key() == current_month {
            month_profit_cents += sale.profit_cents();
            month_sales_count += 1;
        }
    }

    let month_target_cents = goal_for_month(goals, &current_month)
        .map(|g| g.target_cents)
        .unwrap_or(0);

    StatsSnapshot {
        today_profit_cents,
        today_sales_count,
        month_profit_cents,
        month_sales_count,
        month_target_cents,
        month_goal_progress: goal_progress(month_profit_cents, month_target_cents),
    }
}

/// Looks up the goal for a given `YYYY-MM` month key.
///
/// Linear scan — the goal collection holds at most one row per month.
pub fn goal_for_month<'a>(goals: &'a [Goal], month: &str) -> Option<&'a Goal> {
    goals.iter().find(|g| g.month == month)
}

/// Progress toward a profit target, as an unclamped percentage.
///
/// A zero or negative target yields 0, never NaN or infinity.
pub fn goal_progress(month_profit_cents: i64, target_cents: i64) -> f64 {
    if target_cents > 0 {
        month_profit_cents as f64 / target_cents as f64 * 100.0
    } else {
        0.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;
    use chrono::Utc;

    fn sale_on(date: NaiveDate, profit_cents: i64) -> Sale {
        Sale {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: "u-1".to_string(),
            product_name: "1x Perfume".to_string(),
            quantity: 1,
            cost_cents: 1000,
            sale_cents: 1000 + profit_cents,
            date,
            payment_method: PaymentMethod::Cash,
            customer_id: None,
            created_at: Utc::now(),
        }
    }

    fn goal_for(month: &str, target_cents: i64) -> Goal {
        Goal {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: "u-1".to_string(),
            month: month.to_string(),
            target_cents,
            created_at: Utc::now(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_working_set_yields_zeros() {
        let snapshot = compute_snapshot(&[], &[], day(2024, 5, 20));

        assert_eq!(snapshot.today_profit_cents, 0);
        assert_eq!(snapshot.today_sales_count, 0);
        assert_eq!(snapshot.month_profit_cents, 0);
        assert_eq!(snapshot.month_sales_count, 0);
        assert_eq!(snapshot.month_target_cents, 0);
        assert_eq!(snapshot.month_goal_progress, 0.0);
    }

    /// The worked example: two May sales (50 + 30), goal 100 ⇒ 80%.
    #[test]
    fn test_month_profit_and_progress() {
        let sales = vec![
            sale_on(day(2024, 5, 1), 5000),
            sale_on(day(2024, 5, 15), 3000),
        ];
        let goals = vec![goal_for("2024-05", 10000)];

        let snapshot = compute_snapshot(&sales, &goals, day(2024, 5, 20));

        assert_eq!(snapshot.month_profit_cents, 8000);
        assert_eq!(snapshot.month_sales_count, 2);
        assert_eq!(snapshot.month_target_cents, 10000);
        assert_eq!(snapshot.month_goal_progress, 80.0);
    }

    #[test]
    fn test_today_filter_matches_exact_day() {
        let today = day(2024, 5, 15);
        let sales = vec![
            sale_on(today, 5000),
            sale_on(day(2024, 5, 14), 3000), // yesterday: month only
            sale_on(day(2024, 4, 15), 9000), // last month: neither
        ];

        let snapshot = compute_snapshot(&sales, &[], today);

        assert_eq!(snapshot.today_profit_cents, 5000);
        assert_eq!(snapshot.today_sales_count, 1);
        assert_eq!(snapshot.month_profit_cents, 8000);
        assert_eq!(snapshot.month_sales_count, 2);
    }

    #[test]
    fn test_zero_target_forces_zero_progress() {
        let sales = vec![sale_on(day(2024, 5, 1), 5000)];
        let goals = vec![goal_for("2024-05", 0)];

        let snapshot = compute_snapshot(&sales, &goals, day(2024, 5, 20));

        // Guarded: 0, not NaN or infinity
        assert_eq!(snapshot.month_goal_progress, 0.0);
        assert!(snapshot.month_goal_progress.is_finite());
    }

    #[test]
    fn test_progress_is_unclamped() {
        let sales = vec![sale_on(day(2024, 5, 1), 15000)];
        let goals = vec![goal_for("2024-05", 10000)];

        let snapshot = compute_snapshot(&sales, &goals, day(2024, 5, 20));

        // 150% stays 150% — clamping is the display layer's job
        assert_eq!(snapshot.month_goal_progress, 150.0);
    }

    #[test]
    fn test_goal_lookup_ignores_other_months() {
        let goals = vec![goal_for("2024-04", 7000), goal_for("2024-06", 9000)];

        let snapshot = compute_snapshot(&[], &goals, day(2024, 5, 20));

        assert_eq!(snapshot.month_target_cents, 0);
        assert_eq!(goal_for_month(&goals, "2024-04").unwrap().target_cents, 7000);
        assert!(goal_for_month(&goals, "2024-05").is_none());
    }

    #[test]
    fn test_progress_exact_ratio() {
        // P = 333, T = 1000 ⇒ exactly 33.3
        assert_eq!(goal_progress(333, 1000), 33.3);
        // Negative month profit stays negative (no clamping below zero either)
        assert_eq!(goal_progress(-500, 1000), -50.0);
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let snapshot = compute_snapshot(&[], &[], day(2024, 5, 20));
        let json = serde_json::to_value(&snapshot).unwrap();

        // Field names must match what the frontend binds to
        assert!(json.get("monthGoalProgress").is_some());
        assert!(json.get("todayProfitCents").is_some());
        assert!(json.get("month_goal_progress").is_none());
    }

    #[test]
    fn test_negative_profit_counts_into_sums() {
        let sales = vec![
            sale_on(day(2024, 5, 1), 5000),
            sale_on(day(2024, 5, 2), -2000), // sold below cost
        ];

        let snapshot = compute_snapshot(&sales, &[], day(2024, 5, 20));

        assert_eq!(snapshot.month_profit_cents, 3000);
        assert_eq!(snapshot.month_sales_count, 2);
    }
}
