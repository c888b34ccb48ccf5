use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::hustle::HustleStatus;
use super::transaction::TransactionKind;

/// Income/expense/profit totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub year: i32,

    /// Calendar month, 1–12.
    pub month: u32,

    /// Short display label ("Jan", "Feb", …).
    pub label: String,

    pub income: f64,
    pub expenses: f64,

    /// income − expenses; may be negative.
    pub profit: f64,
}

/// Derived financial figures for one hustle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HustlePerformance {
    pub id: i64,
    pub title: String,

    /// "active" iff income > 0 — a display heuristic, not a stored field.
    pub status: HustleStatus,

    pub income: f64,
    pub expenses: f64,
    pub profit: f64,
}

/// One row of the recent-activity feed, enriched with the owning hustle's
/// title ("General" when the transaction has no resolvable hustle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: Option<i64>,
    pub kind: TransactionKind,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub hustle_title: String,
}

/// The derived aggregate view of all hustles and transactions.
///
/// Recomputed in full from the fetched collections on every refresh; never
/// persisted and never incrementally maintained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// The date the snapshot was computed for (anchor of the 12-month
    /// trailing window).
    pub as_of: NaiveDate,

    pub total_income: f64,
    pub total_expenses: f64,

    /// total_income − total_expenses; may be negative.
    pub net_profit: f64,

    /// Month-over-month income change, integer percent. 0 when the
    /// previous month had no income.
    pub income_change_pct: i64,

    /// Month-over-month expense change, integer percent. 0 when the
    /// previous month had no expenses.
    pub expense_change_pct: i64,

    /// Count of ALL hustles, regardless of activity.
    pub total_hustles: usize,

    /// Exactly 12 calendar-month buckets ending at the `as_of` month,
    /// oldest first; months without transactions are zero-filled.
    pub monthly: Vec<MonthlyTotals>,

    /// Top hustles by income, at most 5.
    pub hustle_comparison: Vec<HustlePerformance>,

    /// Top hustles by profit, at most 3.
    pub top_hustles: Vec<HustlePerformance>,

    /// Latest dated transactions, at most 5, newest first.
    pub recent: Vec<ActivityEntry>,
}

/// Pre-aggregated summary from `GET /dashboard/overview`.
///
/// Kept as an optional optimization surface; the canonical dashboard is
/// computed client-side from the raw collections. Decoded leniently —
/// absent fields default to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerOverview {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub income_change: i64,
    pub expenses_change: i64,
    pub total_hustles: u64,
}
