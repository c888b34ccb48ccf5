use chrono::{Datelike, NaiveDate};

use crate::models::dashboard::{ActivityEntry, DashboardSnapshot, HustlePerformance, MonthlyTotals};
use crate::models::hustle::{Hustle, HustleStatus};
use crate::models::transaction::{Transaction, TransactionKind};

/// How many trailing calendar months the dashboard series covers.
const MONTHLY_WINDOW: usize = 12;

/// How many rows the income-ranked hustle comparison keeps.
const COMPARISON_LIMIT: usize = 5;

/// How many rows the profit-ranked top-performers list keeps.
const TOP_PERFORMERS_LIMIT: usize = 3;

/// How many rows the recent-activity feed keeps.
const RECENT_LIMIT: usize = 5;

/// Computes dashboard metrics from raw hustle/transaction collections.
///
/// Pure business logic — no I/O, no clock access. The same two input
/// collections always yield the identical snapshot, so the engine behaves
/// the same from every call site. Malformed records (missing amount, date,
/// or kind) contribute zero to sums and are excluded from date-bucketed
/// views; they never fail the computation.
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    /// Build the full snapshot for `as_of` (the anchor of the 12-month
    /// trailing window — callers pass "today").
    pub fn build_snapshot(
        &self,
        hustles: &[Hustle],
        transactions: &[Transaction],
        as_of: NaiveDate,
    ) -> DashboardSnapshot {
        let mut total_income = 0.0;
        let mut total_expenses = 0.0;
        for tx in transactions {
            let amount = tx.amount.unwrap_or(0.0);
            match tx.kind {
                Some(TransactionKind::Income) => total_income += amount,
                Some(TransactionKind::Expense) => total_expenses += amount,
                None => {}
            }
        }

        let monthly = self.monthly_totals(transactions, as_of);

        // Month-over-month change compares the last two buckets; the
        // series always has 12 entries, so both exist.
        let (income_change_pct, expense_change_pct) = match (
            monthly.last(),
            monthly.len().checked_sub(2).and_then(|i| monthly.get(i)),
        ) {
            (Some(current), Some(previous)) => (
                percentage_change(current.income, previous.income),
                percentage_change(current.expenses, previous.expenses),
            ),
            _ => (0, 0),
        };

        let performances: Vec<HustlePerformance> = hustles
            .iter()
            .filter_map(|h| hustle_performance(h, transactions))
            .collect();

        let mut hustle_comparison = performances.clone();
        hustle_comparison.sort_by(|a, b| {
            b.income
                .partial_cmp(&a.income)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hustle_comparison.truncate(COMPARISON_LIMIT);

        let mut top_hustles = performances;
        top_hustles.sort_by(|a, b| {
            b.profit
                .partial_cmp(&a.profit)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        top_hustles.truncate(TOP_PERFORMERS_LIMIT);

        DashboardSnapshot {
            as_of,
            total_income,
            total_expenses,
            net_profit: total_income - total_expenses,
            income_change_pct,
            expense_change_pct,
            total_hustles: hustles.len(),
            monthly,
            hustle_comparison,
            top_hustles,
            recent: self.recent_activity(hustles, transactions),
        }
    }

    /// Bucket transactions into the 12 calendar months ending at the
    /// `as_of` month, oldest first. Months with no transactions yield
    /// all-zero buckets rather than being omitted.
    fn monthly_totals(&self, transactions: &[Transaction], as_of: NaiveDate) -> Vec<MonthlyTotals> {
        trailing_months(as_of)
            .into_iter()
            .map(|(year, month)| {
                let mut income = 0.0;
                let mut expenses = 0.0;
                for tx in transactions {
                    let Some(date) = tx.date else { continue };
                    if date.year() != year || date.month() != month {
                        continue;
                    }
                    let amount = tx.amount.unwrap_or(0.0);
                    match tx.kind {
                        Some(TransactionKind::Income) => income += amount,
                        Some(TransactionKind::Expense) => expenses += amount,
                        None => {}
                    }
                }
                MonthlyTotals {
                    year,
                    month,
                    label: month_label(month).to_string(),
                    income,
                    expenses,
                    profit: income - expenses,
                }
            })
            .collect()
    }

    /// The latest fully-formed transactions, newest first, at most 5.
    /// Records missing a kind, amount, or date cannot be rendered as
    /// activity and are skipped; a missing hustle reference is fine and
    /// resolves to "General".
    fn recent_activity(
        &self,
        hustles: &[Hustle],
        transactions: &[Transaction],
    ) -> Vec<ActivityEntry> {
        let mut dated: Vec<(&Transaction, TransactionKind, f64, NaiveDate)> = transactions
            .iter()
            .filter_map(|tx| match (tx.kind, tx.amount, tx.date) {
                (Some(kind), Some(amount), Some(date)) => Some((tx, kind, amount, date)),
                _ => None,
            })
            .collect();
        dated.sort_by(|a, b| b.3.cmp(&a.3));
        dated.truncate(RECENT_LIMIT);

        dated
            .into_iter()
            .map(|(tx, kind, amount, date)| ActivityEntry {
                id: tx.id,
                kind,
                description: if tx.description.trim().is_empty() {
                    "No description".to_string()
                } else {
                    tx.description.clone()
                },
                amount,
                date,
                hustle_title: hustle_title(hustles, tx.hustle_id),
            })
            .collect()
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}

/// The single profit/status derivation for a hustle, consumed by the
/// comparison ranking, the top-performers list, and per-hustle views.
/// Returns `None` for hustles without an id — they cannot be attributed.
pub fn hustle_performance(
    hustle: &Hustle,
    transactions: &[Transaction],
) -> Option<HustlePerformance> {
    let id = hustle.id?;

    let mut income = 0.0;
    let mut expenses = 0.0;
    for tx in transactions {
        if tx.hustle_id != Some(id) {
            continue;
        }
        let amount = tx.amount.unwrap_or(0.0);
        match tx.kind {
            Some(TransactionKind::Income) => income += amount,
            Some(TransactionKind::Expense) => expenses += amount,
            None => {}
        }
    }

    let status = if income > 0.0 {
        HustleStatus::Active
    } else {
        HustleStatus::NeedsAttention
    };

    Some(HustlePerformance {
        id,
        title: if hustle.title.trim().is_empty() {
            "Unnamed Hustle".to_string()
        } else {
            hustle.title.clone()
        },
        status,
        income,
        expenses,
        profit: income - expenses,
    })
}

/// Month-over-month change as an integer percentage. Defined as 0 when the
/// previous period's value is 0 — a saturating policy, not an error.
pub fn percentage_change(current: f64, previous: f64) -> i64 {
    if previous == 0.0 {
        return 0;
    }
    ((current - previous) / previous * 100.0).round() as i64
}

/// The 12 (year, month) pairs ending at the `as_of` month, oldest first.
fn trailing_months(as_of: NaiveDate) -> Vec<(i32, u32)> {
    let mut months = Vec::with_capacity(MONTHLY_WINDOW);
    let mut year = as_of.year();
    let mut month = as_of.month();
    for _ in 0..MONTHLY_WINDOW {
        months.push((year, month));
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    }
    months.reverse();
    months
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

/// Resolve the display title for a transaction's owning hustle.
/// Unset or unresolvable references fall back to "General".
fn hustle_title(hustles: &[Hustle], hustle_id: Option<i64>) -> String {
    hustle_id
        .and_then(|id| hustles.iter().find(|h| h.id == Some(id)))
        .map(|h| h.title.trim())
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "General".to_string())
}
