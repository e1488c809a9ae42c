//! Dashboard and report statistics.
//!
//! The aggregator is a pure function of the expenses it is handed and the
//! date it is told is "today". Month figures are scoped to the calendar month
//! containing that date, while the transaction count and the category
//! breakdown cover every expense passed in.

use chrono::NaiveDate;
use shared::ExpenseCategory;

use super::models::Expense;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryResult {
    pub today_total: f64,
    pub month_total: f64,
    /// Mean amount per expense in the current month, 0 when there are none
    pub avg_daily: f64,
    pub total_transactions: usize,
    /// Sorted by descending total, ties in first-seen order
    pub category_breakdown: Vec<CategoryTotal>,
}

impl SummaryResult {
    pub fn empty() -> Self {
        Self {
            today_total: 0.0,
            month_total: 0.0,
            avg_daily: 0.0,
            total_transactions: 0,
            category_breakdown: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryAggregator;

impl SummaryAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn compute_summary(&self, records: &[Expense], today: NaiveDate) -> SummaryResult {
        if records.is_empty() {
            return SummaryResult::empty();
        }

        let mut today_total = 0.0;
        let mut month_total = 0.0;
        let mut month_count = 0usize;
        // One entry per category, in first-seen order
        let mut breakdown: Vec<CategoryTotal> = Vec::new();

        for record in records {
            if record.date == today {
                today_total += record.amount;
            }
            if record.is_in_month_of(today) {
                month_total += record.amount;
                month_count += 1;
            }
            match breakdown.iter_mut().find(|e| e.category == record.category) {
                Some(entry) => entry.total += record.amount,
                None => breakdown.push(CategoryTotal {
                    category: record.category,
                    total: record.amount,
                }),
            }
        }

        // sort_by is stable, so equal totals stay in first-seen order
        breakdown.sort_by(|a, b| b.total.total_cmp(&a.total));

        let avg_daily = if month_count == 0 {
            0.0
        } else {
            month_total / month_count as f64
        };

        SummaryResult {
            today_total,
            month_total,
            avg_daily,
            total_transactions: records.len(),
            category_breakdown: breakdown,
        }
    }
}
