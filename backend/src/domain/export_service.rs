//! CSV export for the reports page.

use anyhow::Result;
use serde::Serialize;

use super::models::{Expense, DATE_FORMAT};

#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
}

#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Render expenses as CSV with a header row, amounts to two decimals
    pub fn export_csv(&self, expenses: &[Expense]) -> Result<String> {
        let mut writer = ::csv::Writer::from_writer(Vec::new());

        if expenses.is_empty() {
            writer.write_record(["Date", "Description", "Category", "Amount"])?;
        }
        for expense in expenses {
            writer.serialize(ExportRow {
                date: expense.date.format(DATE_FORMAT).to_string(),
                description: &expense.description,
                category: expense.category.label(),
                amount: format!("{:.2}", expense.amount),
            })?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush export CSV: {}", e))?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Download file name for an export generated on `today`
    pub fn export_file_name(&self, today: chrono::NaiveDate) -> String {
        format!("expenses_{}.csv", today.format("%Y%m%d"))
    }
}
