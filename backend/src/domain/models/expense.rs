//! Domain model for an expense.
use chrono::{Datelike, NaiveDate};
use shared::ExpenseCategory;
use uuid::Uuid;

/// Wire and storage format for expense dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Longest description accepted, in characters
pub const MAX_DESCRIPTION_LEN: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
    pub description: String,
}

impl Expense {
    /// Generate a fresh expense ID. IDs are random v4 UUIDs and never reused.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// True when the expense falls in the same calendar month as `day`
    pub fn is_in_month_of(&self, day: NaiveDate) -> bool {
        self.date.year() == day.year() && self.date.month() == day.month()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpenseValidationError {
    #[error("Amount is required")]
    MissingAmount,
    #[error("Amount must be a finite number")]
    NonFiniteAmount,
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
    #[error("'{0}' is not a valid category")]
    UnknownCategory(String),
    #[error("'{0}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Description is too long ({0} characters, maximum is 256)")]
    DescriptionTooLong(usize),
}

/// Parse a `YYYY-MM-DD` date, surrounding whitespace ignored
pub fn parse_expense_date(input: &str) -> Result<NaiveDate, ExpenseValidationError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| ExpenseValidationError::InvalidDate(input.to_string()))
}

/// Parse a category label exactly as the frontend sends it
pub fn parse_category(input: &str) -> Result<ExpenseCategory, ExpenseValidationError> {
    input
        .parse::<ExpenseCategory>()
        .map_err(|e| ExpenseValidationError::UnknownCategory(e.0))
}

/// The validated content of an expense, before an ID is attached
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub category: ExpenseCategory,
    pub date: NaiveDate,
    pub description: String,
}

impl ExpenseDraft {
    /// Check every field and collect all failures rather than stopping at the first.
    pub fn validate(
        amount: Option<f64>,
        category: &str,
        date: &str,
        description: &str,
    ) -> Result<Self, Vec<ExpenseValidationError>> {
        let mut errors = Vec::new();

        let amount = match amount {
            None => {
                errors.push(ExpenseValidationError::MissingAmount);
                None
            }
            Some(value) if !value.is_finite() => {
                errors.push(ExpenseValidationError::NonFiniteAmount);
                None
            }
            Some(value) if value <= 0.0 => {
                errors.push(ExpenseValidationError::NonPositiveAmount);
                None
            }
            Some(value) => Some(value),
        };

        let category = parse_category(category)
            .map_err(|e| errors.push(e))
            .ok();
        let date = parse_expense_date(date).map_err(|e| errors.push(e)).ok();

        let description = description.trim();
        let description_len = description.chars().count();
        if description.is_empty() {
            errors.push(ExpenseValidationError::EmptyDescription);
        } else if description_len > MAX_DESCRIPTION_LEN {
            errors.push(ExpenseValidationError::DescriptionTooLong(description_len));
        }

        match (amount, category, date) {
            (Some(amount), Some(category), Some(date)) if errors.is_empty() => Ok(Self {
                amount,
                category,
                date,
                description: description.to_string(),
            }),
            _ => Err(errors),
        }
    }

    pub fn into_expense(self, id: String) -> Expense {
        Expense {
            id,
            amount: self.amount,
            category: self.category,
            date: self.date,
            description: self.description,
        }
    }
}
