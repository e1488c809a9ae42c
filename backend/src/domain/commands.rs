//! Domain-level command and query types.
//!
//! Services in the domain layer take these instead of the public DTOs in the
//! `shared` crate. The REST layer maps requests into them.

pub mod expenses {
    use crate::domain::models::Expense;
    use chrono::NaiveDate;
    use shared::ExpenseCategory;

    /// Input for creating an expense or replacing an existing one.
    #[derive(Debug, Clone, PartialEq)]
    pub struct SaveExpenseCommand {
        pub amount: Option<f64>,
        pub category: String,
        pub date: String,
        pub description: String,
    }

    /// Filters for listing and exporting expenses. Every filter is optional
    /// and all present filters must match.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct ExpenseListQuery {
        /// Case-insensitive substring of the description or category label
        pub search: Option<String>,
        pub category: Option<ExpenseCategory>,
        pub from: Option<NaiveDate>,
        pub to: Option<NaiveDate>,
    }

    impl ExpenseListQuery {
        pub fn matches(&self, expense: &Expense) -> bool {
            if let Some(search) = &self.search {
                let needle = search.to_lowercase();
                let in_description = expense.description.to_lowercase().contains(&needle);
                let in_category = expense.category.label().to_lowercase().contains(&needle);
                if !in_description && !in_category {
                    return false;
                }
            }
            if let Some(category) = self.category {
                if expense.category != category {
                    return false;
                }
            }
            if let Some(from) = self.from {
                if expense.date < from {
                    return false;
                }
            }
            if let Some(to) = self.to {
                if expense.date > to {
                    return false;
                }
            }
            true
        }
    }
}
