//! Expense service domain logic for the expense tracker.
//!
//! This is the validation boundary: nothing reaches storage or the
//! [`SummaryAggregator`] without passing [`ExpenseDraft::validate`].

use std::sync::Arc;
use tracing::{debug, info};

use super::clock::Clock;
use super::commands::expenses::{ExpenseListQuery, SaveExpenseCommand};
use super::models::{Expense, ExpenseDraft, ExpenseValidationError};
use super::summary_aggregator::{SummaryAggregator, SummaryResult};
use crate::storage::{Connection, ExpenseStorage};

#[derive(Debug, thiserror::Error)]
pub enum ExpenseError {
    #[error("{}", join_messages(.0))]
    Validation(Vec<ExpenseValidationError>),
    #[error("Expense not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

fn join_messages(errors: &[ExpenseValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    expense_repository: C::ExpenseRepository,
    aggregator: SummaryAggregator,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(connection: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            expense_repository: connection.create_expense_repository(),
            aggregator: SummaryAggregator::new(),
            clock,
        }
    }

    pub async fn create_expense(&self, command: SaveExpenseCommand) -> Result<Expense, ExpenseError> {
        let draft = Self::validate(&command)?;
        let expense = draft.into_expense(Expense::generate_id());

        self.expense_repository.store_expense(&expense).await?;
        info!(
            "Created expense {} ({} {:.2} on {})",
            expense.id, expense.category, expense.amount, expense.date
        );
        Ok(expense)
    }

    pub async fn get_expense(&self, expense_id: &str) -> Result<Expense, ExpenseError> {
        self.expense_repository
            .get_expense(expense_id)
            .await?
            .ok_or_else(|| ExpenseError::NotFound(expense_id.to_string()))
    }

    /// Replace every field of an existing expense; the ID is kept
    pub async fn update_expense(
        &self,
        expense_id: &str,
        command: SaveExpenseCommand,
    ) -> Result<Expense, ExpenseError> {
        let draft = Self::validate(&command)?;
        let expense = draft.into_expense(expense_id.to_string());

        if !self.expense_repository.update_expense(&expense).await? {
            return Err(ExpenseError::NotFound(expense_id.to_string()));
        }
        info!("Updated expense {}", expense.id);
        Ok(expense)
    }

    pub async fn delete_expense(&self, expense_id: &str) -> Result<(), ExpenseError> {
        if !self.expense_repository.delete_expense(expense_id).await? {
            return Err(ExpenseError::NotFound(expense_id.to_string()));
        }
        info!("Deleted expense {}", expense_id);
        Ok(())
    }

    /// Matching expenses, newest date first. Same-day expenses are ordered
    /// most recently added first.
    pub async fn list_expenses(&self, query: &ExpenseListQuery) -> Result<Vec<Expense>, ExpenseError> {
        let mut expenses: Vec<Expense> = self
            .expense_repository
            .list_expenses()
            .await?
            .into_iter()
            .rev()
            .filter(|e| query.matches(e))
            .collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));

        debug!("Listing {} expenses for query {:?}", expenses.len(), query);
        Ok(expenses)
    }

    /// Dashboard statistics over every stored expense, as of the clock's today
    pub async fn summarize(&self) -> Result<SummaryResult, ExpenseError> {
        let expenses = self.expense_repository.list_expenses().await?;
        let today = self.clock.today();
        debug!("Summarizing {} expenses as of {}", expenses.len(), today);
        Ok(self.aggregator.compute_summary(&expenses, today))
    }

    fn validate(command: &SaveExpenseCommand) -> Result<ExpenseDraft, ExpenseError> {
        ExpenseDraft::validate(
            command.amount,
            &command.category,
            &command.date,
            &command.description,
        )
        .map_err(ExpenseError::Validation)
    }
}
