use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::connection::CsvConnection;
use crate::domain::models::{Expense, ExpenseDraft, DATE_FORMAT};
use crate::storage::traits::ExpenseStorage;

pub const EXPENSE_CSV_HEADER: [&str; 5] = ["id", "date", "category", "amount", "description"];

/// One line of `expenses.csv`, field order matching [`EXPENSE_CSV_HEADER`]
#[derive(Debug, Serialize, Deserialize)]
struct ExpenseRow {
    id: String,
    date: String,
    category: String,
    amount: f64,
    description: String,
}

impl ExpenseRow {
    fn from_expense(expense: &Expense) -> Self {
        Self {
            id: expense.id.clone(),
            date: expense.date.format(DATE_FORMAT).to_string(),
            category: expense.category.label().to_string(),
            amount: expense.amount,
            description: expense.description.clone(),
        }
    }

    /// Stored rows must satisfy the same rules as incoming requests
    fn into_expense(self) -> Result<Expense> {
        let draft = ExpenseDraft::validate(
            Some(self.amount),
            &self.category,
            &self.date,
            &self.description,
        )
        .map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(messages.join("; "))
        })?;
        Ok(draft.into_expense(self.id))
    }
}

/// CSV-based expense repository. The whole file is rewritten on every mutation.
#[derive(Clone)]
pub struct CsvExpenseRepository {
    connection: CsvConnection,
}

impl CsvExpenseRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read all expenses, skipping rows that cannot be parsed
    fn read_expenses(&self) -> Result<Vec<Expense>> {
        self.connection.ensure_expenses_file_exists()?;

        let file_path = self.connection.expenses_file_path();
        let mut reader = ::csv::Reader::from_path(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;

        let mut expenses = Vec::new();
        for (index, result) in reader.deserialize::<ExpenseRow>().enumerate() {
            // +2: one for the header, one for 1-based line numbers
            let line = index + 2;
            match result.map_err(anyhow::Error::from).and_then(ExpenseRow::into_expense) {
                Ok(expense) => expenses.push(expense),
                Err(e) => warn!("Skipping malformed expense on line {}: {}", line, e),
            }
        }

        Ok(expenses)
    }

    fn write_expenses(&self, expenses: &[Expense]) -> Result<()> {
        let mut csv_writer = ::csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        csv_writer.write_record(EXPENSE_CSV_HEADER)?;
        for expense in expenses {
            csv_writer.serialize(ExpenseRow::from_expense(expense))?;
        }

        let bytes = csv_writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush expense CSV: {}", e))?;
        self.connection
            .write_atomically(&self.connection.expenses_file_path(), &bytes)
    }
}

#[async_trait]
impl ExpenseStorage for CsvExpenseRepository {
    async fn store_expense(&self, expense: &Expense) -> Result<()> {
        let _guard = self.connection.lock_for_write().await;
        info!("Storing expense in CSV: {}", expense.id);

        let mut expenses = self.read_expenses()?;
        if expenses.iter().any(|e| e.id == expense.id) {
            anyhow::bail!("Expense with ID {} already exists", expense.id);
        }
        expenses.push(expense.clone());
        self.write_expenses(&expenses)
    }

    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>> {
        let expenses = self.read_expenses()?;
        Ok(expenses.into_iter().find(|e| e.id == expense_id))
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>> {
        self.read_expenses()
    }

    async fn update_expense(&self, expense: &Expense) -> Result<bool> {
        let _guard = self.connection.lock_for_write().await;

        let mut expenses = self.read_expenses()?;
        match expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => {
                *existing = expense.clone();
                self.write_expenses(&expenses)?;
                info!("Updated expense in CSV: {}", expense.id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<bool> {
        let _guard = self.connection.lock_for_write().await;

        let mut expenses = self.read_expenses()?;
        let original_len = expenses.len();
        expenses.retain(|e| e.id != expense_id);

        if expenses.len() == original_len {
            return Ok(false);
        }

        self.write_expenses(&expenses)?;
        info!("Deleted expense from CSV: {}", expense_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::ExpenseCategory;
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_repo() -> (CsvExpenseRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (CsvExpenseRepository::new(connection), temp_dir)
    }

    fn test_expense(id: &str, amount: f64, description: &str) -> Expense {
        Expense {
            id: id.to_string(),
            amount,
            category: ExpenseCategory::FoodAndDining,
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_and_retrieve_expense() {
        let (repo, _temp_dir) = setup_test_repo();
        let expense = test_expense("e1", 12.5, "Lunch, with \"quotes\"");

        repo.store_expense(&expense).await.unwrap();

        let retrieved = repo.get_expense("e1").await.unwrap();
        assert_eq!(retrieved, Some(expense));
        assert_eq!(repo.get_expense("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let (repo, _temp_dir) = setup_test_repo();
        for i in 0..5 {
            repo.store_expense(&test_expense(&format!("e{}", i), i as f64 + 1.0, "x"))
                .await
                .unwrap();
        }

        let ids: Vec<String> = repo
            .list_expenses()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["e0", "e1", "e2", "e3", "e4"]);
    }

    #[tokio::test]
    async fn test_store_rejects_duplicate_id() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.store_expense(&test_expense("e1", 1.0, "x")).await.unwrap();

        assert!(repo.store_expense(&test_expense("e1", 2.0, "y")).await.is_err());
        assert_eq!(repo.list_expenses().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_expense() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.store_expense(&test_expense("e1", 1.0, "before")).await.unwrap();

        let mut replacement = test_expense("e1", 9.99, "after");
        replacement.category = ExpenseCategory::Healthcare;
        assert!(repo.update_expense(&replacement).await.unwrap());
        assert_eq!(repo.get_expense("e1").await.unwrap(), Some(replacement));

        assert!(!repo.update_expense(&test_expense("nope", 1.0, "x")).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_expense() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.store_expense(&test_expense("e1", 1.0, "x")).await.unwrap();
        repo.store_expense(&test_expense("e2", 2.0, "y")).await.unwrap();

        assert!(repo.delete_expense("e1").await.unwrap());
        assert!(!repo.delete_expense("e1").await.unwrap());

        let remaining = repo.list_expenses().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "e2");
    }

    #[tokio::test]
    async fn test_data_survives_reopening_directory() {
        let temp_dir = TempDir::new().unwrap();
        let expense = test_expense("e1", 30.0, "Groceries");
        {
            let repo = CsvExpenseRepository::new(CsvConnection::new(temp_dir.path()).unwrap());
            repo.store_expense(&expense).await.unwrap();
        }

        let reopened = CsvExpenseRepository::new(CsvConnection::new(temp_dir.path()).unwrap());
        assert_eq!(reopened.list_expenses().await.unwrap(), vec![expense]);
    }

    #[tokio::test]
    async fn test_malformed_rows_are_skipped() {
        let (repo, temp_dir) = setup_test_repo();
        fs::write(
            temp_dir.path().join("expenses.csv"),
            "id,date,category,amount,description\n\
             good,2026-10-01,Shopping,20,Shoes\n\
             bad-amount,2026-10-01,Shopping,abc,Hat\n\
             bad-category,2026-10-01,Groceries,5,Milk\n\
             bad-date,2026-13-01,Shopping,5,Socks\n\
             nan-amount,2026-10-01,Shopping,NaN,Gloves\n\
             negative,2026-10-01,Shopping,-5,Refund\n\
             zero,2026-10-01,Shopping,0,Free sample\n\
             blank,2026-10-01,Shopping,3,\"  \"\n",
        )
        .unwrap();

        let expenses = repo.list_expenses().await.unwrap();

        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].id, "good");
        assert_eq!(expenses[0].category, ExpenseCategory::Shopping);
        assert_eq!(expenses[0].amount, 20.0);
    }
}
