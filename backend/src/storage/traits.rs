//! # Storage Traits
//!
//! Storage abstractions the domain layer depends on. The only backend today
//! is the CSV/YAML file store in [`super::csv`].

use anyhow::Result;
use async_trait::async_trait;
use shared::UserSettings;

use crate::domain::models::Expense;

/// Persistence operations for expenses
#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    /// Store a new expense
    async fn store_expense(&self, expense: &Expense) -> Result<()>;

    /// Retrieve a specific expense by ID
    async fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>>;

    /// All expenses in insertion order
    async fn list_expenses(&self) -> Result<Vec<Expense>>;

    /// Replace an existing expense with the same ID.
    /// Returns false when no such expense exists.
    async fn update_expense(&self, expense: &Expense) -> Result<bool>;

    /// Returns true if the expense was found and deleted
    async fn delete_expense(&self, expense_id: &str) -> Result<bool>;
}

/// Persistence for the single settings document
#[async_trait]
pub trait SettingsStorage: Send + Sync {
    /// Stored settings, or defaults when nothing has been saved yet
    async fn get_settings(&self) -> Result<UserSettings>;

    async fn save_settings(&self, settings: &UserSettings) -> Result<()>;
}

/// Factory for repositories sharing one underlying store.
///
/// Lets the domain layer stay generic over the storage backend.
pub trait Connection: Send + Sync + Clone {
    type ExpenseRepository: ExpenseStorage + Clone;
    type SettingsRepository: SettingsStorage + Clone;

    fn create_expense_repository(&self) -> Self::ExpenseRepository;

    fn create_settings_repository(&self) -> Self::SettingsRepository;
}
