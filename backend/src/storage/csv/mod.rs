pub mod connection;
pub mod expense_repository;
pub mod settings_repository;

pub use connection::CsvConnection;
pub use expense_repository::CsvExpenseRepository;
pub use settings_repository::YamlSettingsRepository;
