//! # Storage Module
//!
//! Data persistence for the expense tracker. The domain layer only sees the
//! traits in [`traits`]; [`csv`] implements them with flat files in a data
//! directory:
//!
//! ```text
//! data/
//! ├── expenses.csv
//! └── settings.yaml
//! ```

pub mod csv;
pub mod traits;

pub use self::csv::CsvConnection;
pub use traits::*;
