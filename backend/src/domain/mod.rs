//! # Domain Module
//!
//! Business logic for the expense tracker, independent of HTTP and of the
//! storage backend.
//!
//! - **summary_aggregator**: pure dashboard/report statistics
//! - **expense_service**: validation, CRUD, list filtering, summaries
//! - **settings_service**: user preferences
//! - **export_service**: CSV rendering for report downloads
//! - **clock**: injectable source of "today"
//! - **commands**: internal command/query types the REST layer maps into

pub mod clock;
pub mod commands;
pub mod expense_service;
pub mod export_service;
pub mod models;
pub mod settings_service;
pub mod summary_aggregator;

pub use clock::*;
pub use expense_service::*;
pub use export_service::*;
pub use settings_service::*;
pub use summary_aggregator::*;
