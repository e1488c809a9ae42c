//! # REST API
//!
//! All endpoints live under `/api` and answer with the
//! [`shared::ApiResponse`] envelope:
//!
//! - `GET|POST /api/expenses`
//! - `GET|PUT|DELETE /api/expenses/:id`
//! - `GET /api/expenses/stats/summary`
//! - `GET /api/reports/export`
//! - `GET|PUT /api/settings`
//! - `GET /api/health`

pub mod error;
pub mod expense_apis;
pub mod export_apis;
pub mod health_apis;
pub mod mappers;
pub mod settings_apis;
