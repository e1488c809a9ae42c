//! # Expense Tracker Backend
//!
//! Everything behind the HTTP boundary of the expense tracker:
//!
//! ```text
//! IO Layer (REST API, handlers, mappers)
//!     ↓
//! Domain Layer (validation, services, summary aggregation)
//!     ↓
//! Storage Layer (CSV/YAML files in the data directory)
//! ```
//!
//! [`initialize_backend`] wires the layers together from a [`ServerConfig`]
//! and [`create_router`] exposes them under `/api`.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::ServerConfig;
use domain::{Clock, ExpenseService, ExportService, SettingsService, SystemClock};
use storage::CsvConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub expense_service: ExpenseService<CsvConnection>,
    pub settings_service: SettingsService<CsvConnection>,
    pub export_service: ExportService,
    pub clock: Arc<dyn Clock>,
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    build_app_state(&config.data_directory, Arc::new(SystemClock))
}

/// Open the data directory and build every service on top of it
pub fn build_app_state(data_directory: &Path, clock: Arc<dyn Clock>) -> Result<AppState> {
    info!("Opening data directory {}", data_directory.display());
    let connection = Arc::new(CsvConnection::new(data_directory)?);

    info!("Setting up domain services");
    let expense_service = ExpenseService::new(connection.clone(), clock.clone());
    let settings_service = SettingsService::new(connection);
    let export_service = ExportService::new();

    Ok(AppState {
        expense_service,
        settings_service,
        export_service,
        clock,
    })
}

/// Create the application router with CORS and request tracing
pub fn create_router(app_state: AppState, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/expenses", io::rest::expense_apis::router())
        .nest("/reports", io::rest::export_apis::router())
        .nest("/settings", io::rest::settings_apis::router())
        .route("/health", get(io::rest::health_apis::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use crate::domain::FixedClock;
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn setup_test_router() -> (Router, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()));
        let state = build_app_state(temp_dir.path(), clock).unwrap();
        let router = create_router(state, HeaderValue::from_static("http://localhost:3001"));
        (router, temp_dir)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app, _temp_dir) = setup_test_router();

        let response = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_expense_flow_through_full_router() {
        let (app, _temp_dir) = setup_test_router();

        let create = Request::builder()
            .method("POST")
            .uri("/api/expenses")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "amount": 19.99,
                    "category": "Entertainment",
                    "date": "2026-10-19",
                    "description": "Concert",
                })
                .to_string(),
            ))
            .unwrap();
        let response = app.clone().oneshot(create).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/expenses/stats/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["todayTotal"], 19.99);
        assert_eq!(body["data"]["categoryBreakdown"][0]["_id"], "Entertainment");
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_configured_origin() {
        let (app, _temp_dir) = setup_test_router();

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/expenses")
                    .header(header::ORIGIN, "http://localhost:3001")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3001"
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let (app, _temp_dir) = setup_test_router();

        let response = app
            .oneshot(Request::builder().uri("/api/nothing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
