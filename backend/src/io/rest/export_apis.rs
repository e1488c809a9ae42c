//! # REST API for Report Export
//!
//! Downloads the (optionally filtered) expense list as a CSV file.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::{error, info};

use super::error::{expense_error_response, query_rejection_response};
use super::mappers::ExpenseMapper;
use crate::domain::ExpenseError;
use crate::AppState;
use shared::{ApiResponse, ExpenseListRequest};

pub fn router() -> Router<AppState> {
    Router::new().route("/export", get(export_expenses_csv))
}

/// Export expenses as a CSV attachment, honoring the same filters as the list endpoint
pub async fn export_expenses_csv(
    State(state): State<AppState>,
    query: Result<Query<ExpenseListRequest>, QueryRejection>,
) -> Response {
    let Query(request) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection_response(rejection),
    };
    info!("GET /api/reports/export - query: {:?}", request);

    let query = match ExpenseMapper::to_list_query(request) {
        Ok(query) => query,
        Err(errors) => {
            return expense_error_response("export expenses", ExpenseError::Validation(errors))
        }
    };

    let expenses = match state.expense_service.list_expenses(&query).await {
        Ok(expenses) => expenses,
        Err(e) => return expense_error_response("export expenses", e),
    };

    match state.export_service.export_csv(&expenses) {
        Ok(csv) => {
            let file_name = state.export_service.export_file_name(state.clock.today());
            info!("Exported {} expenses as {}", expenses.len(), file_name);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", file_name),
                    ),
                ],
                csv,
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to render CSV export: {:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(ApiResponse::<()>::error("Failed to export expenses")),
            )
                .into_response()
        }
    }
}
