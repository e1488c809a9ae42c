//! # REST API for Expenses
//!
//! Endpoints for recording, browsing and summarizing expenses.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use super::error::{expense_error_response, json_rejection_response, query_rejection_response};
use super::mappers::{ExpenseMapper, SummaryMapper};
use crate::domain::ExpenseError;
use crate::AppState;
use shared::{ApiResponse, CreateExpenseRequest, DeleteExpenseResponse, ExpenseListRequest, UpdateExpenseRequest};

/// Create a router for expense related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route("/stats/summary", get(get_summary))
        .route(
            "/:id",
            get(get_expense).put(update_expense).delete(delete_expense),
        )
}

/// List expenses, newest first, with optional search/category/date filters
pub async fn list_expenses(
    State(state): State<AppState>,
    query: Result<Query<ExpenseListRequest>, QueryRejection>,
) -> impl IntoResponse {
    let Query(request) = match query {
        Ok(query) => query,
        Err(rejection) => return query_rejection_response(rejection),
    };
    info!("GET /api/expenses - query: {:?}", request);

    let query = match ExpenseMapper::to_list_query(request) {
        Ok(query) => query,
        Err(errors) => {
            return expense_error_response("list expenses", ExpenseError::Validation(errors))
        }
    };

    match state.expense_service.list_expenses(&query).await {
        Ok(expenses) => {
            let dtos: Vec<_> = expenses.into_iter().map(ExpenseMapper::to_dto).collect();
            (StatusCode::OK, Json(ApiResponse::ok(dtos))).into_response()
        }
        Err(e) => expense_error_response("list expenses", e),
    }
}

/// Record a new expense
pub async fn create_expense(
    State(state): State<AppState>,
    payload: Result<Json<CreateExpenseRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection_response(rejection),
    };
    info!("POST /api/expenses - request: {:?}", request);

    match state
        .expense_service
        .create_expense(ExpenseMapper::to_save_command(request))
        .await
    {
        Ok(expense) => (
            StatusCode::CREATED,
            Json(ApiResponse::ok_with_message(
                ExpenseMapper::to_dto(expense),
                "Expense added successfully",
            )),
        )
            .into_response(),
        Err(e) => expense_error_response("create expense", e),
    }
}

pub async fn get_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/expenses/{}", expense_id);

    match state.expense_service.get_expense(&expense_id).await {
        Ok(expense) => {
            (StatusCode::OK, Json(ApiResponse::ok(ExpenseMapper::to_dto(expense)))).into_response()
        }
        Err(e) => expense_error_response("get expense", e),
    }
}

/// Replace every field of an existing expense
pub async fn update_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
    payload: Result<Json<UpdateExpenseRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection_response(rejection),
    };
    info!("PUT /api/expenses/{} - request: {:?}", expense_id, request);

    match state
        .expense_service
        .update_expense(&expense_id, ExpenseMapper::to_save_command(request))
        .await
    {
        Ok(expense) => (
            StatusCode::OK,
            Json(ApiResponse::ok_with_message(
                ExpenseMapper::to_dto(expense),
                "Expense updated successfully",
            )),
        )
            .into_response(),
        Err(e) => expense_error_response("update expense", e),
    }
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/expenses/{}", expense_id);

    match state.expense_service.delete_expense(&expense_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::ok_with_message(
                DeleteExpenseResponse { id: expense_id },
                "Expense deleted successfully",
            )),
        )
            .into_response(),
        Err(e) => expense_error_response("delete expense", e),
    }
}

/// Dashboard statistics for the current day and month
pub async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/expenses/stats/summary");

    match state.expense_service.summarize().await {
        Ok(summary) => {
            (StatusCode::OK, Json(ApiResponse::ok(SummaryMapper::to_dto(summary)))).into_response()
        }
        Err(e) => expense_error_response("summarize expenses", e),
    }
}
