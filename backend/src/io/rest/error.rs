//! Translation of domain errors into HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ApiResponse;
use tracing::{error, warn};

use crate::domain::{ExpenseError, SettingsError};

const STORAGE_FAILURE_MESSAGE: &str = "Internal storage error";

fn envelope(status: StatusCode, message: String) -> Response {
    (status, Json(ApiResponse::<()>::error(message))).into_response()
}

impl IntoResponse for ExpenseError {
    fn into_response(self) -> Response {
        match self {
            ExpenseError::Validation(_) => envelope(StatusCode::BAD_REQUEST, self.to_string()),
            ExpenseError::NotFound(_) => envelope(StatusCode::NOT_FOUND, self.to_string()),
            ExpenseError::Storage(_) => envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                STORAGE_FAILURE_MESSAGE.to_string(),
            ),
        }
    }
}

impl IntoResponse for SettingsError {
    fn into_response(self) -> Response {
        match self {
            SettingsError::Storage(_) => envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                STORAGE_FAILURE_MESSAGE.to_string(),
            ),
            _ => envelope(StatusCode::BAD_REQUEST, self.to_string()),
        }
    }
}

/// Log a failed expense operation at a level matching its cause, then convert it
pub fn expense_error_response(action: &str, e: ExpenseError) -> Response {
    match &e {
        ExpenseError::Storage(inner) => error!("Failed to {}: {:#}", action, inner),
        _ => warn!("Failed to {}: {}", action, e),
    }
    e.into_response()
}

pub fn settings_error_response(action: &str, e: SettingsError) -> Response {
    match &e {
        SettingsError::Storage(inner) => error!("Failed to {}: {:#}", action, inner),
        _ => warn!("Failed to {}: {}", action, e),
    }
    e.into_response()
}

/// Malformed JSON bodies get the same envelope as validation failures
pub fn json_rejection_response(rejection: JsonRejection) -> Response {
    warn!("Rejected request body: {}", rejection.body_text());
    envelope(StatusCode::BAD_REQUEST, rejection.body_text())
}

/// Query strings that fail to deserialize are reported like bad filter values
pub fn query_rejection_response(rejection: QueryRejection) -> Response {
    warn!("Rejected query string: {}", rejection.body_text());
    envelope(StatusCode::BAD_REQUEST, rejection.body_text())
}
