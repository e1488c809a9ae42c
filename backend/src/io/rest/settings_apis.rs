//! # REST API for User Settings

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use super::error::{json_rejection_response, settings_error_response};
use crate::AppState;
use shared::{ApiResponse, UserSettings};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_settings).put(update_settings))
}

pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/settings");

    match state.settings_service.get_settings().await {
        Ok(settings) => (StatusCode::OK, Json(ApiResponse::ok(settings))).into_response(),
        Err(e) => settings_error_response("load settings", e),
    }
}

/// Replace the stored settings as a whole
pub async fn update_settings(
    State(state): State<AppState>,
    payload: Result<Json<UserSettings>, JsonRejection>,
) -> impl IntoResponse {
    let Json(settings) = match payload {
        Ok(json) => json,
        Err(rejection) => return json_rejection_response(rejection),
    };
    info!("PUT /api/settings - request: {:?}", settings);

    match state.settings_service.update_settings(settings).await {
        Ok(saved) => (
            StatusCode::OK,
            Json(ApiResponse::ok_with_message(saved, "Settings saved successfully")),
        )
            .into_response(),
        Err(e) => settings_error_response("save settings", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_app_state;
    use crate::domain::clock::SystemClock;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn setup_test_app() -> (Router, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let state = build_app_state(temp_dir.path(), Arc::new(SystemClock)).unwrap();
        (router().with_state(state), temp_dir)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn put(body: Value) -> Request<Body> {
        Request::builder()
            .method("PUT")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_defaults() {
        let (app, _temp_dir) = setup_test_app();

        let (status, body) = send(&app, Request::builder().uri("/").body(Body::empty()).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["profile"]["fullName"], "John Doe");
        assert_eq!(body["data"]["notifications"]["weekly"], false);
        assert_eq!(body["data"]["appearance"]["currency"], "USD ($)");
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let (app, _temp_dir) = setup_test_app();

        let (status, body) = send(
            &app,
            put(json!({
                "profile": { "fullName": "  Jane Roe ", "email": "jane@example.org" },
                "notifications": { "email": false, "budget": true, "weekly": true },
                "appearance": { "theme": "Dark", "currency": "EUR (€)" },
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["profile"]["fullName"], "Jane Roe");

        let (_, body) = send(&app, Request::builder().uri("/").body(Body::empty()).unwrap()).await;
        assert_eq!(body["data"]["appearance"]["theme"], "Dark");
        assert_eq!(body["data"]["notifications"]["email"], false);
    }

    #[tokio::test]
    async fn test_put_invalid_email() {
        let (app, _temp_dir) = setup_test_app();

        let (status, body) = send(
            &app,
            put(json!({
                "profile": { "fullName": "Jane", "email": "not-an-email" },
                "notifications": { "email": true, "budget": true, "weekly": false },
                "appearance": { "theme": "Light", "currency": "USD ($)" },
            })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "'not-an-email' is not a valid email address");
    }
}
