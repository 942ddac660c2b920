// Error handling utilities and response helpers

use crate::error::FieldError;
use axum::{http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Helper to create a JSON error response
pub fn json_error(status: StatusCode, message: &str) -> impl IntoResponse {
    (
        status,
        axum::Json(json!({"success": false, "message": message})),
    )
}

/// Helper for "not found" errors
pub fn not_found(message: &str) -> impl IntoResponse {
    json_error(StatusCode::NOT_FOUND, message)
}

/// Helper for internal server errors
pub fn internal_error(message: &str) -> impl IntoResponse {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// Helper for bad request errors
pub fn bad_request(message: &str) -> impl IntoResponse {
    json_error(StatusCode::BAD_REQUEST, message)
}

/// Field-level validation failure body
pub fn validation_failed(errors: &[FieldError]) -> impl IntoResponse {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({"success": false, "errors": errors})),
    )
}
