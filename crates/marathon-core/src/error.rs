//! JSON envelope shared by every endpoint.
//!
//! Success: `{"success": true, ...payload}`.
//! Failure: `{"success": false, "kind": "<CODE>", "error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Wraps a payload struct and flattens it next to `"success": true`.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    payload: T,
}

impl<T: Serialize> Success<T> {
    pub fn new(payload: T) -> Self {
        Self {
            success: true,
            payload,
        }
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        axum::Json(self).into_response()
    }
}

/// Render a failure body. Service error enums call this from their
/// `IntoResponse` impls after choosing the status and kind.
pub fn failure(status: StatusCode, kind: &str, message: &str) -> Response {
    let body = serde_json::json!({
        "success": false,
        "kind": kind,
        "error": message,
    });
    (status, axum::Json(body)).into_response()
}
