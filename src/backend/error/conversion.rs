/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse` from Axum, allowing them to be
 * returned directly from handlers and middleware.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "success": false,
 *   "message": "Invalid or expired token"
 * }
 * ```
 */

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Json, Response};
use crate::backend::error::types::BackendError;

/// A body that is not JSON, has the wrong shape or lacks the JSON content
/// type is a validation failure like any other bad payload.
impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("[Error] Rejected request body ({}): {}", rejection.status(), rejection.body_text());
        BackendError::validation(rejection.body_text())
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("[Error] {} ({})", self, status);
        } else {
            tracing::debug!("[Error] {} ({})", self, status);
        }

        let body = serde_json::json!({
            "success": false,
            "message": self.message(),
        });

        (status, Json(body)).into_response()
    }
}
