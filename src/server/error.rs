//! Error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::RtagsError;

/// An [`RtagsError`] on its way out of a handler.
///
/// Rendered as `{"detail": "..."}` with the status from
/// [`RtagsError::status_code`]. Errors from external backends carry a
/// context prefix naming the backend.
#[derive(Debug)]
pub struct ApiError {
    error: RtagsError,
    context: Option<String>,
}

impl ApiError {
    /// Attach `context` to backend errors; client errors pass through.
    pub fn backend(error: RtagsError, context: impl Into<String>) -> Self {
        let context = error.is_external().then(|| context.into());
        Self { error, context }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn detail(&self) -> String {
        match &self.context {
            Some(context) => format!("{context}: {}", self.error),
            None => self.error.to_string(),
        }
    }
}

impl From<RtagsError> for ApiError {
    fn from(error: RtagsError) -> Self {
        Self {
            error,
            context: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();
        if status.is_server_error() {
            error!(status = status.as_u16(), %detail, "request failed");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
