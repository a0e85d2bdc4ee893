//! Error-to-response mapping for the demo service

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bookrag_core::BookragError;
use serde_json::json;

/// Wrapper turning [`BookragError`] into a `{"error": ...}` JSON response
#[derive(Debug)]
pub struct ApiError(pub BookragError);

impl ApiError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self(BookragError::InvalidInput(msg.into()))
    }
}

impl From<BookragError> for ApiError {
    fn from(err: BookragError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            BookragError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            BookragError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
