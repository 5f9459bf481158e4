//! Mapping of todo errors onto HTTP responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use tracing::error;

use crate::domains::todos::TodoError;

/// Error returned by REST handlers.
///
/// Bodies are always `{"message": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub TodoError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TodoError::Validation(_) => StatusCode::BAD_REQUEST,
            TodoError::NotFound(_) => StatusCode::NOT_FOUND,
            TodoError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            TodoError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn message(&self) -> String {
        match &self.0 {
            TodoError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(value: TodoError) -> Self {
        Self(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self(TodoError::validation(value.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }
        (status, Json(serde_json::json!({ "message": self.message() }))).into_response()
    }
}
