//! HTTP error mapping
//!
//! Every error leaves as `{ "error": <kind>, "message": <text> }`. Server-side
//! failures are logged in full and answered with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tinderbox_domain::TinderboxError;
use tracing::error;

/// Error body returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Domain error on its way out of a handler
#[derive(Debug)]
pub struct ApiError(pub TinderboxError);

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self(TinderboxError::Validation(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self(TinderboxError::NotFound(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TinderboxError::DuplicateAction(_) => StatusCode::BAD_REQUEST,
            TinderboxError::NotFound(_) => StatusCode::NOT_FOUND,
            TinderboxError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            TinderboxError::NotificationDelivery(_)
            | TinderboxError::Database(_)
            | TinderboxError::Config(_)
            | TinderboxError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TinderboxError> for ApiError {
    fn from(err: TinderboxError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let label = self.0.label();

        let message = if self.0.is_client_error() {
            client_message(self.0)
        } else {
            error!(error = %self.0, error_type = label, "request failed");
            "Internal server error".to_string()
        };

        (status, Json(ErrorBody { error: label, message })).into_response()
    }
}

fn client_message(err: TinderboxError) -> String {
    match err {
        TinderboxError::DuplicateAction(message)
        | TinderboxError::Validation(message)
        | TinderboxError::NotFound(message) => message,
        other => other.to_string(),
    }
}
