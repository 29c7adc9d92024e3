//! Unified error handling for the scenario API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;
use crate::scenarios::{FieldError, ScenarioError};

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request payload failed field validation.
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<ScenarioError> for AppError {
    fn from(error: ScenarioError) -> Self {
        match error {
            ScenarioError::Validation(errors) => Self::Validation(errors),
            ScenarioError::NotFound => Self::NotFound("Scenario not found".to_owned()),
            ScenarioError::Store(error) => Self::Store(error),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Store failures are infrastructural; capture them, and never echo
        // internal error text to callers.
        if matches!(self, Self::Store(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "API request error"
            );
        }

        match self {
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": errors })),
            )
                .into_response(),
            Self::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": message })),
            )
                .into_response(),
            Self::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal server error" })),
            )
                .into_response(),
        }
    }
}
