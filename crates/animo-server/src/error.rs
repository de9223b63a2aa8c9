//! API error type and its JSON rendering: `{"error": "..."}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use animo_auth::AuthError;
use animo_core::errors::CoreError;
use animo_db::error::DatabaseError;

/// Body of the 500 returned when a report cannot be produced.
pub const ANALYZE_FAILED: &str = "No se pudo analizar los datos";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::MissingToken | AuthError::InvalidToken => {
                Self::Unauthorized(error.to_string())
            }
            AuthError::Provider(_) | AuthError::NotConfigured(_) => {
                tracing::error!(%error, "identity provider failure");
                Self::Internal(error.to_string())
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::BadRequest(message),
            CoreError::Other(error) => Self::Internal(error.to_string()),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Core(core) => core.into(),
            other => {
                tracing::error!(error = %other, "storage failure");
                Self::Internal(other.to_string())
            }
        }
    }
}
