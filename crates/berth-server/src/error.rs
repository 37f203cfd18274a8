//! HTTP error mapping for the API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use berth_common::error::BerthError;
use thiserror::Error;

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A core operation failed.
    #[error(transparent)]
    Core(#[from] BerthError),

    /// The `{action}` path segment is not `start`, `stop`, or `delete`.
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// A request parameter is missing or empty.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Core(
                BerthError::NotFound { .. }
                | BerthError::UnknownAlias { .. }
                | BerthError::UnknownProject { .. },
            ) => StatusCode::NOT_FOUND,
            Self::Core(BerthError::Runtime { .. }) => StatusCode::BAD_GATEWAY,
            Self::Core(
                BerthError::StorageCorrupt { .. } | BerthError::StorageUnwritable { .. },
            ) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidAction(_) | Self::InvalidParameter(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.to_string()
        });

        (status, axum::Json(body)).into_response()
    }
}
