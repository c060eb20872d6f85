//! Error types for noise-api
//!
//! Every failure reaches the client as `{"error": "<message>"}` with the
//! matching status code. Nothing is retried.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use noise_common::api::ErrorResponse;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Entity absent (404)
    #[error("{0}")]
    NotFound(String),

    /// Malformed identifier or payload (400)
    #[error("{0}")]
    BadRequest(String),

    /// Storage or other internal failure (500)
    #[error("{0}")]
    Internal(String),
}

impl From<noise_common::Error> for ApiError {
    fn from(err: noise_common::Error) -> Self {
        match err {
            noise_common::Error::NotFound(msg) => ApiError::NotFound(msg),
            noise_common::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            // Storage errors keep their message in the body
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Internal(format!("IO error: {}", err))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
