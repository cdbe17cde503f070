//! Error types for fyyur-web
//!
//! Every handler error is rendered as an HTML error page. Server faults are
//! logged here so handlers can simply propagate with `?`.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use fyyur_common::Error as CommonError;
use thiserror::Error;
use tracing::error;

use crate::pages::errors::error_page;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// fyyur-common error
    #[error("Common error: {0}")]
    Common(#[from] CommonError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Common(CommonError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Common(CommonError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server fault details stay in the log, not on the page
        let message = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "Something went wrong on our end. Please try again later.".to_string()
        } else {
            match self {
                ApiError::NotFound(msg)
                | ApiError::BadRequest(msg)
                | ApiError::Common(CommonError::NotFound(msg))
                | ApiError::Common(CommonError::InvalidInput(msg)) => msg,
                other => other.to_string(),
            }
        };

        (status, Html(error_page(status, &message))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
