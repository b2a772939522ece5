//! # API Errors
//!
//! Maps listing and write-path errors onto HTTP statuses and the failure
//! envelope `{success: false, message, error, errorType}`.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::players::PlayerError;
use crate::query::QueryError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// One variant per operation, so store failures report which operation failed
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Error fetching players")]
    Listing(#[source] QueryError),

    #[error("Error creating player")]
    Create(#[source] PlayerError),

    #[error("Error checking duplicate player")]
    CheckDuplicate(#[source] PlayerError),

    #[error("Error updating player")]
    Update(#[source] PlayerError),

    /// Body or path could not be decoded
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Handler did not finish within the limit
    #[error("Request timed out")]
    Timeout(Duration),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Listing(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Listing(_) => StatusCode::INTERNAL_SERVER_ERROR,

            ApiError::Create(e) | ApiError::CheckDuplicate(e) | ApiError::Update(e) => match e {
                PlayerError::NotFound(_) => StatusCode::NOT_FOUND,
                PlayerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },

            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
        }
    }

    /// Caller-facing summary.
    ///
    /// Input errors carry their own message; server failures get the
    /// operation's generic one.
    pub fn message(&self) -> String {
        match self {
            ApiError::Listing(e) if e.is_client_error() => e.to_string(),
            ApiError::Create(e) | ApiError::CheckDuplicate(e) | ApiError::Update(e)
                if !matches!(e, PlayerError::Store(_)) =>
            {
                e.to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Underlying error text
    pub fn detail(&self) -> String {
        match self {
            ApiError::Listing(e) => e.to_string(),
            ApiError::Create(e) | ApiError::CheckDuplicate(e) | ApiError::Update(e) => {
                e.to_string()
            }
            ApiError::InvalidRequest(reason) => reason.clone(),
            ApiError::Timeout(limit) => {
                format!("no response within {} ms", limit.as_millis())
            }
        }
    }

    /// Error type name
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Listing(e) => e.kind(),
            ApiError::Create(e) | ApiError::CheckDuplicate(e) | ApiError::Update(e) => e.kind(),
            ApiError::InvalidRequest(_) => "ValidationError",
            ApiError::Timeout(_) => "TimeoutError",
        }
    }
}

/// Failure envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
    pub error: String,
    pub error_type: String,
}

impl From<&ApiError> for ErrorEnvelope {
    fn from(err: &ApiError) -> Self {
        Self {
            success: false,
            message: err.message(),
            error: err.detail(),
            error_type: err.error_type().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorEnvelope::from(&self));
        (status, body).into_response()
    }
}
