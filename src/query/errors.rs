//! Listing query errors

use thiserror::Error;

use crate::store::StoreError;

/// Result type for listing queries
pub type QueryResult<T> = Result<T, QueryError>;

#[derive(Debug, Error)]
pub enum QueryError {
    /// A parameter could not be interpreted
    #[error("Invalid query parameter: {0}")]
    InvalidParam(String),

    /// `perPage` above the allowed maximum
    #[error("perPage {0} exceeds maximum {1}")]
    LimitExceeded(usize, usize),

    /// The store failed while running a pipeline
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl QueryError {
    /// True for errors caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            QueryError::InvalidParam(_) | QueryError::LimitExceeded(_, _)
        )
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::InvalidParam(_) => "ROSTER_QUERY_INVALID_PARAM",
            QueryError::LimitExceeded(_, _) => "ROSTER_QUERY_LIMIT_EXCEEDED",
            QueryError::Store(e) => e.code(),
        }
    }

    /// Short type name reported alongside the message
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::InvalidParam(_) => "InvalidParam",
            QueryError::LimitExceeded(_, _) => "LimitExceeded",
            QueryError::Store(_) => "StoreError",
        }
    }
}
