//! Player write-path errors

use thiserror::Error;
use uuid::Uuid;

use crate::store::StoreError;

/// Result type for player writes
pub type PlayerResult<T> = Result<T, PlayerError>;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Name, date of birth, position, and country are required")]
    MissingRequiredFields,

    #[error("Name and date of birth are required")]
    MissingIdentity,

    #[error("Invalid date format for date of birth")]
    InvalidDateOfBirth,

    /// A date other than the date of birth did not parse
    #[error("Invalid date format for {field}: {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("A player with the same name and date of birth already exists")]
    Duplicate,

    #[error("Player not found")]
    NotFound(Uuid),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for PlayerError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateIdentity { .. } => PlayerError::Duplicate,
            other => PlayerError::Store(other),
        }
    }
}

impl PlayerError {
    /// True for errors caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        !matches!(self, PlayerError::Store(_) | PlayerError::NotFound(_))
    }

    /// Short type name reported alongside the message
    pub fn kind(&self) -> &'static str {
        match self {
            PlayerError::MissingRequiredFields
            | PlayerError::MissingIdentity
            | PlayerError::InvalidDateOfBirth
            | PlayerError::InvalidDate { .. } => "ValidationError",
            PlayerError::Duplicate => "DuplicateError",
            PlayerError::NotFound(_) => "NotFound",
            PlayerError::Store(_) => "StoreError",
        }
    }
}
