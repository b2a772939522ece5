//! Document store errors
//!
//! Error codes:
//! - ROSTER_STORE_IO_ERROR
//! - ROSTER_STORE_DECODE_FAILED
//! - ROSTER_STORE_UNAVAILABLE
//! - ROSTER_STORE_DUPLICATE_ID
//! - ROSTER_STORE_DUPLICATE_IDENTITY
//! - ROSTER_STORE_NOT_FOUND

use std::io;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by a [`LeagueStore`](super::LeagueStore)
#[derive(Debug, Error)]
pub enum StoreError {
    /// Seed file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Seed file is not a valid collections document
    #[error("failed to decode collections: {0}")]
    Decode(#[from] serde_json::Error),

    /// The store cannot serve requests (poisoned lock, lost connection)
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Insert of a document whose id is already taken
    #[error("document {0} already exists")]
    DuplicateId(Uuid),

    /// Another player already has this name (case-insensitive) and
    /// date of birth
    #[error("player {name} born {date_of_birth} already exists")]
    DuplicateIdentity {
        name: String,
        date_of_birth: DateTime<Utc>,
    },

    /// Replace of a document that does not exist
    #[error("document {0} not found")]
    NotFound(Uuid),
}

impl StoreError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "ROSTER_STORE_IO_ERROR",
            StoreError::Decode(_) => "ROSTER_STORE_DECODE_FAILED",
            StoreError::Unavailable(_) => "ROSTER_STORE_UNAVAILABLE",
            StoreError::DuplicateId(_) => "ROSTER_STORE_DUPLICATE_ID",
            StoreError::DuplicateIdentity { .. } => "ROSTER_STORE_DUPLICATE_IDENTITY",
            StoreError::NotFound(_) => "ROSTER_STORE_NOT_FOUND",
        }
    }

    pub(crate) fn poisoned(collection: &str) -> Self {
        StoreError::Unavailable(format!("lock poisoned on {}", collection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            StoreError::Unavailable("down".to_string()).code(),
            "ROSTER_STORE_UNAVAILABLE"
        );
        assert_eq!(
            StoreError::NotFound(Uuid::nil()).code(),
            "ROSTER_STORE_NOT_FOUND"
        );
    }

    #[test]
    fn test_io_display_includes_path() {
        let err = StoreError::Io {
            path: PathBuf::from("/tmp/league.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        let display = err.to_string();
        assert!(display.contains("/tmp/league.json"));
        assert!(display.contains("missing"));
    }

    #[test]
    fn test_poisoned_message() {
        let err = StoreError::poisoned("players");
        assert_eq!(err.to_string(), "store unavailable: lock poisoned on players");
    }
}
