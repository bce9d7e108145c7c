//! Error types for sprout-core

use thiserror::Error;

/// Result type alias using sprout-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sprout-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Remote catalog request failed or returned malformed data
    #[error("Network error: {0}")]
    Network(String),

    /// Local plant store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Rejected input that must be corrected before anything is persisted
    #[error("Validation error: {0}")]
    Validation(String),

    /// The store refused to delete an owned plant
    #[error("Could not remove plant {id}: {reason}")]
    Removal { id: String, reason: String },

    /// Plant not found
    #[error("Plant not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be read or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether retrying the same operation later can succeed.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_network_errors_are_retryable() {
        assert!(Error::Network("timeout".into()).is_retryable());
        assert!(!Error::Storage("disk full".into()).is_retryable());
        assert!(!Error::Validation("past".into()).is_retryable());
    }

    #[test]
    fn removal_error_names_the_plant() {
        let error = Error::Removal {
            id: "7".into(),
            reason: "locked".into(),
        };
        assert_eq!(error.to_string(), "Could not remove plant 7: locked");
    }
}
