//! Store error taxonomy.

use feeder_core::WriteFailure;
use thiserror::Error;

/// Errors reported by a document store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Structured error returned by the store (throttling, conflict, validation, ...).
    #[error("Store returned status {code}: {message}")]
    Status { code: i32, message: String },

    /// The client could not reach the store or lost the connection.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Database or container provisioning failed.
    #[error("Setup error: {0}")]
    Setup(String),

    /// Anything the backend could not classify.
    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Status code, when the store provided one.
    pub fn status_code(&self) -> Option<i32> {
        match self {
            StoreError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<StoreError> for WriteFailure {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Status { code, message } => WriteFailure::Status { code, message },
            other => WriteFailure::Unclassified(other.to_string()),
        }
    }
}
