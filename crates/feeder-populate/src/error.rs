//! Error types for the populator.

use thiserror::Error;

/// Errors that abort a run.
///
/// Per-document write failures never show up here; they are recorded as
/// [`feeder_core::WriteOutcome::Failure`] in the cycle result.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// Database or container setup failed.
    #[error("Store setup failed: {0}")]
    Setup(#[from] feeder_store::StoreError),

    /// Generator configuration error.
    #[error("Generator error: {0}")]
    Generator(#[from] feeder_generator::GeneratorError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
