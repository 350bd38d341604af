//! Domain error types
//!
//! This module defines the error hierarchy for svcreg.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main svcreg error type
///
/// Only run-terminating conditions end up here. Per-row failures are never
/// raised as errors; they become [`ErrorRecord`](super::ErrorRecord)s in the ledger.
#[derive(Debug, Error)]
pub enum SvcregError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input file could not be opened or decoded
    #[error("Source error: {0}")]
    Source(String),

    /// Ledger files could not be written
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// A batch that could not be delivered after every attempt was spent
///
/// Only connection, timeout and body-read errors qualify. An HTTP response
/// with an application error code is a delivered batch, not a transport failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Request failed after {attempts} attempt(s): {detail}")]
pub struct TransportFailure {
    /// Number of attempts made, including the first one
    pub attempts: usize,

    /// Detail of the last error observed
    pub detail: String,
}

impl TransportFailure {
    /// Creates a new transport failure
    pub fn new(attempts: usize, detail: impl Into<String>) -> Self {
        Self {
            attempts,
            detail: detail.into(),
        }
    }
}

// CSV records are only written while rendering the ledger; the reader maps
// its own errors to `Source`
impl From<csv::Error> for SvcregError {
    fn from(err: csv::Error) -> Self {
        SvcregError::Ledger(format!("CSV error: {err}"))
    }
}
