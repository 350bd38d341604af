//! Per-row outcomes produced by reconciliation

use serde::Serialize;

/// Error kind recorded when a batch never reached the API
pub const KIND_HTTP: &str = "HTTP";

/// Error kind recorded when the response body is not valid JSON
pub const KIND_JSON: &str = "JSON";

/// Error kind recorded when the result array is shorter than the batch
pub const KIND_API: &str = "API";

/// Message recorded alongside [`KIND_API`] for rows without a result item
pub const NO_MATCH_RESULT: &str = "no-match result";

/// A row the API accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessRecord {
    pub row_id: u64,
    pub service_id: String,
}

/// A row that failed, with the reported kind and message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub row_id: u64,
    pub error_kind: String,
    pub message: String,
}

/// Classification of one submitted row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(SuccessRecord),
    Error(ErrorRecord),
}

impl Outcome {
    pub fn success(row_id: u64, service_id: impl Into<String>) -> Self {
        Outcome::Success(SuccessRecord {
            row_id,
            service_id: service_id.into(),
        })
    }

    pub fn error(row_id: u64, error_kind: impl Into<String>, message: impl Into<String>) -> Self {
        Outcome::Error(ErrorRecord {
            row_id,
            error_kind: error_kind.into(),
            message: message.into(),
        })
    }

    /// Row this outcome belongs to
    pub fn row_id(&self) -> u64 {
        match self {
            Outcome::Success(s) => s.row_id,
            Outcome::Error(e) => e.row_id,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}
