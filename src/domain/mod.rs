//! Domain models and types for svcreg.
//!
//! The domain layer provides:
//! - **Input rows** ([`Row`]) and the identity they are grouped by ([`GroupKey`])
//! - **Per-row outcomes** ([`Outcome`], [`SuccessRecord`], [`ErrorRecord`])
//! - **Error types** ([`SvcregError`], [`TransportFailure`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Fallible operations return [`Result<T, SvcregError>`]:
//!
//! ```rust
//! use svcreg::domain::{SvcregError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(SvcregError::Source("empty export".to_string()))
//! }
//! ```

pub mod errors;
pub mod outcome;
pub mod result;
pub mod row;

// Re-export commonly used types
pub use errors::{SvcregError, TransportFailure};
pub use outcome::{ErrorRecord, Outcome, SuccessRecord};
pub use result::Result;
pub use row::{GroupKey, Row};
