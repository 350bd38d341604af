//! Upload orchestration
//!
//! - [`coordinator`] - the sequential submit loop
//! - [`summary`] - per-batch progress and the end-of-run summary

pub mod coordinator;
pub mod summary;

pub use coordinator::UploadCoordinator;
pub use summary::{Progress, UploadSummary};
