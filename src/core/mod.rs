//! Core business logic
//!
//! - [`normalize`] - cleaning and numbering input rows
//! - [`partition`] - grouping rows into request batches
//! - [`reconcile`] - mapping API responses to per-row outcomes
//! - [`ledger`] - accumulating outcomes and writing the logs
//! - [`upload`] - the pipeline that ties them together

pub mod ledger;
pub mod normalize;
pub mod partition;
pub mod reconcile;
pub mod upload;
