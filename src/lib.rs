// svcreg - CSV to Service Registration API Batch Uploader
// Copyright (c) 2025 Svcreg Contributors
// Licensed under the MIT License

//! # svcreg - CSV to service-registration batch uploader
//!
//! svcreg walks a CSV export once, groups its line items by subject, posts
//! them to a service-registration API in small form-encoded batches, and
//! records a success or error outcome for every row in local log files.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Normalization, batching, reconciliation, ledger, pipeline
//! - [`adapters`] - CSV source and registration API client
//! - [`domain`] - Rows, outcomes and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use svcreg::config::load_config;
//! use svcreg::core::upload::UploadCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("svcreg.toml")?;
//!     let coordinator = UploadCoordinator::new(config)?;
//!     let summary = coordinator.execute_upload().await?;
//!
//!     println!("Success: {} | Errors: {}", summary.successful_rows, summary.failed_rows);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! 1. Rows above `source.start_row` are dropped; the rest are numbered from it.
//! 2. Numeric columns keep only digits, `mobile` keeps the first `09xxxxxxxxx`.
//! 3. Rows are grouped by subject and cut into batches of `api.max_per_request`.
//! 4. Each batch is posted with up to `api.retry.max_retries` retries on
//!    transport errors.
//! 5. The response is reconciled to one outcome per row.
//! 6. Outcomes are flushed to the ledger files every `upload.flush_every` rows
//!    and at the end.
//!
//! ## Error Handling
//!
//! Per-row failures never stop the run; they are recorded in the error log.
//! Only an unreadable input, an unwritable ledger, or invalid configuration
//! produce a [`domain::SvcregError`].

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
