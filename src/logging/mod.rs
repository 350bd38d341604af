//! Logging and observability
//!
//! Structured logging through `tracing`, with:
//! - Configurable log levels (`RUST_LOG` overrides the configured level)
//! - Console output on stderr, leaving stdout to progress lines
//! - Optional JSON file logging with daily or hourly rotation
//!
//! # Example
//!
//! ```no_run
//! use svcreg::logging::init_logging;
//! use svcreg::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the submission of one batch
///
/// # Example
///
/// ```no_run
/// use svcreg::log_batch_submitted;
///
/// log_batch_submitted!(3, 2, 68171);
/// ```
#[macro_export]
macro_rules! log_batch_submitted {
    ($batch:expr, $items:expr, $first_row:expr) => {
        tracing::debug!(
            batch = $batch,
            items = $items,
            first_row = $first_row,
            "Submitting batch"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use svcreg::log_retry_attempt;
///
/// log_retry_attempt!(2, 6, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = $reason,
            "Retrying request"
        );
    };
}
