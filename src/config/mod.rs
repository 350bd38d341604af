//! Configuration management for svcreg.
//!
//! svcreg reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `SVCREG_<SECTION>_<KEY>` overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use svcreg::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("svcreg.toml")?;
//!
//! println!("Source: {}", config.source.path);
//! println!("Endpoint: {}", config.api.url);
//! println!("Items per request: {}", config.api.max_per_request);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level, dry run
//! - [`SourceConfig`] - CSV path and starting row
//! - [`ApiConfig`] - endpoint, timeout, items per request, auth fields, retry
//! - [`UploadConfig`] - inter-batch delay and flush interval
//! - [`OutputConfig`] - ledger file locations
//! - [`LoggingConfig`] - optional JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [source]
//! path = "export.csv"
//! start_row = 2
//!
//! [api]
//! url = "https://registry.example.com/api/add_service"
//! max_per_request = 2
//!
//! [[api.auth]]
//! name = "user_name"
//! value = "${SVCREG_API_USER}"
//!
//! [[api.auth]]
//! name = "password"
//! value = "${SVCREG_API_PASSWORD}"
//!
//! [api.retry]
//! max_retries = 5
//! retry_delay_ms = 1000
//!
//! [upload]
//! batch_delay_ms = 400
//! flush_every = 100
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApiConfig, ApplicationConfig, LoggingConfig, OutputConfig, RetryConfig, SourceConfig,
    SvcregConfig, UploadConfig,
};
pub use secret::{secret_string, AuthField, SecretString, SecretValue};
