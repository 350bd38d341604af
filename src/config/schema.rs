//! Configuration schema types
//!
//! This module defines the configuration structure that maps to `svcreg.toml`.

use crate::config::AuthField;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Main svcreg configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvcregConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// CSV input settings
    pub source: SourceConfig,

    /// Remote registration API settings
    pub api: ApiConfig,

    /// Pipeline pacing and flushing
    #[serde(default)]
    pub upload: UploadConfig,

    /// Ledger file locations
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SvcregConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.source.validate()?;
        self.api.validate()?;
        self.upload.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (plan batches without submitting them)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// CSV input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path of the CSV export
    pub path: String,

    /// Spreadsheet row of the first record to send (the header is row 1)
    ///
    /// Records above this row are dropped before numbering, so the default of
    /// `2` sends everything and row ids match spreadsheet row numbers.
    #[serde(default = "default_start_row")]
    pub start_row: u64,
}

impl SourceConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("source.path cannot be empty".to_string());
        }
        if self.start_row == 0 {
            return Err("source.start_row must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Retry configuration for transport failures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Fixed delay between attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Remote registration API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Endpoint receiving the form POST
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Maximum line items per request
    #[serde(default = "default_max_per_request")]
    pub max_per_request: usize,

    /// Fixed authentication fields, sent first and in this order
    #[serde(default)]
    pub auth: Vec<AuthField>,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("api.url cannot be empty".to_string());
        }

        let parsed =
            url::Url::parse(&self.url).map_err(|e| format!("api.url is not a valid URL: {e}"))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err("api.url must start with http:// or https://".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("api.timeout_seconds must be > 0".to_string());
        }

        if !(1..=100).contains(&self.max_per_request) {
            return Err(format!(
                "api.max_per_request must be between 1 and 100, got {}",
                self.max_per_request
            ));
        }

        if self.retry.max_retries > 10 {
            return Err(format!(
                "api.retry.max_retries must be <= 10, got {}",
                self.retry.max_retries
            ));
        }

        let mut seen = HashSet::new();
        for field in &self.auth {
            if field.name.trim().is_empty() {
                return Err("api.auth field names cannot be empty".to_string());
            }
            if !seen.insert(field.name.as_str()) {
                return Err(format!("Duplicate api.auth field '{}'", field.name));
            }
            if field.value.expose_secret().is_empty() {
                return Err(format!("api.auth field '{}' has an empty value", field.name));
            }
        }

        Ok(())
    }
}

/// Pipeline pacing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Pause after every batch in milliseconds
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    /// Rewrite the ledger files every time this many more rows were submitted
    #[serde(default = "default_flush_every")]
    pub flush_every: usize,
}

impl UploadConfig {
    fn validate(&self) -> Result<(), String> {
        if self.flush_every == 0 {
            return Err("upload.flush_every must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            batch_delay_ms: default_batch_delay_ms(),
            flush_every: default_flush_every(),
        }
    }
}

/// Ledger file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_success_log")]
    pub success_log: String,

    #[serde(default = "default_error_log")]
    pub error_log: String,

    /// Sorted list of errored row ids, one per line
    #[serde(default = "default_error_rows")]
    pub error_rows: String,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        for (key, value) in [
            ("output.success_log", &self.success_log),
            ("output.error_log", &self.error_log),
            ("output.error_rows", &self.error_rows),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{key} cannot be empty"));
            }
        }

        if self.success_log == self.error_log
            || self.success_log == self.error_rows
            || self.error_log == self.error_rows
        {
            return Err("output paths must be distinct".to_string());
        }

        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            success_log: default_success_log(),
            error_log: default_error_log(),
            error_rows: default_error_rows(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_start_row() -> u64 {
    2
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_per_request() -> usize {
    2
}

fn default_max_retries() -> usize {
    5
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_batch_delay_ms() -> u64 {
    400
}

fn default_flush_every() -> usize {
    100
}

fn default_success_log() -> String {
    "success_log.csv".to_string()
}

fn default_error_log() -> String {
    "error_log.csv".to_string()
}

fn default_error_rows() -> String {
    "error_rows.txt".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
