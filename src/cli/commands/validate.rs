//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// `load_config` already validates, so a loaded config is a valid one.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Input: {}", config.source.path);
        println!("  Start Row: {}", config.source.start_row);
        println!("  Endpoint: {}", config.api.url);
        println!("  Timeout: {}s", config.api.timeout_seconds);
        println!("  Items per Request: {}", config.api.max_per_request);
        println!(
            "  Auth Fields: {}",
            config
                .api
                .auth
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!(
            "  Retry: {} retries, {} ms apart",
            config.api.retry.max_retries, config.api.retry.retry_delay_ms
        );
        println!("  Batch Delay: {} ms", config.upload.batch_delay_ms);
        println!("  Flush Every: {} rows", config.upload.flush_every);
        println!("  Success Log: {}", config.output.success_log);
        println!("  Error Log: {}", config.output.error_log);
        println!("  Error Rows: {}", config.output.error_rows);
        println!();

        Ok(0)
    }
}
