//! Upload command implementation
//!
//! Exit codes: 0 all rows succeeded, 1 finished with row errors,
//! 2 configuration error, 5 fatal error (input or ledger I/O).

use crate::config::load_config;
use crate::core::upload::UploadCoordinator;
use clap::Args;

/// Arguments for the upload command
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Plan batches without submitting anything or writing ledger files
    #[arg(long)]
    pub dry_run: bool,

    /// Override the CSV input path
    #[arg(long)]
    pub input: Option<String>,

    /// Override the first spreadsheet row to send (header = row 1)
    #[arg(long)]
    pub start_row: Option<u64>,
}

impl UploadArgs {
    /// Execute the upload command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting upload command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if let Some(input) = &self.input {
            tracing::info!(input = %input, "Overriding input path from CLI");
            config.source.path = input.clone();
        }

        if let Some(start_row) = self.start_row {
            tracing::info!(start_row = start_row, "Overriding start row from CLI");
            config.source.start_row = start_row;
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        // CLI overrides can break what load_config already checked
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - Nothing will be submitted");
            println!();
        }

        if !self.yes && !config.application.dry_run {
            println!("Upload Configuration:");
            println!("  Input: {}", config.source.path);
            println!("  Start row: {}", config.source.start_row);
            println!("  Endpoint: {}", config.api.url);
            println!("  Items per request: {}", config.api.max_per_request);
            println!(
                "  Retries: {} (every {} ms)",
                config.api.retry.max_retries, config.api.retry.retry_delay_ms
            );
            println!("  Batch delay: {} ms", config.upload.batch_delay_ms);
            println!();
            print!("Proceed with upload? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Upload cancelled.");
                return Ok(0);
            }
        }

        let coordinator = match UploadCoordinator::new(config) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create upload coordinator");
                eprintln!("Failed to initialize upload: {e}");
                return Ok(5);
            }
        };

        println!("Reading CSV …");
        let summary = match coordinator.execute_upload().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Upload failed");
                eprintln!("Upload failed: {e}");
                return Ok(5);
            }
        };

        if summary.dry_run {
            println!(
                "Planned {} batch(es) for {} row(s)",
                summary.total_batches, summary.total_rows
            );
            return Ok(0);
        }

        println!(
            "✓ Finished | Success: {} | Errors: {}",
            summary.successful_rows, summary.failed_rows
        );

        let exit_code = if summary.is_successful() {
            0
        } else {
            println!(
                "⚠️  {} row(s) failed, see the error log",
                summary.errored_rows
            );
            1
        };

        Ok(exit_code)
    }
}
