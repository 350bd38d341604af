//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "svcreg.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing svcreg configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Put the API credentials in a .env file:");
                println!("     - SVCREG_API_USER_NAME");
                println!("     - SVCREG_API_PASSWORD");
                println!("     - SVCREG_API_IP");
                println!("     - SVCREG_API_LAB_ID");
                println!("  3. Validate configuration: svcreg validate-config");
                println!("  4. Run the upload: svcreg upload");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate the sample configuration
    pub fn generate_config() -> String {
        r#"# svcreg Configuration File
# CSV to service-registration batch uploader

[application]
log_level = "info"
dry_run = false

[source]
# CSV export, first line is the header
path = "export.csv"
# Spreadsheet row number of the first row to send (header = row 1)
start_row = 2

[api]
url = "https://registry.example.com/api/add_service"
timeout_seconds = 30
# Items per request for one (type, person, company) group
max_per_request = 2

# Credential fields sent with every request
[[api.auth]]
name = "user_name"
value = "${SVCREG_API_USER_NAME}"

[[api.auth]]
name = "password"
value = "${SVCREG_API_PASSWORD}"

[[api.auth]]
name = "ip"
value = "${SVCREG_API_IP}"

[[api.auth]]
name = "lab_id"
value = "${SVCREG_API_LAB_ID}"

[api.retry]
# Retries after the first attempt, transport failures only
max_retries = 5
retry_delay_ms = 1000

[upload]
# Pause between batches
batch_delay_ms = 400
# Rewrite the output files after this many processed rows
flush_every = 100

[output]
success_log = "success_log.csv"
error_log = "error_log.csv"
error_rows = "error_rows.txt"

[logging]
# JSON log file in addition to stderr
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }
}
