//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for svcreg using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// svcreg - CSV to service-registration batch uploader
#[derive(Parser, Debug)]
#[command(name = "svcreg")]
#[command(version, about, long_about = None)]
#[command(author = "Svcreg Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "svcreg.toml", env = "SVCREG_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SVCREG_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload the CSV export to the registration API
    Upload(commands::upload::UploadArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
