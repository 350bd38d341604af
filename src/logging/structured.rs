//! Structured logging setup using tracing
//!
//! stderr always gets human-readable lines so stdout stays free for progress.
//! With `logging.local_enabled`, JSON records also go to `<local_path>/svcreg.log.*`.

use crate::config::LoggingConfig;
use crate::domain::{Result, SvcregError};
use std::str::FromStr;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "svcreg.log";

/// Keeps the background log writer alive; drop it last
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file_writer: Option<WorkerGuard>,
}

/// Initialize the logging system
///
/// `RUST_LOG` wins over `level` when set.
///
/// # Example
///
/// ```no_run
/// use svcreg::logging::init_logging;
/// use svcreg::config::LoggingConfig;
///
/// let config = LoggingConfig::default();
/// let _guard = init_logging("info", &config).expect("Failed to initialize logging");
/// ```
///
/// # Errors
///
/// Fails on an unknown level or when the log directory cannot be created.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(level)?;

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(crate_filter(level))
        .boxed();

    let (file, file_writer) = match open_log_file(config)? {
        Some((writer, guard)) => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_writer(writer)
                .with_filter(crate_filter(level))
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();

    tracing::debug!(
        level = %level,
        file_logging = config.local_enabled,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_writer: file_writer,
    })
}

/// `RUST_LOG` if set, else this crate at `level`
fn crate_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("svcreg={level}")))
}

fn rotation(name: &str) -> Rotation {
    if name.eq_ignore_ascii_case("hourly") {
        Rotation::HOURLY
    } else {
        Rotation::DAILY
    }
}

fn open_log_file(config: &LoggingConfig) -> Result<Option<(NonBlocking, WorkerGuard)>> {
    if !config.local_enabled {
        return Ok(None);
    }

    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        SvcregError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            config.local_path
        ))
    })?;

    let appender = RollingFileAppender::new(
        rotation(&config.local_rotation),
        &config.local_path,
        LOG_FILE_PREFIX,
    );
    Ok(Some(tracing_appender::non_blocking(appender)))
}

/// Parse log level from string
fn parse_log_level(value: &str) -> Result<Level> {
    Level::from_str(value.trim()).map_err(|_| {
        SvcregError::Configuration(format!(
            "Invalid log level '{value}'. Must be one of: trace, debug, info, warn, error"
        ))
    })
}
