//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::SvcregConfig;
use crate::domain::errors::SvcregError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into SvcregConfig
/// 4. Applies environment variable overrides (SVCREG_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced variable is
/// unset, TOML parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use svcreg::config::loader::load_config;
///
/// let config = load_config("svcreg.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SvcregConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(SvcregError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        SvcregError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: SvcregConfig = toml::from_str(&contents)
        .map_err(|e| SvcregError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        SvcregError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| SvcregError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(SvcregError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using SVCREG_* prefix
///
/// Variables follow the pattern SVCREG_<SECTION>_<KEY>, for example
/// SVCREG_API_URL or SVCREG_UPLOAD_FLUSH_EVERY. Unparseable numeric values are
/// rejected rather than ignored.
fn apply_env_overrides(config: &mut SvcregConfig) -> Result<()> {
    if let Ok(val) = std::env::var("SVCREG_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(dry_run) = parse_override("SVCREG_APPLICATION_DRY_RUN")? {
        config.application.dry_run = dry_run;
    }

    if let Ok(val) = std::env::var("SVCREG_SOURCE_PATH") {
        config.source.path = val;
    }
    if let Some(start_row) = parse_override("SVCREG_SOURCE_START_ROW")? {
        config.source.start_row = start_row;
    }

    if let Ok(val) = std::env::var("SVCREG_API_URL") {
        config.api.url = val;
    }
    if let Some(timeout) = parse_override("SVCREG_API_TIMEOUT_SECONDS")? {
        config.api.timeout_seconds = timeout;
    }
    if let Some(max_per) = parse_override("SVCREG_API_MAX_PER_REQUEST")? {
        config.api.max_per_request = max_per;
    }
    if let Some(retries) = parse_override("SVCREG_API_RETRY_MAX_RETRIES")? {
        config.api.retry.max_retries = retries;
    }
    if let Some(delay) = parse_override("SVCREG_API_RETRY_DELAY_MS")? {
        config.api.retry.retry_delay_ms = delay;
    }

    if let Some(delay) = parse_override("SVCREG_UPLOAD_BATCH_DELAY_MS")? {
        config.upload.batch_delay_ms = delay;
    }
    if let Some(flush_every) = parse_override("SVCREG_UPLOAD_FLUSH_EVERY")? {
        config.upload.flush_every = flush_every;
    }

    Ok(())
}

fn parse_override<T: std::str::FromStr>(var_name: &str) -> Result<Option<T>> {
    match std::env::var(var_name) {
        Ok(val) => val.trim().parse().map(Some).map_err(|_| {
            SvcregError::Configuration(format!("Invalid value for {var_name}: '{val}'"))
        }),
        Err(_) => Ok(None),
    }
}
