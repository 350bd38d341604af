//! Outcome ledger and its on-disk logs
//!
//! The ledger only grows. Every flush rewrites all three files from the full
//! ledger state, so the files never hold a delta and two flushes of the same
//! state are byte-identical.

use crate::config::OutputConfig;
use crate::domain::{ErrorRecord, Outcome, Result, SuccessRecord, SvcregError};
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Destination files for a flush
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerPaths {
    pub success_log: PathBuf,
    pub error_log: PathBuf,
    pub error_rows: PathBuf,
}

impl From<&OutputConfig> for LedgerPaths {
    fn from(config: &OutputConfig) -> Self {
        Self {
            success_log: PathBuf::from(&config.success_log),
            error_log: PathBuf::from(&config.error_log),
            error_rows: PathBuf::from(&config.error_rows),
        }
    }
}

/// Accumulated successes, errors and errored row ids
#[derive(Debug, Default, Clone)]
pub struct OutcomeLedger {
    successes: Vec<SuccessRecord>,
    errors: Vec<ErrorRecord>,
    errored_rows: BTreeSet<u64>,
}

impl OutcomeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one outcome
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success(success) => self.successes.push(success),
            Outcome::Error(error) => {
                self.errored_rows.insert(error.row_id);
                self.errors.push(error);
            }
        }
    }

    /// Appends outcomes in order
    pub fn extend(&mut self, outcomes: impl IntoIterator<Item = Outcome>) {
        for outcome in outcomes {
            self.record(outcome);
        }
    }

    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Distinct rows with at least one error
    pub fn errored_row_count(&self) -> usize {
        self.errored_rows.len()
    }

    /// Successes ordered by row id; ties keep insertion order
    pub fn sorted_successes(&self) -> Vec<&SuccessRecord> {
        let mut sorted: Vec<&SuccessRecord> = self.successes.iter().collect();
        sorted.sort_by_key(|s| s.row_id);
        sorted
    }

    /// Errors ordered by row id; ties keep insertion order
    pub fn sorted_errors(&self) -> Vec<&ErrorRecord> {
        let mut sorted: Vec<&ErrorRecord> = self.errors.iter().collect();
        sorted.sort_by_key(|e| e.row_id);
        sorted
    }

    /// Errored row ids, ascending and de-duplicated
    pub fn errored_rows(&self) -> impl Iterator<Item = u64> + '_ {
        self.errored_rows.iter().copied()
    }

    /// Rewrites all three ledger files from the current state
    ///
    /// # Errors
    ///
    /// Returns [`SvcregError::Ledger`] when a file cannot be written. This is
    /// fatal for the run.
    pub fn flush(&self, paths: &LedgerPaths) -> Result<()> {
        write_atomically(&paths.success_log, &self.render_successes()?)?;
        write_atomically(&paths.error_log, &self.render_errors()?)?;
        write_atomically(&paths.error_rows, &self.render_error_rows())?;

        tracing::debug!(
            successes = self.successes.len(),
            errors = self.errors.len(),
            errored_rows = self.errored_rows.len(),
            "Ledger flushed"
        );

        Ok(())
    }

    fn render_successes(&self) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(["row_id", "service_id"])?;
        for success in self.sorted_successes() {
            writer.serialize(success)?;
        }
        writer
            .into_inner()
            .map_err(|e| SvcregError::Ledger(format!("Failed to render success log: {e}")))
    }

    fn render_errors(&self) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(["row_id", "error_kind", "message"])?;
        for error in self.sorted_errors() {
            writer.serialize(error)?;
        }
        writer
            .into_inner()
            .map_err(|e| SvcregError::Ledger(format!("Failed to render error log: {e}")))
    }

    fn render_error_rows(&self) -> Vec<u8> {
        let mut out = String::new();
        for row_id in self.errored_rows() {
            out.push_str(&row_id.to_string());
            out.push('\n');
        }
        out.into_bytes()
    }
}

/// Writes to a sibling temp file, then renames it over `path`
fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let ledger_err =
        |e: std::io::Error| SvcregError::Ledger(format!("Failed to write {}: {e}", path.display()));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(ledger_err)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let mut file = fs::File::create(&tmp_path).map_err(ledger_err)?;
    file.write_all(contents).map_err(ledger_err)?;
    file.sync_all().map_err(ledger_err)?;
    drop(file);

    fs::rename(&tmp_path, path).map_err(ledger_err)?;
    Ok(())
}
