//! Upload summary and progress reporting

use std::fmt;
use std::time::Duration;

/// Cumulative progress after a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Rows submitted so far
    pub done: usize,

    /// Rows retained for submission
    pub total: usize,

    /// Distinct rows with an error so far
    pub errored_rows: usize,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.done as f64 * 100.0 / self.total as f64
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}  ({:.1}%)  ({})",
            self.done,
            self.total,
            self.percent(),
            self.errored_rows
        )
    }
}

/// Summary of an upload run
#[derive(Debug, Clone, Default)]
pub struct UploadSummary {
    /// Rows retained after the starting-row cut
    pub total_rows: usize,

    /// Batches planned
    pub total_batches: usize,

    /// Rows that went through reconciliation
    pub submitted_rows: usize,

    /// Success records
    pub successful_rows: usize,

    /// Error records
    pub failed_rows: usize,

    /// Distinct row ids with an error record
    pub errored_rows: usize,

    /// Batches that never got a response
    pub transport_failures: usize,

    /// Duration of the run
    pub duration: Duration,

    /// Batches were planned but not submitted
    pub dry_run: bool,
}

impl UploadSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// No row failed
    pub fn is_successful(&self) -> bool {
        self.failed_rows == 0
    }

    /// Share of submitted rows that succeeded, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.submitted_rows == 0 {
            return 100.0;
        }
        (self.successful_rows as f64 / self.submitted_rows as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_rows = self.total_rows,
            total_batches = self.total_batches,
            submitted = self.submitted_rows,
            successful = self.successful_rows,
            failed = self.failed_rows,
            errored_rows = self.errored_rows,
            transport_failures = self.transport_failures,
            dry_run = self.dry_run,
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Upload completed"
        );

        if self.transport_failures > 0 {
            tracing::warn!(
                transport_failures = self.transport_failures,
                "Some batches never reached the registration API"
            );
        }
    }
}
