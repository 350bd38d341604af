//! Upload coordinator - drives one pass over the export
//!
//! Read → normalize → partition → submit → reconcile → record, one batch at a
//! time. After every batch the coordinator prints progress, flushes the ledger
//! when another `flush_every` rows went through, and sleeps `batch_delay_ms`.
//! The ledger is flushed once more at the end.

use crate::adapters::registry::{HttpRegistryClient, ServiceRegistry};
use crate::adapters::source::read_rows;
use crate::config::SvcregConfig;
use crate::core::ledger::{LedgerPaths, OutcomeLedger};
use crate::core::normalize::prepare_rows;
use crate::core::partition::{partition, Batch};
use crate::core::reconcile::{reconcile, transport_failure};
use crate::core::upload::summary::{Progress, UploadSummary};
use crate::domain::{Outcome, Result, Row};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Upload coordinator
pub struct UploadCoordinator {
    config: SvcregConfig,
    registry: Arc<dyn ServiceRegistry>,
    paths: LedgerPaths,
}

impl UploadCoordinator {
    /// Create a coordinator posting through [`HttpRegistryClient`]
    pub fn new(config: SvcregConfig) -> Result<Self> {
        let registry = Arc::new(HttpRegistryClient::new(&config.api)?);
        Ok(Self::with_registry(config, registry))
    }

    /// Create a coordinator posting through any registry
    pub fn with_registry(config: SvcregConfig, registry: Arc<dyn ServiceRegistry>) -> Self {
        let paths = LedgerPaths::from(&config.output);
        Self {
            config,
            registry,
            paths,
        }
    }

    /// Reads the configured CSV and runs the pipeline over it
    ///
    /// # Errors
    ///
    /// Fails only when the input cannot be read or a ledger flush cannot be
    /// written. Per-row failures end up in the ledger.
    pub async fn execute_upload(&self) -> Result<UploadSummary> {
        tracing::info!(path = %self.config.source.path, "Reading CSV");
        let rows = read_rows(&self.config.source.path)?;
        self.run(rows).await
    }

    /// Runs the pipeline over rows already read from the source
    pub async fn run(&self, rows: Vec<Row>) -> Result<UploadSummary> {
        let start_time = Instant::now();
        let rows = prepare_rows(rows, self.config.source.start_row);
        let batches = partition(&rows, self.config.api.max_per_request);

        let mut summary = UploadSummary {
            total_rows: rows.len(),
            total_batches: batches.len(),
            dry_run: self.config.application.dry_run,
            ..UploadSummary::new()
        };

        tracing::info!(
            rows = rows.len(),
            batches = batches.len(),
            endpoint = %self.registry.endpoint(),
            dry_run = summary.dry_run,
            "Starting upload"
        );

        if summary.dry_run {
            for (index, batch) in batches.iter().enumerate() {
                tracing::info!(
                    batch = index + 1,
                    items = batch.len(),
                    first_row = ?batch.first_row_id(),
                    national_code = %batch.key.national_code,
                    "Planned batch"
                );
            }
            return Ok(summary.with_duration(start_time.elapsed()));
        }

        let mut ledger = OutcomeLedger::new();
        let flush_every = self.config.upload.flush_every.max(1);
        let batch_delay = Duration::from_millis(self.config.upload.batch_delay_ms);
        let mut next_flush_mark = flush_every;
        let mut done = 0usize;

        for (index, batch) in batches.iter().enumerate() {
            crate::log_batch_submitted!(index + 1, batch.len(), batch.first_row_id().unwrap_or(0));

            let outcomes = self.submit_batch(batch, &mut summary).await;
            tracing::debug!(
                batch = index + 1,
                succeeded = outcomes.iter().filter(|o| o.is_success()).count(),
                failed = outcomes.iter().filter(|o| !o.is_success()).count(),
                "Batch reconciled"
            );
            ledger.extend(outcomes);

            done += batch.len();
            let progress = Progress {
                done,
                total: rows.len(),
                errored_rows: ledger.errored_row_count(),
            };
            println!("{progress}");

            if done >= next_flush_mark {
                ledger.flush(&self.paths)?;
                while next_flush_mark <= done {
                    next_flush_mark += flush_every;
                }
            }

            if !batch_delay.is_zero() {
                tokio::time::sleep(batch_delay).await;
            }
        }

        ledger.flush(&self.paths)?;

        summary.submitted_rows = done;
        summary.successful_rows = ledger.success_count();
        summary.failed_rows = ledger.error_count();
        summary.errored_rows = ledger.errored_row_count();

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    async fn submit_batch(&self, batch: &Batch, summary: &mut UploadSummary) -> Vec<Outcome> {
        match self.registry.submit(batch).await {
            Ok(response) => reconcile(batch, &response.body),
            Err(failure) => {
                summary.transport_failures += 1;
                tracing::warn!(
                    first_row = ?batch.first_row_id(),
                    items = batch.len(),
                    error = %failure,
                    "Batch not delivered"
                );
                transport_failure(batch, &failure)
            }
        }
    }
}
