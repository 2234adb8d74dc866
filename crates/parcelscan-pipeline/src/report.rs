//! Run reporting types

use parcelscan_domain::DeliveryRecord;
use serde::Serialize;

/// A per-item failure recorded during a run.
#[derive(Debug, Clone, Serialize)]
pub struct ItemFailure {
    /// Provider message id of the failed item
    pub message_id: String,

    /// Subject line, for diagnosis
    pub subject: String,

    /// Stable failure tag (`service_unavailable`, `invalid_json`,
    /// `store_error`, `provider_error`)
    pub reason: String,

    /// Human-readable detail
    pub detail: String,
}

/// The outcome of one pipeline run.
///
/// `records` holds only the records produced by this run, not the full
/// historical set.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    /// Records newly persisted by this run
    pub records: Vec<DeliveryRecord>,

    /// Messages scanned from the provider listing
    pub scanned: usize,

    /// Messages that passed the relevance classifier
    pub matched: usize,

    /// Messages skipped because they were already processed
    pub skipped_processed: usize,

    /// Per-item failures, isolated from the rest of the run
    pub failures: Vec<ItemFailure>,
}

impl RunReport {
    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "scanned {}, matched {}, skipped {} already processed, {} new records, {} failures",
            self.scanned,
            self.matched,
            self.skipped_processed,
            self.records.len(),
            self.failures.len()
        )
    }
}
