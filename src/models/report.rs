use serde::Serialize;

use super::PriceRecord;

// ---------------------------------------------------------------------------
// BatchReport — Outcome of one batch run
// ---------------------------------------------------------------------------

/// A product whose price could not be fetched during a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub product: String,
    pub url: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    /// Records appended to the history file, in watchlist order.
    pub saved: Vec<PriceRecord>,
    pub failures: Vec<FetchFailure>,
    /// Rows dropped by the deduplication pass that follows the batch.
    pub duplicates_removed: usize,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
