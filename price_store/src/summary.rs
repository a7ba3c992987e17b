//! Per-run outcome accounting.

use std::time::Duration;

/// Why one symbol failed, as recorded in the run summary.
#[derive(Debug, Clone)]
pub struct SymbolFailure {
    /// The ticker that failed.
    pub symbol: String,
    /// Human-readable failure reason (provider or storage error).
    pub reason: String,
}

/// Aggregated result of one pipeline run. This is the sole
/// failure-reporting surface handed back to whatever triggered the run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Symbols the run attempted.
    pub attempted: usize,
    /// Symbols that made it all the way into storage.
    pub succeeded: usize,
    /// Per-symbol failures; the run continued past each of them.
    pub failed: Vec<SymbolFailure>,
    /// Rows newly inserted across all symbols.
    pub rows_inserted: usize,
    /// Rows skipped as already-stored duplicates.
    pub rows_skipped: usize,
    /// Malformed payload entries dropped during parsing.
    pub entries_dropped: usize,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl RunSummary {
    /// True when every attempted symbol failed.
    pub fn all_failed(&self) -> bool {
        self.attempted > 0 && self.succeeded == 0
    }

    /// Emits one structured event summarizing the run, plus one warning per
    /// failed symbol.
    pub fn log_summary(&self) {
        tracing::info!(
            attempted = self.attempted,
            succeeded = self.succeeded,
            failed = self.failed.len(),
            rows_inserted = self.rows_inserted,
            rows_skipped = self.rows_skipped,
            entries_dropped = self.entries_dropped,
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "run complete"
        );
        for failure in &self.failed {
            tracing::warn!(symbol = %failure.symbol, reason = %failure.reason, "symbol failed");
        }
    }
}
