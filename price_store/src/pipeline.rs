//! The per-run orchestration loop: fetch, parse, and store each configured
//! symbol, isolating failures so one bad ticker never sinks the run.

use std::time::Instant;

use diesel::SqliteConnection;
use market_feed::providers::BarProvider;
use tracing::{info, warn};

use crate::{
    summary::{RunSummary, SymbolFailure},
    writer,
};

/// Fetches, parses, and stores daily bars for every symbol in `symbols`.
///
/// Symbols are processed independently: a failure at any stage is recorded
/// in the summary and the run moves on to the next ticker. The function
/// keeps no state between invocations; repeating a run against unchanged
/// provider data only produces duplicate-skips thanks to the writer's
/// insert-or-ignore semantics, so the external trigger may re-run it freely.
pub async fn run(
    provider: &dyn BarProvider,
    conn: &mut SqliteConnection,
    symbols: &[String],
) -> RunSummary {
    let started = Instant::now();
    let mut summary = RunSummary {
        attempted: symbols.len(),
        ..Default::default()
    };

    for symbol in symbols {
        info!(symbol, "processing symbol");

        let series = match provider.daily_bars(symbol).await {
            Ok(series) => series,
            Err(err) => {
                warn!(symbol, error = %err, "fetch/parse failed, skipping symbol");
                summary.failed.push(SymbolFailure {
                    symbol: symbol.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };
        summary.entries_dropped += series.dropped;

        match writer::insert_bars(conn, &series.bars) {
            Ok(outcome) => {
                info!(
                    symbol,
                    inserted = outcome.inserted,
                    skipped = outcome.skipped,
                    "symbol stored"
                );
                summary.succeeded += 1;
                summary.rows_inserted += outcome.inserted;
                summary.rows_skipped += outcome.skipped;
            }
            Err(err) => {
                warn!(symbol, error = %err, "storage write failed");
                summary.failed.push(SymbolFailure {
                    symbol: symbol.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    summary.elapsed = started.elapsed();
    summary
}
