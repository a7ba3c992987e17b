//! Orchestrator behavior with a scripted provider: per-symbol failure
//! isolation and run-level accounting.

use async_trait::async_trait;
use diesel::prelude::*;
use market_feed::{
    errors::FetchError,
    parse::ParsedSeries,
    providers::{BarProvider, ProviderError},
};
use price_store::{pipeline, schema::stock_prices};

mod common;

/// Fails AAPL with an auth error, serves two days of MSFT bars.
struct ScriptedProvider;

#[async_trait]
impl BarProvider for ScriptedProvider {
    async fn daily_bars(&self, symbol: &str) -> Result<ParsedSeries, ProviderError> {
        match symbol {
            "MSFT" => Ok(ParsedSeries {
                bars: vec![
                    common::bar("MSFT", "2024-01-02"),
                    common::bar("MSFT", "2024-01-01"),
                ],
                dropped: 1,
            }),
            _ => Err(ProviderError::Fetch(FetchError::Auth(
                "apikey is invalid".into(),
            ))),
        }
    }
}

#[tokio::test]
async fn one_symbols_failure_does_not_stop_the_run() {
    let (_db, mut conn) = common::setup_db();
    let symbols = vec!["AAPL".to_string(), "MSFT".to_string()];

    let summary = pipeline::run(&ScriptedProvider, &mut conn, &symbols).await;

    assert_eq!(summary.attempted, 2);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].symbol, "AAPL");
    assert!(summary.failed[0].reason.contains("authentication"));
    assert_eq!(summary.rows_inserted, 2);
    assert_eq!(summary.entries_dropped, 1);
    assert!(!summary.all_failed());

    // the failing symbol left no trace; the healthy one is stored
    let symbols_stored: Vec<String> = stock_prices::table
        .select(stock_prices::symbol)
        .distinct()
        .load(&mut conn)
        .expect("stored symbols");
    assert_eq!(symbols_stored, ["MSFT"]);
}

#[tokio::test]
async fn repeating_a_run_only_produces_duplicate_skips() {
    let (_db, mut conn) = common::setup_db();
    let symbols = vec!["MSFT".to_string()];

    let first = pipeline::run(&ScriptedProvider, &mut conn, &symbols).await;
    assert_eq!(first.rows_inserted, 2);
    assert_eq!(first.rows_skipped, 0);

    let second = pipeline::run(&ScriptedProvider, &mut conn, &symbols).await;
    assert_eq!(second.rows_inserted, 0);
    assert_eq!(second.rows_skipped, 2);
    assert_eq!(common::row_count(&mut conn), 2);
}

#[tokio::test]
async fn run_with_every_symbol_failing_reports_all_failed() {
    let (_db, mut conn) = common::setup_db();
    let symbols = vec!["AAPL".to_string(), "GOOGL".to_string()];

    let summary = pipeline::run(&ScriptedProvider, &mut conn, &symbols).await;
    assert!(summary.all_failed());
    assert_eq!(common::row_count(&mut conn), 0);
}
