//! Provider abstraction for market data sources.
//!
//! [`BarProvider`] is the seam between the orchestration layer and any
//! concrete data vendor: it hands back a normalized, validated series of
//! daily bars for one symbol. The trait is async and dyn-dispatchable so
//! callers can swap the live Alpha Vantage implementation for a canned one
//! in tests or offline runs.

pub mod alpha_vantage;
pub mod fixed;

use async_trait::async_trait;
use thiserror::Error;

use crate::{
    errors::{FetchError, ParseError},
    parse::ParsedSeries,
    retry::{RetryAction, RetryPolicy},
};

/// A source of normalized daily bars for a single symbol.
#[async_trait]
pub trait BarProvider: Send + Sync {
    /// Fetches and normalizes the daily series for `symbol`.
    ///
    /// Implementations own their retry/backoff behavior; a returned error
    /// means the symbol is not recoverable this run.
    async fn daily_bars(&self, symbol: &str) -> Result<ParsedSeries, ProviderError>;
}

/// Errors that can occur while building a provider instance.
#[derive(Debug, Error)]
pub enum ProviderInitError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

/// A per-symbol failure from a [`BarProvider`].
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The fetch stage failed after retries were exhausted (or the error
    /// was not retryable).
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The payload was retrieved but could not be normalized.
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
}

/// Drives `op` under `policy`, sleeping between attempts.
///
/// `op` receives the 1-based attempt number. Only fetch-stage errors are
/// candidates for retry; parse errors abort immediately since re-fetching
/// the same malformed body cannot help.
pub(crate) async fn run_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, ProviderError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempt = 1u32;
    loop {
        let err = match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        match &err {
            ProviderError::Fetch(fetch_err) => match policy.decide(attempt, fetch_err) {
                RetryAction::RetryAfter(delay) => {
                    tracing::warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %fetch_err,
                        "retrying fetch"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                RetryAction::GiveUp => return Err(err),
            },
            ProviderError::Parse(_) => return Err(err),
        }
    }
}
