use thiserror::Error;

/// Errors raised while talking to the market-data API.
///
/// The variants drive the retry policy: everything except [`Auth`] is worth
/// at least one more attempt.
///
/// [`Auth`]: FetchError::Auth
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider rejected the API key or the request itself. Fatal,
    /// never retried.
    #[error("authentication rejected by provider: {0}")]
    Auth(String),

    /// The provider is throttling us. Retryable with backoff.
    #[error("rate limited by provider: {0}")]
    RateLimited(String),

    /// Timeout, connection reset, DNS failure and friends. Retryable.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Any other non-success HTTP status. Retried a bounded number of
    /// times, then surfaced.
    #[error("unexpected HTTP status {status}")]
    UnexpectedStatus {
        /// The HTTP status code returned by the provider.
        status: u16,
        /// The response body, kept for the error report.
        body: String,
    },
}

impl FetchError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Auth(_))
    }
}

/// Errors raised while turning a raw payload into daily bars.
///
/// These are fatal for the current symbol only; the pipeline records them
/// and moves on.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body was not valid JSON at all.
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The response decoded but carried no time series, or the series was
    /// empty. Distinct from a format error.
    #[error("no daily series for {symbol}")]
    NoData {
        /// The symbol the payload was requested for.
        symbol: String,
    },

    /// Every entry in the series failed validation.
    #[error("no usable entries in payload for {symbol} ({dropped} dropped)")]
    InvalidPayload {
        /// The symbol the payload was requested for.
        symbol: String,
        /// How many entries were rejected.
        dropped: usize,
    },
}
