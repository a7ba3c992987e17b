use indexmap::IndexMap;
use serde::Deserialize;

use crate::errors::FetchError;

/// Typed shape of a `TIME_SERIES_DAILY` response.
///
/// Alpha Vantage reports most failures inside an HTTP 200 body, so the
/// error fields live here alongside the series and are checked with
/// [`envelope_error`](DailyResponse::envelope_error) before normalization.
/// The series is an [`IndexMap`] so the provider's own ordering survives
/// decoding.
#[derive(Debug, Default, Deserialize)]
pub struct DailyResponse {
    /// The date-keyed series, absent when the request failed.
    #[serde(rename = "Time Series (Daily)")]
    pub time_series: Option<IndexMap<String, RawDailyEntry>>,

    /// Set when the request itself was rejected (bad key, bad symbol).
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,

    /// Set when the free-tier rate limit was hit.
    #[serde(rename = "Note")]
    pub note: Option<String>,

    /// Alternative rate-limit notice used by newer API revisions.
    #[serde(rename = "Information")]
    pub information: Option<String>,
}

impl DailyResponse {
    /// Maps body-level error fields onto the fetch-error taxonomy.
    ///
    /// `Error Message` is fatal; `Note` and `Information` both signal
    /// throttling and are retryable.
    pub fn envelope_error(&self) -> Option<FetchError> {
        if let Some(message) = &self.error_message {
            return Some(FetchError::Auth(message.clone()));
        }
        if let Some(message) = self.note.as_ref().or(self.information.as_ref()) {
            return Some(FetchError::RateLimited(message.clone()));
        }
        None
    }
}

/// One day's entry as the provider sends it: all fields are strings.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDailyEntry {
    /// Opening price, e.g. `"100.00"`.
    #[serde(rename = "1. open")]
    pub open: String,
    /// Highest price.
    #[serde(rename = "2. high")]
    pub high: String,
    /// Lowest price.
    #[serde(rename = "3. low")]
    pub low: String,
    /// Closing price.
    #[serde(rename = "4. close")]
    pub close: String,
    /// Shares traded.
    #[serde(rename = "5. volume")]
    pub volume: String,
}
