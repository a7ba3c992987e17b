use std::time::Duration;

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};

use crate::{errors::FetchError, providers::ProviderInitError};

/// Public query endpoint for Alpha Vantage.
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Connection settings for the Alpha Vantage HTTP API.
///
/// Constructed once at startup from external configuration; the client
/// reads nothing from the environment itself.
#[derive(Clone)]
pub struct ClientConfig {
    /// Query endpoint; overridable so tests can point at a local server.
    pub base_url: String,
    /// The caller's API key.
    pub api_key: SecretString,
    /// Whole-request timeout.
    pub timeout: Duration,
}

/// The raw response to a daily-series request: HTTP status plus body text.
#[derive(Debug, Clone)]
pub struct RawPayload {
    /// HTTP status code of the response.
    pub status: u16,
    /// Unparsed response body.
    pub body: String,
}

/// Thin HTTP client for the `TIME_SERIES_DAILY` endpoint.
///
/// Holds no per-call state; classification of failures into the
/// [`FetchError`] taxonomy happens here so the retry loop never has to look
/// at raw reqwest errors.
pub struct AlphaVantageClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
}

impl AlphaVantageClient {
    /// Builds the client with the configured request timeout.
    pub fn new(config: ClientConfig) -> Result<Self, ProviderInitError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Requests the daily series for `symbol`.
    ///
    /// `symbol` is expected to be validated upstream (see
    /// [`is_valid_symbol`](crate::models::daily_bar::is_valid_symbol)).
    /// Returns the raw body on 2xx; otherwise maps the status onto the
    /// fetch-error taxonomy: 401/403 are fatal, 429 is a rate limit,
    /// transport failures are transient, and anything else is an unexpected
    /// status worth a bounded number of retries.
    pub async fn get_daily(&self, symbol: &str) -> Result<RawPayload, FetchError> {
        tracing::debug!(symbol, "requesting daily series");
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("apikey", self.api_key.expose_secret()),
                ("datatype", "json"),
            ])
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(FetchError::Transport)?;

        match status {
            s if s.is_success() => Ok(RawPayload {
                status: s.as_u16(),
                body,
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(FetchError::Auth(body)),
            StatusCode::TOO_MANY_REQUESTS => Err(FetchError::RateLimited(body)),
            s => Err(FetchError::UnexpectedStatus {
                status: s.as_u16(),
                body,
            }),
        }
    }
}
