use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;

use crate::{
    errors::ParseError,
    parse::{self, ParsedSeries},
    providers::{
        BarProvider, ProviderError, ProviderInitError,
        alpha_vantage::{
            client::{AlphaVantageClient, ClientConfig},
            response::DailyResponse,
        },
        run_with_retry,
    },
    retry::RetryPolicy,
};

use async_trait::async_trait;

/// Live Alpha Vantage implementation of [`BarProvider`].
///
/// Each call is throttled against the free-tier cap, retried per the
/// configured policy, decoded into the typed response shape, and
/// normalized. The limiter is per-provider, so a fresh instance starts
/// with a full burst budget.
pub struct AlphaVantageProvider {
    client: AlphaVantageClient,
    policy: RetryPolicy,
    limiter: DefaultDirectRateLimiter,
    recent_days: Option<usize>,
}

impl AlphaVantageProvider {
    /// Builds the provider from explicit configuration.
    ///
    /// `recent_days` bounds how many of the newest entries are kept per
    /// symbol; `None` keeps the whole series.
    pub fn new(
        config: ClientConfig,
        policy: RetryPolicy,
        recent_days: Option<usize>,
    ) -> Result<Self, ProviderInitError> {
        Ok(Self {
            client: AlphaVantageClient::new(config)?,
            policy,
            // free-tier cap: 5 requests per minute
            limiter: RateLimiter::direct(Quota::per_minute(nonzero!(5u32))),
            recent_days,
        })
    }

    /// One throttled fetch-and-decode attempt.
    async fn try_fetch(&self, symbol: &str) -> Result<DailyResponse, ProviderError> {
        self.limiter.until_ready().await;
        let payload = self.client.get_daily(symbol).await?;
        let decoded: DailyResponse =
            serde_json::from_str(&payload.body).map_err(ParseError::Json)?;
        if let Some(err) = decoded.envelope_error() {
            return Err(err.into());
        }
        Ok(decoded)
    }
}

#[async_trait]
impl BarProvider for AlphaVantageProvider {
    async fn daily_bars(&self, symbol: &str) -> Result<ParsedSeries, ProviderError> {
        let response =
            run_with_retry(&self.policy, |_attempt| self.try_fetch(symbol)).await?;
        Ok(parse::parse_daily(&response, symbol, self.recent_days)?)
    }
}
