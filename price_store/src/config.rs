//! Environment-backed configuration, constructed once at process start and
//! passed down explicitly; nothing below this layer reads the environment.

use std::time::Duration;

use market_feed::{
    models::daily_bar::is_valid_symbol,
    providers::alpha_vantage::{ClientConfig, DEFAULT_BASE_URL},
    retry::RetryPolicy,
};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::{MissingEnvVarError, get_env_var, get_env_var_or, get_env_var_parse};
use thiserror::Error;

/// Configuration problems detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error(transparent)]
    MissingEnvVar(#[from] MissingEnvVarError),

    /// A configured ticker symbol failed validation.
    #[error("invalid ticker symbol: {0:?}")]
    InvalidSymbol(String),

    /// The symbol list was empty after trimming.
    #[error("SYMBOLS must name at least one ticker")]
    EmptySymbolList,
}

/// Everything one pipeline run needs, resolved from the environment.
#[derive(Debug)]
pub struct AppConfig {
    /// Alpha Vantage API key (`ALPHA_VANTAGE_API_KEY`).
    pub api_key: SecretString,
    /// Provider endpoint (`ALPHA_VANTAGE_BASE_URL`); overridable for tests.
    pub base_url: String,
    /// Storage location (`DATABASE_URL`).
    pub database_url: String,
    /// Validated, uppercased ticker list (`SYMBOLS`).
    pub symbols: Vec<String>,
    /// Whole-request HTTP timeout (`HTTP_TIMEOUT_SECS`).
    pub http_timeout: Duration,
    /// Fetch retry/backoff settings (`FETCH_MAX_ATTEMPTS`,
    /// `FETCH_BASE_DELAY_MS`).
    pub retry: RetryPolicy,
    /// Newest entries to keep per symbol (`RECENT_DAYS`; 0 keeps all).
    pub recent_days: Option<usize>,
    /// Daemon-mode cadence (`SYNC_INTERVAL_MINUTES`).
    pub sync_interval: Duration,
}

impl AppConfig {
    /// Loads configuration from the environment, reading a `.env` file
    /// first when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let api_key = SecretString::new(get_env_var("ALPHA_VANTAGE_API_KEY")?.into());
        let database_url = get_env_var("DATABASE_URL")?;
        let symbols = parse_symbols(&get_env_var_or("SYMBOLS", "AAPL,GOOGL,MSFT"))?;

        let recent_days = get_env_var_parse("RECENT_DAYS", 7usize);

        Ok(Self {
            api_key,
            base_url: get_env_var_or("ALPHA_VANTAGE_BASE_URL", DEFAULT_BASE_URL),
            database_url,
            symbols,
            http_timeout: Duration::from_secs(get_env_var_parse("HTTP_TIMEOUT_SECS", 30u64)),
            retry: RetryPolicy {
                max_attempts: get_env_var_parse("FETCH_MAX_ATTEMPTS", 3u32),
                base_delay: Duration::from_millis(get_env_var_parse(
                    "FETCH_BASE_DELAY_MS",
                    1_000u64,
                )),
            },
            recent_days: (recent_days > 0).then_some(recent_days),
            sync_interval: Duration::from_secs(
                get_env_var_parse("SYNC_INTERVAL_MINUTES", 360u64) * 60,
            ),
        })
    }

    /// The HTTP client settings this configuration implies.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            api_key: SecretString::new(self.api_key.expose_secret().into()),
            timeout: self.http_timeout,
        }
    }
}

/// Splits and validates a comma-separated ticker list.
///
/// Entries are trimmed and uppercased; an empty result or an entry that is
/// not a plausible ticker is a configuration error.
pub fn parse_symbols(raw: &str) -> Result<Vec<String>, ConfigError> {
    let symbols: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .collect();

    if symbols.is_empty() {
        return Err(ConfigError::EmptySymbolList);
    }
    for symbol in &symbols {
        if !is_valid_symbol(symbol) {
            return Err(ConfigError::InvalidSymbol(symbol.clone()));
        }
    }
    Ok(symbols)
}
