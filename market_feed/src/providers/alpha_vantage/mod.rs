//! Alpha Vantage `TIME_SERIES_DAILY` provider.
//!
//! Split the same way as any other vendor integration: a thin HTTP client
//! (`client`), typed response decoding (`response`), and the
//! [`BarProvider`](crate::providers::BarProvider) implementation that ties
//! client, retry policy, and normalization together (`provider`).

pub mod client;
pub mod provider;
pub mod response;

pub use client::{AlphaVantageClient, ClientConfig, DEFAULT_BASE_URL, RawPayload};
pub use provider::AlphaVantageProvider;
pub use response::{DailyResponse, RawDailyEntry};
