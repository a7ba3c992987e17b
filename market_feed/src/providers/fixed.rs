//! A provider that serves pre-canned bars.
//!
//! Stands in for the live API in offline runs and tests. The demo
//! constructor produces deterministic, internally consistent bars instead
//! of random ones so repeated offline runs exercise the writer's duplicate
//! handling the same way every time.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};

use crate::{
    errors::ParseError,
    models::DailyBar,
    parse::ParsedSeries,
    providers::{BarProvider, ProviderError},
};

/// Days of history the demo data covers per symbol.
const DEMO_DAYS: u64 = 7;

/// Serves a fixed set of bars grouped by symbol.
#[derive(Debug, Default)]
pub struct FixedProvider {
    bars: HashMap<String, Vec<DailyBar>>,
}

impl FixedProvider {
    /// Groups `bars` by symbol; order within a symbol is preserved.
    pub fn new(bars: impl IntoIterator<Item = DailyBar>) -> Self {
        let mut grouped: HashMap<String, Vec<DailyBar>> = HashMap::new();
        for bar in bars {
            grouped.entry(bar.symbol.clone()).or_default().push(bar);
        }
        Self { bars: grouped }
    }

    /// Seven days of plausible bars per symbol, newest first, anchored at
    /// `today`.
    pub fn demo(symbols: &[String], today: NaiveDate) -> Self {
        let mut bars = Vec::new();
        for symbol in symbols {
            let base = match symbol.as_str() {
                "AAPL" => 150.0,
                "GOOGL" => 2500.0,
                "MSFT" => 300.0,
                _ => 100.0,
            };
            for i in 0..DEMO_DAYS {
                let Some(date) = today.checked_sub_days(Days::new(i)) else {
                    continue;
                };
                let open = round2(base * (1.0 + 0.004 * (i % 5) as f64));
                let close = round2(open * 1.01);
                let high = round2(close * 1.02);
                let low = round2(open * 0.99);
                bars.push(DailyBar {
                    symbol: symbol.clone(),
                    date,
                    open,
                    high,
                    low,
                    close,
                    volume: 1_000_000 + 250_000 * i,
                });
            }
        }
        Self::new(bars)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[async_trait]
impl BarProvider for FixedProvider {
    async fn daily_bars(&self, symbol: &str) -> Result<ParsedSeries, ProviderError> {
        match self.bars.get(symbol) {
            Some(bars) if !bars.is_empty() => Ok(ParsedSeries {
                bars: bars.clone(),
                dropped: 0,
            }),
            _ => Err(ParseError::NoData {
                symbol: symbol.to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn demo_bars_are_consistent_and_deterministic() {
        let symbols = vec!["AAPL".to_string()];
        let today = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let first = FixedProvider::demo(&symbols, today);
        let second = FixedProvider::demo(&symbols, today);

        let a = first.daily_bars("AAPL").await.unwrap();
        let b = second.daily_bars("AAPL").await.unwrap();
        assert_eq!(a.bars, b.bars);
        assert_eq!(a.bars.len(), DEMO_DAYS as usize);
        assert!(a.bars.iter().all(DailyBar::prices_consistent));
    }

    #[tokio::test]
    async fn unknown_symbol_is_no_data() {
        let provider = FixedProvider::default();
        let err = provider.daily_bars("NOPE").await.unwrap_err();
        assert!(matches!(err, ProviderError::Parse(ParseError::NoData { .. })));
    }
}
