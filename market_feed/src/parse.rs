//! Normalization of a decoded provider payload into [`DailyBar`] records.
//!
//! Validation is per-entry: a malformed date or number, or an inconsistent
//! OHLC quadruple, drops that entry and bumps a counter rather than failing
//! the whole payload. Only an absent/empty series or a series with zero
//! usable entries is an error.

use chrono::NaiveDate;

use crate::{
    errors::ParseError,
    models::DailyBar,
    providers::alpha_vantage::response::{DailyResponse, RawDailyEntry},
};

/// A normalized daily series plus how many entries were rejected on the way.
#[derive(Debug, Clone)]
pub struct ParsedSeries {
    /// Validated bars, newest first. Ordering is deterministic regardless
    /// of how the provider happened to key its JSON object.
    pub bars: Vec<DailyBar>,
    /// Entries dropped by per-entry validation.
    pub dropped: usize,
}

/// Converts `response` into validated bars for `symbol`.
///
/// `recent_days` keeps only the newest N calendar entries, mirroring how
/// much history a scheduled run actually needs; `None` or `Some(0)` keeps
/// everything.
pub fn parse_daily(
    response: &DailyResponse,
    symbol: &str,
    recent_days: Option<usize>,
) -> Result<ParsedSeries, ParseError> {
    let series = response
        .time_series
        .as_ref()
        .filter(|series| !series.is_empty())
        .ok_or_else(|| ParseError::NoData {
            symbol: symbol.to_string(),
        })?;

    // ISO dates sort chronologically as strings; newest first.
    let mut dates: Vec<&String> = series.keys().collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    if let Some(limit) = recent_days.filter(|limit| *limit > 0) {
        dates.truncate(limit);
    }

    let mut bars = Vec::with_capacity(dates.len());
    let mut dropped = 0usize;
    for date_str in dates {
        match normalize_entry(symbol, date_str, &series[date_str.as_str()]) {
            Some(bar) => bars.push(bar),
            None => {
                dropped += 1;
                tracing::warn!(symbol, date = %date_str, "dropping malformed daily entry");
            }
        }
    }

    if bars.is_empty() {
        return Err(ParseError::InvalidPayload {
            symbol: symbol.to_string(),
            dropped,
        });
    }
    Ok(ParsedSeries { bars, dropped })
}

fn normalize_entry(symbol: &str, date_str: &str, entry: &RawDailyEntry) -> Option<DailyBar> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()?;
    let volume: u64 = entry.volume.parse().ok()?;
    // must fit the signed 64-bit storage column
    i64::try_from(volume).ok()?;
    let bar = DailyBar {
        symbol: symbol.to_string(),
        date,
        open: entry.open.parse().ok()?,
        high: entry.high.parse().ok()?,
        low: entry.low.parse().ok()?,
        close: entry.close.parse().ok()?,
        volume,
    };
    bar.prices_consistent().then_some(bar)
}
