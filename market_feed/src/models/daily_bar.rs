//! Canonical in-memory representation of one day's OHLCV data.
//!
//! This struct is the standard output of payload normalization and the
//! standard input of the storage writer, regardless of which provider the
//! data came from.

use chrono::NaiveDate;

/// Longest ticker symbol we accept.
pub const MAX_SYMBOL_LEN: usize = 10;

/// One trading day's open/high/low/close/volume for a symbol.
///
/// Prices are what the provider quoted (two-decimal strings upstream),
/// already validated as finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBar {
    /// Uppercase ticker symbol, e.g. "AAPL".
    pub symbol: String,
    /// The trading day this bar covers.
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Highest price of the day.
    pub high: f64,
    /// Lowest price of the day.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Shares traded.
    pub volume: u64,
}

impl DailyBar {
    /// Whether the price fields are finite, non-negative, and satisfy
    /// `low <= open,close <= high`.
    pub fn prices_consistent(&self) -> bool {
        let prices = [self.open, self.high, self.low, self.close];
        prices.iter().all(|p| p.is_finite() && *p >= 0.0)
            && self.low <= self.open.min(self.close)
            && self.open.max(self.close) <= self.high
    }
}

/// Whether `symbol` is a plausible ticker: non-empty, at most
/// [`MAX_SYMBOL_LEN`] characters, uppercase letters, digits, `.` or `-`.
pub fn is_valid_symbol(symbol: &str) -> bool {
    !symbol.is_empty()
        && symbol.len() <= MAX_SYMBOL_LEN
        && symbol
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '.' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(open: f64, high: f64, low: f64, close: f64) -> DailyBar {
        DailyBar {
            symbol: "AAPL".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            open,
            high,
            low,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn consistent_bar_passes() {
        assert!(bar(100.0, 105.0, 99.0, 104.0).prices_consistent());
    }

    #[test]
    fn high_below_close_fails() {
        assert!(!bar(100.0, 101.0, 99.0, 104.0).prices_consistent());
    }

    #[test]
    fn negative_price_fails() {
        assert!(!bar(-1.0, 105.0, 99.0, 104.0).prices_consistent());
    }

    #[test]
    fn symbol_validation() {
        assert!(is_valid_symbol("AAPL"));
        assert!(is_valid_symbol("BRK.B"));
        assert!(is_valid_symbol("005930-KS"));
        assert!(!is_valid_symbol(""));
        assert!(!is_valid_symbol("aapl"));
        assert!(!is_valid_symbol("WAYTOOLONGSYM"));
        assert!(!is_valid_symbol("AA PL"));
    }
}
