//! Idempotent writes into `stock_prices`.
//!
//! Each record is one `INSERT ... ON CONFLICT (symbol, date) DO NOTHING`:
//! re-delivery of an already-stored day is a skip, never an update, so rows
//! are immutable once written. Every insert is its own atomic statement,
//! which makes a partially completed batch safe to re-run.

use chrono::NaiveDate;
use diesel::prelude::*;
use market_feed::models::DailyBar;
use thiserror::Error;

use crate::schema::stock_prices;

/// A failure at the storage boundary. Fatal for the current symbol's batch.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database rejected a statement or the connection dropped.
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    /// A volume does not fit the signed 64-bit storage column. Rejected
    /// rather than stored wrapped-negative.
    #[error("volume {volume} for {symbol} on {date} exceeds the storage range")]
    VolumeOutOfRange {
        /// The ticker whose bar was rejected.
        symbol: String,
        /// The trading day of the rejected bar.
        date: NaiveDate,
        /// The out-of-range volume.
        volume: u64,
    },
}

/// Row counts returned by [`insert_bars`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Rows newly written.
    pub inserted: usize,
    /// Rows skipped because their (symbol, date) already existed.
    pub skipped: usize,
}

#[derive(Insertable)]
#[diesel(table_name = stock_prices)]
struct NewPriceRow<'a> {
    symbol: &'a str,
    date: NaiveDate,
    open_price: f64,
    high_price: f64,
    low_price: f64,
    close_price: f64,
    volume: i64,
}

impl<'a> TryFrom<&'a DailyBar> for NewPriceRow<'a> {
    type Error = StoreError;

    fn try_from(bar: &'a DailyBar) -> Result<Self, StoreError> {
        let volume = i64::try_from(bar.volume).map_err(|_| StoreError::VolumeOutOfRange {
            symbol: bar.symbol.clone(),
            date: bar.date,
            volume: bar.volume,
        })?;
        Ok(Self {
            symbol: &bar.symbol,
            date: bar.date,
            open_price: bar.open,
            high_price: bar.high,
            low_price: bar.low,
            close_price: bar.close,
            volume,
        })
    }
}

/// Inserts `bars`, ignoring rows whose (symbol, date) key already exists.
///
/// Re-running with the same input any number of times leaves the stored
/// state unchanged. The first database error or out-of-range volume aborts
/// the batch and is surfaced to the caller.
pub fn insert_bars(
    conn: &mut SqliteConnection,
    bars: &[DailyBar],
) -> Result<WriteOutcome, StoreError> {
    let mut outcome = WriteOutcome::default();
    for bar in bars {
        let affected = diesel::insert_into(stock_prices::table)
            .values(NewPriceRow::try_from(bar)?)
            .on_conflict((stock_prices::symbol, stock_prices::date))
            .do_nothing()
            .execute(conn)?;
        if affected == 1 {
            outcome.inserted += 1;
        } else {
            outcome.skipped += 1;
        }
    }
    Ok(outcome)
}
