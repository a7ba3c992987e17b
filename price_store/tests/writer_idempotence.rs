//! Writer-level properties: idempotence, uniqueness, and no-overwrite
//! semantics on a real (tempfile) SQLite database.

use diesel::prelude::*;
use price_store::{schema::stock_prices, writer};

mod common;

#[test]
fn writing_the_same_batch_twice_changes_nothing() {
    let (_db, mut conn) = common::setup_db();
    let bars = vec![
        common::bar("AAPL", "2024-01-01"),
        common::bar("AAPL", "2024-01-02"),
        common::bar("AAPL", "2024-01-03"),
    ];

    let first = writer::insert_bars(&mut conn, &bars).expect("first write");
    assert_eq!(first.inserted, 3);
    assert_eq!(first.skipped, 0);
    assert_eq!(common::row_count(&mut conn), 3);

    let second = writer::insert_bars(&mut conn, &bars).expect("second write");
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, 3);
    assert_eq!(common::row_count(&mut conn), 3);
}

#[test]
fn conflicting_rows_never_overwrite_stored_values() {
    let (_db, mut conn) = common::setup_db();

    let original = common::bar("AAPL", "2024-01-01");
    writer::insert_bars(&mut conn, std::slice::from_ref(&original)).expect("write");

    let mut revised = common::bar("AAPL", "2024-01-01");
    revised.close = 999.99;
    let outcome = writer::insert_bars(&mut conn, &[revised]).expect("rewrite");
    assert_eq!(outcome.inserted, 0);
    assert_eq!(outcome.skipped, 1);

    let stored_close: f64 = stock_prices::table
        .select(stock_prices::close_price)
        .first(&mut conn)
        .expect("stored row");
    assert_eq!(stored_close, original.close);
}

#[test]
fn no_two_rows_share_a_symbol_date_pair() {
    let (_db, mut conn) = common::setup_db();
    let bars = vec![
        common::bar("AAPL", "2024-01-01"),
        common::bar("MSFT", "2024-01-01"),
        common::bar("AAPL", "2024-01-02"),
        common::bar("AAPL", "2024-01-01"),
    ];

    writer::insert_bars(&mut conn, &bars).expect("write");

    let keys: Vec<(String, chrono::NaiveDate)> = stock_prices::table
        .select((stock_prices::symbol, stock_prices::date))
        .load(&mut conn)
        .expect("keys");
    assert_eq!(keys.len(), 3);
    let mut deduped = keys.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), keys.len());
}

#[test]
fn oversized_volume_is_rejected_not_stored_negative() {
    let (_db, mut conn) = common::setup_db();

    let mut bar = common::bar("AAPL", "2024-01-01");
    bar.volume = u64::MAX;

    let err = writer::insert_bars(&mut conn, &[bar]).unwrap_err();
    assert!(matches!(err, writer::StoreError::VolumeOutOfRange { .. }));
    assert_eq!(common::row_count(&mut conn), 0);

    // the largest storable volume goes through unmangled
    let mut bar = common::bar("AAPL", "2024-01-01");
    bar.volume = i64::MAX as u64;
    writer::insert_bars(&mut conn, std::slice::from_ref(&bar)).expect("write");

    let stored_volume: i64 = stock_prices::table
        .select(stock_prices::volume)
        .first(&mut conn)
        .expect("stored row");
    assert_eq!(stored_volume, i64::MAX);
}

#[test]
fn created_at_is_assigned_by_the_store() {
    let (_db, mut conn) = common::setup_db();
    writer::insert_bars(&mut conn, &[common::bar("AAPL", "2024-01-01")]).expect("write");

    let created_at: chrono::NaiveDateTime = stock_prices::table
        .select(stock_prices::created_at)
        .first(&mut conn)
        .expect("created_at");
    assert!(created_at.and_utc().timestamp() > 0);
}
