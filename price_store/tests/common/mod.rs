#![allow(dead_code)]

use chrono::NaiveDate;
use diesel::prelude::*;
use market_feed::models::DailyBar;
use price_store::{db, schema::stock_prices};
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestDb {
    _dir: TempDir, // keep alive for the life of the test
    pub path: String,
}

pub fn setup_db() -> (TestDb, SqliteConnection) {
    let dir = TempDir::new().expect("tempdir");
    let mut p = PathBuf::from(dir.path());
    p.push("test.db");
    let path = p.to_string_lossy().to_string();

    db::run_migrations(&path).expect("migrations");
    let conn = db::connect(&path).expect("connect");
    (TestDb { _dir: dir, path }, conn)
}

pub fn row_count(conn: &mut SqliteConnection) -> i64 {
    stock_prices::table
        .count()
        .get_result(conn)
        .expect("row count")
}

pub fn bar(symbol: &str, date: &str) -> DailyBar {
    DailyBar {
        symbol: symbol.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("date"),
        open: 100.00,
        high: 105.00,
        low: 99.00,
        close: 104.00,
        volume: 1_000_000,
    }
}
