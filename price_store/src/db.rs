//! Database helpers: tuned SQLite connections and embedded migrations.
//!
//! [`connect`] applies WAL journaling, foreign_keys=ON, and a 5000ms
//! busy_timeout; [`run_migrations`] brings the schema up to date from the
//! migrations embedded in this crate. Losing the ability to do either is a
//! run-level failure and is surfaced to the caller, never swallowed.

use anyhow::anyhow;
use diesel::{Connection, RunQueryDsl, SqliteConnection, sql_query};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Embedded Diesel migrations bundled with this crate.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Open a SQLite connection and apply connection-wide PRAGMAs.
pub fn connect(database_url: &str) -> anyhow::Result<SqliteConnection> {
    let mut conn = SqliteConnection::establish(database_url)?;

    sql_query("PRAGMA journal_mode=WAL;").execute(&mut conn)?;
    sql_query("PRAGMA foreign_keys=ON;").execute(&mut conn)?;
    sql_query("PRAGMA busy_timeout=5000;").execute(&mut conn)?;
    Ok(conn)
}

/// Runs pending migrations on the database at `database_url`.
pub fn run_migrations(database_url: &str) -> anyhow::Result<()> {
    let mut conn = SqliteConnection::establish(database_url)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!(e))?;
    Ok(())
}
