//! Storage and orchestration half of the daily price pipeline: diesel
//! schema and migrations, the insert-or-ignore writer, per-run
//! orchestration, and environment-backed configuration.

#![deny(missing_docs)]

pub mod config;
pub mod db;
pub mod pipeline;
pub mod schema;
pub mod summary;
pub mod writer;
