//! Provider-facing half of the daily price pipeline: typed Alpha Vantage
//! client, payload normalization, and retry policy.

pub mod errors;
pub mod models;
pub mod parse;
pub mod providers;
pub mod retry;
