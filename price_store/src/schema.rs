//! Diesel table definitions.

// table! expands to undocumented column structs
#![allow(missing_docs)]

diesel::table! {
    stock_prices (id) {
        id -> Nullable<Integer>,
        symbol -> Text,
        date -> Date,
        open_price -> Double,
        high_price -> Double,
        low_price -> Double,
        close_price -> Double,
        volume -> BigInt,
        created_at -> Timestamp,
    }
}
