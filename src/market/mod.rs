//! Exchange payload decoding into candles.
//!
//! Fetching, reconnecting and caching belong to whoever supplies the
//! payloads; this module only normalizes them.

pub mod binance;

pub use binance::{KlineEvent, closed_series, parse_kline_event, parse_rest_klines};
