//! Error types for candle validation, configuration and payload decoding.
//!
//! Too little history is never an error: indicators fill warm-up slots with
//! the sentinel instead. These variants cover input the engine refuses to
//! work with at all.

use thiserror::Error;

/// The main error type for cct-signals operations.
#[derive(Debug, Error)]
pub enum Error {
    /// An OHLCV field is NaN, infinite or negative.
    #[error("invalid candle at index {index}: {field} = {value}")]
    InvalidCandle {
        index: usize,
        field: &'static str,
        value: f64,
    },

    /// The candle's high is below its low.
    #[error("inverted candle at index {index}: high {high} is below low {low}")]
    InvertedCandle { index: usize, high: f64, low: f64 },

    /// Open or close lies outside the candle's `[low, high]` range.
    #[error("invalid candle at index {index}: {field} = {value} outside [{low}, {high}]")]
    CandleOutOfRange {
        index: usize,
        field: &'static str,
        value: f64,
        low: f64,
        high: f64,
    },

    /// Candle timestamps must be strictly ascending.
    #[error("non-ascending timestamp at index {index}: {current} does not follow {previous}")]
    NonAscendingTimestamp {
        index: usize,
        previous: u64,
        current: u64,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// An exchange payload was well-formed JSON but not the expected shape.
    #[error("decode failed: {0}")]
    Decode(String),

    /// A parallel analysis task panicked or was cancelled.
    #[error("analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using the cct-signals Error type.
pub type Result<T> = std::result::Result<T, Error>;
