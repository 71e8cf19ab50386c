//! Technical indicators for market analysis
//!
//! Every indicator returns one value per input candle. Slots without enough
//! history hold [`SENTINEL`]; always go through [`value_at`] or
//! [`is_sentinel`] before using a value.

pub mod candle;
pub mod engine;
pub mod momentum;
pub mod moving_averages;
pub mod series;
pub mod timeframe;
pub mod volatility;

/// Marker for "no value yet" in indicator output.
pub const SENTINEL: f64 = f64::NAN;

pub fn is_sentinel(value: f64) -> bool {
    !value.is_finite()
}

/// Returns the value at `index` if it exists and is not the sentinel.
pub fn value_at(values: &[f64], index: usize) -> Option<f64> {
    values.get(index).copied().filter(|v| v.is_finite())
}
