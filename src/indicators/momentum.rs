//! Momentum indicators: Relative Strength Index (RSI) and MACD

use serde::Serialize;

use crate::indicators::SENTINEL;
use crate::indicators::moving_averages::ema_series;

pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_MACD_FAST: usize = 12;
pub const DEFAULT_MACD_SLOW: usize = 26;
pub const DEFAULT_MACD_SIGNAL: usize = 9;

/// Calculates the RSI series using Wilder's smoothing.
///
/// RSI is a momentum oscillator that measures the speed and magnitude of price changes.
/// It oscillates between 0 and 100.
///
/// RSI = 100 - (100 / (1 + RS))
/// where RS = Average Gain / Average Loss over the period
///
/// The output has the same length as `prices`. RSI needs `period` price
/// changes, i.e. `period + 1` prices, so the first real value sits at index
/// `period` and indices `0..period` hold the sentinel. When the average loss
/// is zero the RSI is exactly 100.
pub fn rsi_series(prices: &[f64], period: usize) -> Vec<f64> {
    let mut rsi_values = vec![SENTINEL; prices.len()];

    // Need at least period + 1 prices to calculate `period` price changes
    if period == 0 || prices.len() < period + 1 {
        return rsi_values;
    }

    let changes = price_changes(prices);
    let (gains, losses) = gains_and_losses(&changes);

    // Seed with the simple average of the first `period` changes
    let mut avg_gain: f64 = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss: f64 = losses[..period].iter().sum::<f64>() / period as f64;
    rsi_values[period] = rsi_from_averages(avg_gain, avg_loss);

    // changes[i] is the move into prices[i + 1]
    for i in period..changes.len() {
        avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
        rsi_values[i + 1] = rsi_from_averages(avg_gain, avg_loss);
    }

    rsi_values
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        // No losses means RSI is 100 (maximum bullish)
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Calculates price changes between consecutive prices.
///
/// Returns a vector of changes where each value is: current - previous
fn price_changes(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// Separates price changes into gains and losses.
///
/// Returns a tuple of (gains, losses) where:
/// - gains[i] = change if positive, else 0
/// - losses[i] = |change| if negative, else 0
fn gains_and_losses(changes: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let gains: Vec<f64> = changes.iter().map(|&c| if c > 0.0 { c } else { 0.0 }).collect();

    let losses: Vec<f64> = changes
        .iter()
        .map(|&c| if c < 0.0 { c.abs() } else { 0.0 })
        .collect();

    (gains, losses)
}

/// MACD line, signal line and histogram, each aligned to the input prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

/// Calculates MACD over `prices`.
///
/// - line = EMA(fast) - EMA(slow), where both are available
/// - signal = EMA(signal_period) of the finite part of the line, placed back
///   at the same indices
/// - histogram = line - signal, where both are available
pub fn macd(prices: &[f64], fast: usize, slow: usize, signal_period: usize) -> MacdSeries {
    let n = prices.len();
    let fast_ema = ema_series(prices, fast);
    let slow_ema = ema_series(prices, slow);

    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(&f, &s)| {
            if f.is_finite() && s.is_finite() {
                f - s
            } else {
                SENTINEL
            }
        })
        .collect();

    let mut signal = vec![SENTINEL; n];
    if let Some(first) = line.iter().position(|v| v.is_finite()) {
        let suffix_signal = ema_series(&line[first..], signal_period);
        signal[first..].copy_from_slice(&suffix_signal);
    }

    let histogram = line
        .iter()
        .zip(&signal)
        .map(|(&l, &s)| {
            if l.is_finite() && s.is_finite() {
                l - s
            } else {
                SENTINEL
            }
        })
        .collect();

    MacdSeries {
        line,
        signal,
        histogram,
    }
}
