//! Moving Average indicators: Simple Moving Average (SMA) and Exponential Moving Average (EMA)

use crate::indicators::SENTINEL;

/// Calculates the full SMA series over `prices`.
///
/// SMA = (P1 + P2 + ... + Pn) / n
///
/// The output has the same length as `prices`. Indices `0..period-1` hold the
/// sentinel; from `period - 1` onward each value is the mean of the window
/// ending at that index. Every window is summed from scratch so no rounding
/// drift accumulates along the series.
pub fn sma_series(prices: &[f64], period: usize) -> Vec<f64> {
    let mut sma_values = vec![SENTINEL; prices.len()];
    if period == 0 || prices.len() < period {
        return sma_values;
    }

    for i in (period - 1)..prices.len() {
        let start = i + 1 - period;
        let sum: f64 = prices[start..=i].iter().sum();
        sma_values[i] = sum / period as f64;
    }

    sma_values
}

/// Calculates the full EMA series over `prices`.
///
/// EMA gives more weight to recent prices using a smoothing multiplier.
/// EMA = Price * multiplier + EMA_prev * (1 - multiplier)
/// where multiplier = 2 / (period + 1)
///
/// The first EMA value, at index `period - 1`, is seeded with the SMA of the
/// first `period` prices. Earlier indices hold the sentinel.
pub fn ema_series(prices: &[f64], period: usize) -> Vec<f64> {
    let mut ema_values = vec![SENTINEL; prices.len()];
    if period == 0 || prices.len() < period {
        return ema_values;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);

    let seed: f64 = prices[..period].iter().sum::<f64>() / period as f64;
    ema_values[period - 1] = seed;

    let mut prev_ema = seed;
    for i in period..prices.len() {
        prev_ema = prices[i] * multiplier + prev_ema * (1.0 - multiplier);
        ema_values[i] = prev_ema;
    }

    ema_values
}
