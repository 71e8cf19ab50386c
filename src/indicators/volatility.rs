//! Volatility indicators: True Range (TR), Average True Range (ATR) and Bollinger Bands

use serde::Serialize;

use crate::indicators::SENTINEL;
use crate::indicators::candle::Candle;
use crate::indicators::moving_averages::sma_series;

pub const DEFAULT_ATR_PERIOD: usize = 14;
pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_MULTIPLIER: f64 = 2.0;

/// Calculates the True Range for a single candle.
///
/// True Range is the greatest of:
/// - Current High - Current Low (candle range)
/// - |Current High - Previous Close|
/// - |Current Low - Previous Close|
///
/// For the first candle (no previous close), returns the candle's range.
pub fn true_range(candle: &Candle, prev_close: Option<f64>) -> f64 {
    match prev_close {
        Some(prev) => {
            let high_prev = (candle.get_high() - prev).abs();
            let low_prev = (candle.get_low() - prev).abs();
            candle.range().max(high_prev).max(low_prev)
        }
        None => candle.range(),
    }
}

/// Calculates the Wilder-smoothed ATR series.
///
/// The seed at index `period - 1` is the mean of the first `period` true
/// ranges, counting the first candle's plain range. After that:
/// ATR = (ATR_prev * (period - 1) + TR) / period
pub fn atr_series(candles: &[Candle], period: usize) -> Vec<f64> {
    let mut atr_values = vec![SENTINEL; candles.len()];
    if period == 0 || candles.len() < period {
        return atr_values;
    }

    let ranges: Vec<f64> = candles
        .iter()
        .enumerate()
        .map(|(i, candle)| {
            let prev_close = if i > 0 {
                Some(candles[i - 1].get_close())
            } else {
                None
            };
            true_range(candle, prev_close)
        })
        .collect();

    let mut atr = ranges[..period].iter().sum::<f64>() / period as f64;
    atr_values[period - 1] = atr;

    for i in period..candles.len() {
        atr = (atr * (period - 1) as f64 + ranges[i]) / period as f64;
        atr_values[i] = atr;
    }

    atr_values
}

/// Upper, middle and lower Bollinger bands aligned to the input prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Calculates Bollinger Bands.
///
/// The middle band is the SMA over `period`; the outer bands sit
/// `multiplier` population standard deviations (÷n) away from it, measured
/// over the same window.
pub fn bollinger(prices: &[f64], period: usize, multiplier: f64) -> BollingerBands {
    let middle = sma_series(prices, period);
    let mut upper = vec![SENTINEL; prices.len()];
    let mut lower = vec![SENTINEL; prices.len()];

    if period == 0 || prices.len() < period {
        return BollingerBands {
            upper,
            middle,
            lower,
        };
    }

    for i in (period - 1)..prices.len() {
        let mean = middle[i];
        let window = &prices[i + 1 - period..=i];
        let variance = window.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / period as f64;
        let width = multiplier * variance.sqrt();
        upper[i] = mean + width;
        lower[i] = mean - width;
    }

    BollingerBands {
        upper,
        middle,
        lower,
    }
}
