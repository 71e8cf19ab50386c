//! Indicator-driven pattern detection (RSI divergence, MACD and SMA50 crossovers, etc.)
//!
//! Each rule is checked per index, like the single/two-candle checks it grew
//! out of, but reads indicator values instead of candle geometry. A rule
//! whose operands include a sentinel simply does not match.

use serde::Serialize;
use tracing::trace;

use crate::indicators::candle::Candle;
use crate::indicators::engine::IndicatorSet;
use crate::indicators::series::CandleSeries;
use crate::indicators::value_at;

/// First index scanned; below this not every indicator has real history.
pub const PATTERN_WARMUP: usize = 50;

const RSI_OVERSOLD: f64 = 30.0;
const DIVERGENCE_LOOKBACK: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternType {
    BullishRsiDivergence,
    BullishMacdCrossover,
    BearishMacdCrossover,
    PriceNearLowerBollinger,
    BullishSma50Crossover,
    BearishSma50Crossover,
}

impl PatternType {
    /// Fixed confidence reported for every match of this rule.
    pub fn confidence(&self) -> f64 {
        match self {
            PatternType::BullishRsiDivergence => 0.70,
            PatternType::BullishMacdCrossover => 0.65,
            PatternType::BearishMacdCrossover => 0.65,
            PatternType::PriceNearLowerBollinger => 0.60,
            PatternType::BullishSma50Crossover => 0.70,
            PatternType::BearishSma50Crossover => 0.70,
        }
    }
}

/// A rule match at one candle index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    #[serde(rename = "type")]
    pub pattern_type: PatternType,
    pub position: usize,
    pub confidence: f64,
    pub reason: String,
}

impl Pattern {
    fn new(pattern_type: PatternType, position: usize, reason: String) -> Self {
        Self {
            pattern_type,
            position,
            confidence: pattern_type.confidence(),
            reason,
        }
    }
}

/// Scans a series and its indicators for pattern matches.
pub struct PatternDetector<'a> {
    candles: &'a [Candle],
    indicators: &'a IndicatorSet,
}

impl<'a> PatternDetector<'a> {
    pub fn new(series: &'a CandleSeries, indicators: &'a IndicatorSet) -> Self {
        Self {
            candles: series.candles(),
            indicators,
        }
    }

    fn close(&self, index: usize) -> Option<f64> {
        self.candles.get(index).map(Candle::get_close)
    }

    fn low(&self, index: usize) -> Option<f64> {
        self.candles.get(index).map(Candle::get_low)
    }

    /// Runs every rule on indices `PATTERN_WARMUP..len`.
    ///
    /// Output is ordered by index, then by rule order. Several patterns may
    /// share an index.
    pub fn detect(&self) -> Vec<Pattern> {
        let mut patterns = Vec::new();

        for index in PATTERN_WARMUP..self.candles.len() {
            let matches = [
                self.bullish_rsi_divergence(index),
                self.bullish_macd_crossover(index),
                self.bearish_macd_crossover(index),
                self.price_near_lower_bollinger(index),
                self.bullish_sma50_crossover(index),
                self.bearish_sma50_crossover(index),
            ];

            for pattern in matches.into_iter().flatten() {
                trace!(kind = ?pattern.pattern_type, index, "pattern matched");
                patterns.push(pattern);
            }
        }

        patterns
    }

    /// RSI climbs back out of oversold while price makes a higher low.
    pub fn bullish_rsi_divergence(&self, index: usize) -> Option<Pattern> {
        let earlier = index.checked_sub(DIVERGENCE_LOOKBACK)?;
        let rsi = &self.indicators.rsi14;

        let rsi_then = value_at(rsi, earlier)?;
        let rsi_prev = value_at(rsi, index.checked_sub(1)?)?;
        let rsi_now = value_at(rsi, index)?;
        let low_then = self.low(earlier)?;
        let low_now = self.low(index)?;

        let matched = rsi_then < RSI_OVERSOLD
            && rsi_now > RSI_OVERSOLD
            && rsi_now > rsi_prev
            && low_then < low_now
            && rsi_then < rsi_now;

        matched.then(|| {
            Pattern::new(
                PatternType::BullishRsiDivergence,
                index,
                format!(
                    "RSI recovered from oversold ({rsi_then:.2} -> {rsi_now:.2}) while the low rose ({low_then} -> {low_now})"
                ),
            )
        })
    }

    pub fn bullish_macd_crossover(&self, index: usize) -> Option<Pattern> {
        let histogram = &self.indicators.macd.histogram;
        let prev = value_at(histogram, index.checked_sub(1)?)?;
        let now = value_at(histogram, index)?;

        (prev <= 0.0 && now > 0.0).then(|| {
            Pattern::new(
                PatternType::BullishMacdCrossover,
                index,
                format!("MACD crossed above its signal line (histogram {prev:.4} -> {now:.4})"),
            )
        })
    }

    pub fn bearish_macd_crossover(&self, index: usize) -> Option<Pattern> {
        let histogram = &self.indicators.macd.histogram;
        let prev = value_at(histogram, index.checked_sub(1)?)?;
        let now = value_at(histogram, index)?;

        (prev >= 0.0 && now < 0.0).then(|| {
            Pattern::new(
                PatternType::BearishMacdCrossover,
                index,
                format!("MACD crossed below its signal line (histogram {prev:.4} -> {now:.4})"),
            )
        })
    }

    /// Close sits within -1% / +0.5% of the lower band.
    pub fn price_near_lower_bollinger(&self, index: usize) -> Option<Pattern> {
        let close = self.close(index)?;
        let lower = value_at(&self.indicators.bollinger.lower, index)?;
        let distance = (close - lower) / close;
        if !distance.is_finite() {
            return None;
        }

        (distance > -0.01 && distance < 0.005).then(|| {
            Pattern::new(
                PatternType::PriceNearLowerBollinger,
                index,
                format!(
                    "close {close} is {:.3}% from the lower Bollinger band {lower:.4}",
                    distance * 100.0
                ),
            )
        })
    }

    pub fn bullish_sma50_crossover(&self, index: usize) -> Option<Pattern> {
        let (close_prev, sma_prev, close_now, sma_now) = self.sma50_pair(index)?;

        (close_prev < sma_prev && close_now > sma_now).then(|| {
            Pattern::new(
                PatternType::BullishSma50Crossover,
                index,
                format!("close crossed above SMA50 ({close_now} > {sma_now:.4})"),
            )
        })
    }

    pub fn bearish_sma50_crossover(&self, index: usize) -> Option<Pattern> {
        let (close_prev, sma_prev, close_now, sma_now) = self.sma50_pair(index)?;

        (close_prev > sma_prev && close_now < sma_now).then(|| {
            Pattern::new(
                PatternType::BearishSma50Crossover,
                index,
                format!("close crossed below SMA50 ({close_now} < {sma_now:.4})"),
            )
        })
    }

    /// (close[i-1], sma50[i-1], close[i], sma50[i]) when all four exist.
    fn sma50_pair(&self, index: usize) -> Option<(f64, f64, f64, f64)> {
        let prev = index.checked_sub(1)?;
        let sma = &self.indicators.sma50;
        Some((
            self.close(prev)?,
            value_at(sma, prev)?,
            self.close(index)?,
            value_at(sma, index)?,
        ))
    }
}

/// Convenience wrapper around [`PatternDetector::detect`].
pub fn detect(series: &CandleSeries, indicators: &IndicatorSet) -> Vec<Pattern> {
    PatternDetector::new(series, indicators).detect()
}
