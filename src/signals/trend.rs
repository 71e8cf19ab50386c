//! Trend direction and strength as of the latest candle.

use serde::Serialize;

use crate::indicators::engine::IndicatorSet;
use crate::indicators::series::CandleSeries;
use crate::indicators::value_at;

/// Strength reported when bullish and bearish points tie.
pub const NEUTRAL_STRENGTH: f64 = 0.4;

/// Highest score either side can reach (3 + 1 + 2 + 3).
const MAX_POINTS: f64 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendAssessment {
    pub trend: Trend,
    pub strength: f64,
}

impl TrendAssessment {
    pub fn neutral() -> Self {
        Self {
            trend: Trend::Neutral,
            strength: NEUTRAL_STRENGTH,
        }
    }
}

/// Compares two optional values; a missing side makes the comparison false.
fn gt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}

fn lt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a < b)
}

/// Scores SMA alignment and the close's position against SMA20/50/200 at the
/// last index.
///
/// Each side earns 3 for a fully stacked SMA alignment, then 1/2/3 for the
/// close being beyond SMA20/50/200. The larger side wins with strength
/// points / 9; a tie (including an empty series) is neutral at 0.4.
pub fn classify(series: &CandleSeries, indicators: &IndicatorSet) -> TrendAssessment {
    let Some(last) = series.len().checked_sub(1) else {
        return TrendAssessment::neutral();
    };

    let close = series.get(last).map(|c| c.get_close());
    let sma20 = value_at(&indicators.sma20, last);
    let sma50 = value_at(&indicators.sma50, last);
    let sma200 = value_at(&indicators.sma200, last);

    let aligned_bullish = gt(sma20, sma50) && gt(sma50, sma200);
    let aligned_bearish = lt(sma20, sma50) && lt(sma50, sma200);

    let bullish_points = 3 * u32::from(aligned_bullish)
        + u32::from(gt(close, sma20))
        + 2 * u32::from(gt(close, sma50))
        + 3 * u32::from(gt(close, sma200));

    let bearish_points = 3 * u32::from(aligned_bearish)
        + u32::from(lt(close, sma20))
        + 2 * u32::from(lt(close, sma50))
        + 3 * u32::from(lt(close, sma200));

    match bullish_points.cmp(&bearish_points) {
        std::cmp::Ordering::Greater => TrendAssessment {
            trend: Trend::Bullish,
            strength: f64::from(bullish_points) / MAX_POINTS,
        },
        std::cmp::Ordering::Less => TrendAssessment {
            trend: Trend::Bearish,
            strength: f64::from(bearish_points) / MAX_POINTS,
        },
        std::cmp::Ordering::Equal => TrendAssessment::neutral(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::candle::Candle;
    use crate::indicators::engine::IndicatorEngine;

    fn series_from_closes(closes: &[f64]) -> CandleSeries {
        let candles = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle::new(i as u64 + 1, c, c + 1.0, (c - 1.0).max(0.0), c, 5.0))
            .collect();
        CandleSeries::new(candles).unwrap()
    }

    #[test]
    fn test_flat_series_is_neutral() {
        let series = series_from_closes(&[100.0; 250]);
        let indicators = IndicatorEngine::default().compute(&series);
        let trend = classify(&series, &indicators);
        assert_eq!(trend.trend, Trend::Neutral);
        assert_eq!(trend.strength, 0.4);
    }

    #[test]
    fn test_steady_uptrend_is_fully_bullish() {
        let closes: Vec<f64> = (0..250).map(|i| 100.0 + i as f64).collect();
        let series = series_from_closes(&closes);
        let indicators = IndicatorEngine::default().compute(&series);
        let trend = classify(&series, &indicators);
        assert_eq!(trend.trend, Trend::Bullish);
        assert_eq!(trend.strength, 1.0);
    }

    #[test]
    fn test_steady_downtrend_is_fully_bearish() {
        let closes: Vec<f64> = (0..250).map(|i| 400.0 - i as f64).collect();
        let series = series_from_closes(&closes);
        let indicators = IndicatorEngine::default().compute(&series);
        let trend = classify(&series, &indicators);
        assert_eq!(trend.trend, Trend::Bearish);
        assert_eq!(trend.strength, 1.0);
    }

    #[test]
    fn test_missing_sma200_still_scores() {
        // 60 rising candles: SMA200 is still warming up
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let series = series_from_closes(&closes);
        let indicators = IndicatorEngine::default().compute(&series);
        let trend = classify(&series, &indicators);
        // close > SMA20 (1) + close > SMA50 (2); no alignment, no SMA200 points
        assert_eq!(trend.trend, Trend::Bullish);
        assert_eq!(trend.strength, 3.0 / 9.0);
    }

    #[test]
    fn test_empty_series_is_neutral() {
        let series = CandleSeries::default();
        let indicators = IndicatorEngine::default().compute(&series);
        assert_eq!(classify(&series, &indicators), TrendAssessment::neutral());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_value(TrendAssessment::neutral()).unwrap();
        assert_eq!(json["trend"], "neutral");
        assert_eq!(json["strength"], 0.4);
    }
}
