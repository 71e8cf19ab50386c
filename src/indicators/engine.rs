//! Turns a [`CandleSeries`] into a full [`IndicatorSet`].

use serde::Serialize;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::indicators::momentum::{MacdSeries, macd, rsi_series};
use crate::indicators::moving_averages::sma_series;
use crate::indicators::series::CandleSeries;
use crate::indicators::volatility::{BollingerBands, atr_series, bollinger};

/// Every indicator for a series, each array aligned index-for-index with the
/// candles. Warm-up slots hold the sentinel.
///
/// Field names follow the standard parameters; with a custom
/// [`EngineConfig`] they carry whatever periods were configured.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSet {
    pub sma20: Vec<f64>,
    pub sma50: Vec<f64>,
    pub sma200: Vec<f64>,
    pub rsi14: Vec<f64>,
    pub macd: MacdSeries,
    pub atr14: Vec<f64>,
    pub bollinger: BollingerBands,
}

impl IndicatorSet {
    /// Number of candles the set was computed from.
    pub fn len(&self) -> usize {
        self.sma20.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sma20.is_empty()
    }
}

/// Stateless indicator calculator. Holds only its parameters, so one engine
/// can be shared across threads and symbols.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: EngineConfig,
}

impl IndicatorEngine {
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn compute(&self, series: &CandleSeries) -> IndicatorSet {
        let cfg = &self.config;
        let closes = series.closes();

        debug!(
            symbol = series.symbol().unwrap_or("-"),
            candles = series.len(),
            "computing indicators"
        );

        IndicatorSet {
            sma20: sma_series(&closes, cfg.sma_short_period),
            sma50: sma_series(&closes, cfg.sma_medium_period),
            sma200: sma_series(&closes, cfg.sma_long_period),
            rsi14: rsi_series(&closes, cfg.rsi_period),
            macd: macd(
                &closes,
                cfg.macd_fast_period,
                cfg.macd_slow_period,
                cfg.macd_signal_period,
            ),
            atr14: atr_series(series.candles(), cfg.atr_period),
            bollinger: bollinger(&closes, cfg.bollinger_period, cfg.bollinger_multiplier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::candle::Candle;

    fn rising_series(len: usize) -> CandleSeries {
        let candles = (0..len)
            .map(|i| {
                let close = 100.0 + i as f64;
                Candle::new(i as u64 + 1, close, close + 0.5, close - 0.5, close, 10.0)
            })
            .collect();
        CandleSeries::new(candles).unwrap()
    }

    #[test]
    fn test_empty_series_gives_empty_arrays() {
        let set = IndicatorEngine::default().compute(&CandleSeries::default());
        assert!(set.is_empty());
        assert!(set.rsi14.is_empty());
        assert!(set.macd.histogram.is_empty());
        assert!(set.bollinger.upper.is_empty());
    }

    #[test]
    fn test_all_arrays_share_length() {
        let set = IndicatorEngine::default().compute(&rising_series(30));
        let lengths = [
            set.sma20.len(),
            set.sma50.len(),
            set.sma200.len(),
            set.rsi14.len(),
            set.macd.line.len(),
            set.macd.signal.len(),
            set.macd.histogram.len(),
            set.atr14.len(),
            set.bollinger.upper.len(),
            set.bollinger.middle.len(),
            set.bollinger.lower.len(),
        ];
        assert!(lengths.iter().all(|&l| l == 30));
        assert!(set.sma50.iter().all(|v| v.is_nan()));
        assert!(set.sma200.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_custom_config_is_used() {
        let config = EngineConfig {
            sma_short_period: 3,
            ..EngineConfig::default()
        };
        let engine = IndicatorEngine::with_config(config).unwrap();
        let set = engine.compute(&rising_series(5));
        assert_eq!(set.sma20[2], 101.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            bollinger_multiplier: f64::NAN,
            ..EngineConfig::default()
        };
        assert!(IndicatorEngine::with_config(config).is_err());
    }

    #[test]
    fn test_sentinels_serialize_as_null() {
        let set = IndicatorEngine::default().compute(&rising_series(2));
        let json = serde_json::to_value(&set).unwrap();
        assert!(json["sma20"][0].is_null());
        assert_eq!(json["atr14"].as_array().unwrap().len(), 2);
    }
}
