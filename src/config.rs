//! Indicator parameters, loadable from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::indicators::momentum::{
    DEFAULT_MACD_FAST, DEFAULT_MACD_SIGNAL, DEFAULT_MACD_SLOW, DEFAULT_RSI_PERIOD,
};
use crate::indicators::volatility::{
    DEFAULT_ATR_PERIOD, DEFAULT_BOLLINGER_MULTIPLIER, DEFAULT_BOLLINGER_PERIOD,
};

/// Periods and multipliers used by [`IndicatorEngine`](crate::indicators::engine::IndicatorEngine).
///
/// Every field is optional in JSON; missing fields take the standard values
/// (SMA 20/50/200, RSI 14, MACD 12/26/9, ATR 14, Bollinger 20 x 2.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub sma_short_period: usize,
    pub sma_medium_period: usize,
    pub sma_long_period: usize,
    pub rsi_period: usize,
    pub macd_fast_period: usize,
    pub macd_slow_period: usize,
    pub macd_signal_period: usize,
    pub atr_period: usize,
    pub bollinger_period: usize,
    pub bollinger_multiplier: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sma_short_period: 20,
            sma_medium_period: 50,
            sma_long_period: 200,
            rsi_period: DEFAULT_RSI_PERIOD,
            macd_fast_period: DEFAULT_MACD_FAST,
            macd_slow_period: DEFAULT_MACD_SLOW,
            macd_signal_period: DEFAULT_MACD_SIGNAL,
            atr_period: DEFAULT_ATR_PERIOD,
            bollinger_period: DEFAULT_BOLLINGER_PERIOD,
            bollinger_multiplier: DEFAULT_BOLLINGER_MULTIPLIER,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Rejects parameter combinations that cannot produce meaningful output.
    ///
    /// Zero periods are allowed; they simply yield all-sentinel indicators.
    pub fn validate(&self) -> Result<()> {
        if !self.bollinger_multiplier.is_finite() || self.bollinger_multiplier < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "bollinger_multiplier must be finite and >= 0, got {}",
                self.bollinger_multiplier
            )));
        }

        if self.macd_fast_period >= self.macd_slow_period {
            return Err(Error::InvalidConfig(format!(
                "macd_fast_period ({}) must be shorter than macd_slow_period ({})",
                self.macd_fast_period, self.macd_slow_period
            )));
        }

        Ok(())
    }
}
