//! Validated, immutable candle sequence for one symbol/timeframe.

use tracing::warn;

use crate::error::{Error, Result};
use crate::indicators::candle::Candle;
use crate::indicators::timeframe::Timeframe;

/// An ordered collection of candles, oldest first.
///
/// Construction validates the input once so every indicator can assume
/// finite, non-negative prices, `low <= open, close <= high`, and strictly
/// ascending timestamps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandleSeries {
    candles: Vec<Candle>,
    symbol: Option<String>,
    timeframe: Option<Timeframe>,
}

impl CandleSeries {
    /// Builds a series, rejecting non-finite or negative OHLCV values,
    /// inconsistent OHLC geometry, and timestamps that do not strictly increase.
    pub fn new(candles: Vec<Candle>) -> Result<Self> {
        for (index, candle) in candles.iter().enumerate() {
            candle.validate(index).inspect_err(|e| warn!(%e, "rejected candle series"))?;
        }

        for (index, pair) in candles.windows(2).enumerate() {
            let previous = pair[0].get_timestamp();
            let current = pair[1].get_timestamp();
            if current <= previous {
                let err = Error::NonAscendingTimestamp {
                    index: index + 1,
                    previous,
                    current,
                };
                warn!(%err, "rejected candle series");
                return Err(err);
            }
        }

        Ok(Self {
            candles,
            symbol: None,
            timeframe: None,
        })
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = Some(timeframe);
        self
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn timeframe(&self) -> Option<Timeframe> {
        self.timeframe
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Closing prices in series order.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(Candle::get_close).collect()
    }
}
