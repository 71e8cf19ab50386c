//! Candle (OHLCV) data structure with timestamp

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Represents a single candlestick with OHLCV data and timestamp.
///
/// The timestamp is stored as Unix time in milliseconds, which is the format
/// used by most cryptocurrency exchanges (Binance, Coinbase, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Unix timestamp in milliseconds (candle open time)
    timestamp: u64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl Candle {
    /// Creates a new Candle.
    ///
    /// `timestamp` should be Unix time in milliseconds (candle open time).
    /// No checks happen here; [`CandleSeries::new`](super::series::CandleSeries::new)
    /// validates every candle it is given.
    pub fn new(
        timestamp: u64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns the candle's timestamp (Unix time in milliseconds).
    pub fn get_timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn get_open(&self) -> f64 {
        self.open
    }

    pub fn get_high(&self) -> f64 {
        self.high
    }

    pub fn get_low(&self) -> f64 {
        self.low
    }

    pub fn get_close(&self) -> f64 {
        self.close
    }

    pub fn get_volume(&self) -> f64 {
        self.volume
    }

    /// Returns the full range of the candle (high - low).
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the body of the candle (close - open).
    ///
    /// Positive for green candles, negative for red candles.
    pub fn body(&self) -> f64 {
        self.close - self.open
    }

    /// Checks that every OHLCV value is finite and non-negative, that
    /// `high >= low`, and that open and close lie within `[low, high]`.
    ///
    /// `index` is the candle's position in its series and is only used to
    /// build the error.
    pub fn validate(&self, index: usize) -> Result<()> {
        let fields = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidCandle {
                    index,
                    field,
                    value,
                });
            }
        }

        if self.high < self.low {
            return Err(Error::InvertedCandle {
                index,
                high: self.high,
                low: self.low,
            });
        }

        for (field, value) in [("open", self.open), ("close", self.close)] {
            if value < self.low || value > self.high {
                return Err(Error::CandleOutOfRange {
                    index,
                    field,
                    value,
                    low: self.low,
                    high: self.high,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range() {
        let candle = Candle::new(0, 100.0, 110.0, 95.0, 105.0, 1000.0);
        assert_eq!(candle.range(), 15.0);
    }

    #[test]
    fn test_body() {
        let green = Candle::new(0, 100.0, 110.0, 95.0, 105.0, 1000.0);
        let red = Candle::new(0, 105.0, 110.0, 95.0, 100.0, 1000.0);
        assert_eq!(green.body(), 5.0);
        assert_eq!(red.body(), -5.0);
    }

    #[test]
    fn test_validate_accepts_normal_candle() {
        let candle = Candle::new(1_000, 100.0, 110.0, 95.0, 105.0, 0.0);
        assert!(candle.validate(0).is_ok());
    }

    #[test]
    fn test_validate_rejects_nan_close() {
        let candle = Candle::new(0, 100.0, 110.0, 95.0, f64::NAN, 1000.0);
        match candle.validate(7) {
            Err(Error::InvalidCandle { index, field, .. }) => {
                assert_eq!(index, 7);
                assert_eq!(field, "close");
            }
            other => panic!("expected InvalidCandle, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_negative_volume() {
        let candle = Candle::new(0, 100.0, 110.0, 95.0, 105.0, -1.0);
        assert!(matches!(
            candle.validate(0),
            Err(Error::InvalidCandle { field: "volume", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_infinite_high() {
        let candle = Candle::new(0, 100.0, f64::INFINITY, 95.0, 105.0, 1.0);
        assert!(candle.validate(0).is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        // high below low would make the range, and so the true range, negative
        let candle = Candle::new(0, 50.0, 1.0, 100.0, 50.0, 1.0);
        match candle.validate(0) {
            Err(Error::InvertedCandle { index, high, low }) => {
                assert_eq!(index, 0);
                assert_eq!(high, 1.0);
                assert_eq!(low, 100.0);
            }
            other => panic!("expected InvertedCandle, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_open_above_high() {
        let candle = Candle::new(0, 111.0, 110.0, 95.0, 105.0, 1.0);
        assert!(matches!(
            candle.validate(2),
            Err(Error::CandleOutOfRange {
                index: 2,
                field: "open",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_close_below_low() {
        let candle = Candle::new(0, 100.0, 110.0, 95.0, 94.5, 1.0);
        assert!(matches!(
            candle.validate(0),
            Err(Error::CandleOutOfRange { field: "close", .. })
        ));
    }

    #[test]
    fn test_validate_accepts_flat_candle() {
        // open == high == low == close is a legal zero-range candle
        let candle = Candle::new(0, 1.0, 1.0, 1.0, 1.0, 0.0);
        assert!(candle.validate(0).is_ok());
    }

    #[test]
    fn test_json_field_names() {
        let candle = Candle::new(1638747660000, 1.0, 2.0, 0.5, 1.5, 10.0);
        let json = serde_json::to_string(&candle).unwrap();
        assert_eq!(
            json,
            r#"{"timestamp":1638747660000,"open":1.0,"high":2.0,"low":0.5,"close":1.5,"volume":10.0}"#
        );
        let back: Candle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, candle);
    }
}
