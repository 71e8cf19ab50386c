//! Technical indicators, pattern signals and trend classification over
//! OHLCV candle series.
//!
//! Data flows one way:
//!
//! ```text
//! CandleSeries -> IndicatorEngine -> IndicatorSet -> { PatternDetector, TrendClassifier }
//! ```
//!
//! Every step is a pure function of its inputs with no shared state, so the
//! same series always produces bit-identical output and separate series can be
//! processed on separate threads (see [`analysis::analyze_all`]).
//!
//! ```
//! use cct_signals::indicators::candle::Candle;
//! use cct_signals::indicators::series::CandleSeries;
//! use cct_signals::indicators::engine::IndicatorEngine;
//!
//! let candles = (0..20)
//!     .map(|i| {
//!         let close = 100.0 + i as f64;
//!         Candle::new(i + 1, close, close + 1.0, close - 1.0, close, 10.0)
//!     })
//!     .collect();
//! let series = CandleSeries::new(candles).unwrap();
//! let set = IndicatorEngine::default().compute(&series);
//!
//! assert!(set.sma20[18].is_nan());
//! assert_eq!(set.sma20[19], 109.5);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod market;
pub mod signals;

pub use analysis::{Analysis, analyze, analyze_all};
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use indicators::candle::Candle;
pub use indicators::engine::{IndicatorEngine, IndicatorSet};
pub use indicators::series::CandleSeries;
pub use indicators::timeframe::Timeframe;
