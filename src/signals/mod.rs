//! Trading signals derived from indicators: discrete patterns and the overall trend.

pub mod patterns;
pub mod trend;

pub use patterns::{Pattern, PatternDetector, PatternType, detect};
pub use trend::{Trend, TrendAssessment, classify};
