//! One-shot pipeline: candles -> indicators -> {patterns, trend}.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::error::Result;
use crate::indicators::engine::{IndicatorEngine, IndicatorSet};
use crate::indicators::series::CandleSeries;
use crate::indicators::timeframe::Timeframe;
use crate::signals::patterns::{Pattern, detect};
use crate::signals::trend::{TrendAssessment, classify};

/// Everything computed for one series, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub symbol: Option<String>,
    pub timeframe: Option<Timeframe>,
    pub candles: usize,
    pub indicators: IndicatorSet,
    pub patterns: Vec<Pattern>,
    pub trend: TrendAssessment,
}

pub fn analyze(series: &CandleSeries, engine: &IndicatorEngine) -> Analysis {
    let indicators = engine.compute(series);
    let patterns = detect(series, &indicators);
    let trend = classify(series, &indicators);

    debug!(
        symbol = series.symbol().unwrap_or("-"),
        patterns = patterns.len(),
        trend = ?trend.trend,
        strength = trend.strength,
        "analysis complete"
    );

    Analysis {
        symbol: series.symbol().map(str::to_owned),
        timeframe: series.timeframe(),
        candles: series.len(),
        indicators,
        patterns,
        trend,
    }
}

/// Analyzes many series in parallel, one blocking task per series.
///
/// Results come back in the same order as `batch`. A task that panics
/// surfaces as [`Error::Task`](crate::error::Error::Task).
pub async fn analyze_all(
    batch: Vec<CandleSeries>,
    engine: Arc<IndicatorEngine>,
) -> Result<Vec<Analysis>> {
    run_batch(batch, move |series| analyze(series, &engine)).await
}

async fn run_batch<F>(batch: Vec<CandleSeries>, analyze_one: F) -> Result<Vec<Analysis>>
where
    F: Fn(&CandleSeries) -> Analysis + Send + Sync + 'static,
{
    let total = batch.len();
    let analyze_one = Arc::new(analyze_one);
    let mut tasks = JoinSet::new();

    for (slot, series) in batch.into_iter().enumerate() {
        let analyze_one = Arc::clone(&analyze_one);
        tasks.spawn_blocking(move || (slot, analyze_one(&series)));
    }

    let mut results: Vec<Option<Analysis>> = vec![None; total];
    while let Some(joined) = tasks.join_next().await {
        let (slot, analysis) = joined?;
        results[slot] = Some(analysis);
    }

    info!(series = total, "batch analysis complete");

    // every slot was filled by exactly one successful task
    Ok(results.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::indicators::candle::Candle;

    fn series(symbol: &str, len: usize, step: f64) -> CandleSeries {
        let candles = (0..len)
            .map(|i| {
                let close = 100.0 + step * i as f64;
                Candle::new(i as u64 + 1, close, close + 1.0, close - 1.0, close, 1.0)
            })
            .collect();
        CandleSeries::new(candles).unwrap().with_symbol(symbol)
    }

    #[test]
    fn test_analyze_empty() {
        let analysis = analyze(&CandleSeries::default(), &IndicatorEngine::default());
        assert_eq!(analysis.candles, 0);
        assert!(analysis.indicators.is_empty());
        assert!(analysis.patterns.is_empty());
        assert_eq!(analysis.trend, TrendAssessment::neutral());
    }

    #[test]
    fn test_analyze_labels_output() {
        let s = series("ETHUSDT", 10, 1.0).with_timeframe(Timeframe::M15);
        let analysis = analyze(&s, &IndicatorEngine::default());
        assert_eq!(analysis.symbol.as_deref(), Some("ETHUSDT"));
        assert_eq!(analysis.timeframe, Some(Timeframe::M15));
        assert_eq!(analysis.candles, 10);
    }

    #[tokio::test]
    async fn test_analyze_all_preserves_order() {
        let batch = vec![
            series("BTCUSDT", 220, 1.0),
            series("ETHUSDT", 220, -0.25),
            series("SOLUSDT", 5, 0.0),
        ];
        let engine = Arc::new(IndicatorEngine::default());
        let expected: Vec<Analysis> = batch.iter().map(|s| analyze(s, &engine)).collect();

        let results = analyze_all(batch, engine).await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].symbol.as_deref(), Some("BTCUSDT"));
        assert_eq!(results[1].symbol.as_deref(), Some("ETHUSDT"));
        assert_eq!(results[2].symbol.as_deref(), Some("SOLUSDT"));
        assert_eq!(
            serde_json::to_string(&results).unwrap(),
            serde_json::to_string(&expected).unwrap()
        );
    }

    #[tokio::test]
    async fn test_analyze_all_empty_batch() {
        let results = analyze_all(Vec::new(), Arc::new(IndicatorEngine::default()))
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_panicking_task_fails_the_batch() {
        let batch = vec![series("BTCUSDT", 30, 1.0), series("BADUSDT", 30, 1.0)];
        let engine = IndicatorEngine::default();

        let result = run_batch(batch, move |s| {
            if s.symbol() == Some("BADUSDT") {
                panic!("analysis blew up");
            }
            analyze(s, &engine)
        })
        .await;

        match result {
            Err(Error::Task(err)) => assert!(err.is_panic()),
            other => panic!("expected Error::Task, got {other:?}"),
        }
    }
}
