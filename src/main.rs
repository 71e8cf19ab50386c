//! cct-signals command-line interface
//!
//! Reads a candle series from a JSON file (or stdin), runs the indicator,
//! pattern and trend pipeline, and prints the analysis as JSON.
//!
//! ```bash
//! cct-signals candles.json --symbol BTCUSDT --timeframe 1h --pretty
//! curl -s "https://api.binance.com/api/v3/klines?symbol=BTCUSDT&interval=1h&limit=300" \
//!     | cct-signals --format binance
//! ```

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::info;

use cct_signals::indicators::candle::Candle;
use cct_signals::indicators::engine::IndicatorEngine;
use cct_signals::indicators::series::CandleSeries;
use cct_signals::indicators::timeframe::Timeframe;
use cct_signals::{EngineConfig, analyze, logging, market};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputFormat {
    /// JSON array of {timestamp, open, high, low, close, volume} objects
    Candles,
    /// Binance REST /klines response
    Binance,
}

#[derive(Parser, Debug)]
#[command(name = "cct-signals")]
#[command(author, version, about = "Indicators, patterns and trend for a candle series")]
struct Args {
    /// Input JSON file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Engine config JSON (indicator periods)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "candles")]
    format: InputFormat,

    /// Symbol label for the output
    #[arg(short, long)]
    symbol: Option<String>,

    /// Timeframe label for the output (1m, 5m, 15m, 30m, 1h, 4h, 1d, 1w)
    #[arg(short, long)]
    timeframe: Option<Timeframe>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.json_logs {
        logging::init_json_logging();
    } else {
        logging::init_logging();
    }

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let engine = IndicatorEngine::with_config(config)?;

    let raw = read_input(args.input.as_ref())?;
    let candles: Vec<Candle> = match args.format {
        InputFormat::Candles => serde_json::from_str(&raw).context("invalid candle JSON")?,
        InputFormat::Binance => market::parse_rest_klines(&raw).context("invalid klines JSON")?,
    };

    let mut series = CandleSeries::new(candles).context("invalid candle series")?;
    if let Some(symbol) = args.symbol {
        series = series.with_symbol(symbol);
    }
    if let Some(timeframe) = args.timeframe {
        series = series.with_timeframe(timeframe);
    }

    info!(candles = series.len(), "analyzing series");
    let analysis = analyze(&series, &engine);

    let output = if args.pretty {
        serde_json::to_string_pretty(&analysis)?
    } else {
        serde_json::to_string(&analysis)?
    };
    println!("{output}");

    Ok(())
}
