//! Binance kline payload decoding.
//!
//! Turns the exchange's kline JSON (WebSocket events and the REST `/klines`
//! array format) into [`Candle`] values. Nothing here opens a connection;
//! callers bring the payloads.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::indicators::candle::Candle;
use crate::indicators::series::CandleSeries;
use crate::indicators::timeframe::Timeframe;

/// A decoded kline event: the candle plus its streaming context.
///
/// WARNING: if `is_closed` is false the candle is still updating and must not
/// feed indicator calculations.
#[derive(Debug, Clone, PartialEq)]
pub struct KlineEvent {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub candle: Candle,
    pub is_closed: bool,
}

// Binance nests kline data in a "k" object and sends prices as strings
#[derive(Debug, Deserialize)]
struct RawKlineMessage {
    #[serde(rename = "s")]
    symbol: String,
    #[serde(rename = "k")]
    kline: RawKline,
}

#[derive(Debug, Deserialize)]
struct RawKline {
    #[serde(rename = "t")]
    open_time: u64,
    #[serde(rename = "i")]
    interval: String,
    #[serde(rename = "o")]
    open: String,
    #[serde(rename = "h")]
    high: String,
    #[serde(rename = "l")]
    low: String,
    #[serde(rename = "c")]
    close: String,
    #[serde(rename = "v")]
    volume: String,
    #[serde(rename = "x")]
    is_closed: bool,
}

fn parse_price(field: &'static str, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|_| Error::Decode(format!("{field} is not a number: '{raw}'")))
}

/// Decodes a WebSocket kline message.
///
/// Returns `Ok(None)` for anything that is not a kline event (trades,
/// subscription confirmations, ...).
pub fn parse_kline_event(msg: &str) -> Result<Option<KlineEvent>> {
    let value: Value = serde_json::from_str(msg)?;
    if value.get("e").and_then(Value::as_str) != Some("kline") {
        return Ok(None);
    }

    let raw: RawKlineMessage = serde_json::from_value(value)?;
    let k = raw.kline;
    let candle = Candle::new(
        k.open_time,
        parse_price("open", &k.open)?,
        parse_price("high", &k.high)?,
        parse_price("low", &k.low)?,
        parse_price("close", &k.close)?,
        parse_price("volume", &k.volume)?,
    );

    Ok(Some(KlineEvent {
        symbol: raw.symbol,
        timeframe: k.interval.parse()?,
        candle,
        is_closed: k.is_closed,
    }))
}

fn row_price(row: &[Value], index: usize, field: &'static str) -> Result<f64> {
    match row.get(index) {
        Some(Value::String(s)) => parse_price(field, s),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| Error::Decode(format!("{field} out of range"))),
        _ => Err(Error::Decode(format!("missing {field}"))),
    }
}

/// Decodes the REST `/klines` response: an array of
/// `[openTime, open, high, low, close, volume, closeTime, ...]` rows.
pub fn parse_rest_klines(body: &str) -> Result<Vec<Candle>> {
    let rows: Vec<Vec<Value>> = serde_json::from_str(body)?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| -> Result<Candle> {
            let open_time = row
                .first()
                .and_then(Value::as_u64)
                .ok_or_else(|| Error::Decode(format!("row {i}: missing open time")))?;
            Ok(Candle::new(
                open_time,
                row_price(row, 1, "open")?,
                row_price(row, 2, "high")?,
                row_price(row, 3, "low")?,
                row_price(row, 4, "close")?,
                row_price(row, 5, "volume")?,
            ))
        })
        .collect()
}

/// Builds a validated series from the closed candles among `events`.
///
/// The series is labelled with the symbol and timeframe of the first closed
/// event.
pub fn closed_series(events: impl IntoIterator<Item = KlineEvent>) -> Result<CandleSeries> {
    let closed: Vec<KlineEvent> = events.into_iter().filter(|e| e.is_closed).collect();
    let label = closed.first().map(|e| (e.symbol.clone(), e.timeframe));

    let series = CandleSeries::new(closed.iter().map(|e| e.candle).collect())?;
    Ok(match label {
        Some((symbol, timeframe)) => series.with_symbol(symbol).with_timeframe(timeframe),
        None => series,
    })
}
