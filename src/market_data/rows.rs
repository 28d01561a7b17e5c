//! Row types of the positional codec.

use serde_json::{Number, Value};
use time::OffsetDateTime;

use super::{CodecError, Row, mismatch, positional_serde};
use crate::types::{BuySell, DecimalString};

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

fn text(target: &'static str, items: &[Value], index: usize) -> Result<String, CodecError> {
    match &items[index] {
        Value::String(s) => Ok(s.clone()),
        other => Err(mismatch(target, Some(index), "string", other)),
    }
}

fn decimal(target: &'static str, items: &[Value], index: usize) -> Result<DecimalString, CodecError> {
    text(target, items, index).map(DecimalString::from)
}

/// Whole value of a JSON number; any fractional part is truncated toward zero.
fn whole_number(target: &'static str, items: &[Value], index: usize) -> Result<i64, CodecError> {
    let value = &items[index];
    let Value::Number(n) = value else {
        return Err(mismatch(target, Some(index), "number", value));
    };
    if let Some(whole) = n.as_i64() {
        return Ok(whole);
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 => Ok(f.trunc() as i64),
        _ => Err(mismatch(target, Some(index), "number within i64 range", value)),
    }
}

fn integer(target: &'static str, items: &[Value], index: usize) -> Result<i64, CodecError> {
    let value = &items[index];
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| mismatch(target, Some(index), "integer", value)),
        other => Err(mismatch(target, Some(index), "integer", other)),
    }
}

fn string_value(s: &str) -> Value {
    Value::String(s.to_owned())
}

/// One candle: `[time, open, high, low, close, vwap, volume, count]`.
///
/// `time` and `count` arrive as JSON numbers and are truncated to whole
/// values; the six price/volume fields are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OhlcPoint {
    /// Candle start, Unix seconds.
    pub time: i64,
    pub open: DecimalString,
    pub high: DecimalString,
    pub low: DecimalString,
    pub close: DecimalString,
    /// Volume-weighted average price.
    pub vwap: DecimalString,
    pub volume: DecimalString,
    /// Number of trades in the interval.
    pub count: i64,
}

impl Row for OhlcPoint {
    const NAME: &'static str = "OHLC row";
    const SERIES: &'static str = "OHLC series";
    const WIDTH: usize = 8;

    fn decode(items: &[Value]) -> Result<Self, CodecError> {
        let n = Self::NAME;
        Ok(Self {
            time: whole_number(n, items, 0)?,
            open: decimal(n, items, 1)?,
            high: decimal(n, items, 2)?,
            low: decimal(n, items, 3)?,
            close: decimal(n, items, 4)?,
            vwap: decimal(n, items, 5)?,
            volume: decimal(n, items, 6)?,
            count: whole_number(n, items, 7)?,
        })
    }

    fn encode(&self) -> Vec<Value> {
        vec![
            Value::from(self.time),
            string_value(self.open.as_str()),
            string_value(self.high.as_str()),
            string_value(self.low.as_str()),
            string_value(self.close.as_str()),
            string_value(self.vwap.as_str()),
            string_value(self.volume.as_str()),
            Value::from(self.count),
        ]
    }
}

/// One price level of an order book: `[price, volume, timestamp]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookLevel {
    pub price: DecimalString,
    pub volume: DecimalString,
    /// Last update of the level, Unix seconds (truncated).
    pub timestamp: i64,
}

impl Row for BookLevel {
    const NAME: &'static str = "book level";
    const SERIES: &'static str = "book side";
    const WIDTH: usize = 3;

    fn decode(items: &[Value]) -> Result<Self, CodecError> {
        Ok(Self {
            price: decimal(Self::NAME, items, 0)?,
            volume: decimal(Self::NAME, items, 1)?,
            timestamp: whole_number(Self::NAME, items, 2)?,
        })
    }

    fn encode(&self) -> Vec<Value> {
        vec![
            string_value(self.price.as_str()),
            string_value(self.volume.as_str()),
            Value::from(self.timestamp),
        ]
    }
}

/// One public trade: `[price, volume, time, side, order type, misc, trade id]`.
///
/// The venue sends `time` as floating-point seconds. It is split into whole
/// seconds and a fraction; the fraction is scaled to nanoseconds and
/// truncated. Precision is therefore bounded by the `f64` the value arrived
/// as (a few hundred nanoseconds for current timestamps).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeTick {
    pub price: DecimalString,
    pub volume: DecimalString,
    pub time: OffsetDateTime,
    /// `"b"` or `"s"`.
    pub side: String,
    /// `"m"` (market) or `"l"` (limit).
    pub order_type: String,
    pub misc: String,
    pub trade_id: i64,
}

impl TradeTick {
    /// Trade time as Unix nanoseconds.
    pub fn unix_nanos(&self) -> i128 {
        self.time.unix_timestamp_nanos()
    }

    /// `None` for a side code Kraken has not documented.
    pub fn side(&self) -> Option<BuySell> {
        BuySell::from_code(&self.side)
    }

    pub fn is_buy(&self) -> bool {
        self.side() == Some(BuySell::Buy)
    }
}

/// Rebuild a timestamp from float seconds, truncating below the nanosecond.
pub fn time_from_float_seconds(secs: f64) -> Option<OffsetDateTime> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.trunc();
    let nanos = ((secs - whole) * NANOS_PER_SECOND).trunc() as i128;
    let total = (whole as i128) * 1_000_000_000 + nanos;
    OffsetDateTime::from_unix_timestamp_nanos(total).ok()
}

/// Float seconds for a timestamp, the inverse of [`time_from_float_seconds`] up to `f64` precision.
pub fn time_to_float_seconds(time: OffsetDateTime) -> f64 {
    time.unix_timestamp() as f64 + f64::from(time.nanosecond()) / NANOS_PER_SECOND
}

impl Row for TradeTick {
    const NAME: &'static str = "trade";
    const SERIES: &'static str = "trade series";
    const WIDTH: usize = 7;

    fn decode(items: &[Value]) -> Result<Self, CodecError> {
        let n = Self::NAME;
        let price = decimal(n, items, 0)?;
        let volume = decimal(n, items, 1)?;
        let time = match &items[2] {
            Value::Number(num) => num
                .as_f64()
                .and_then(time_from_float_seconds)
                .ok_or_else(|| mismatch(n, Some(2), "timestamp in range", &items[2]))?,
            other => return Err(mismatch(n, Some(2), "number", other)),
        };
        Ok(Self {
            price,
            volume,
            time,
            side: text(n, items, 3)?,
            order_type: text(n, items, 4)?,
            misc: text(n, items, 5)?,
            trade_id: integer(n, items, 6)?,
        })
    }

    fn encode(&self) -> Vec<Value> {
        let time = Number::from_f64(time_to_float_seconds(self.time))
            .map(Value::Number)
            .unwrap_or(Value::Null);
        vec![
            string_value(self.price.as_str()),
            string_value(self.volume.as_str()),
            time,
            string_value(&self.side),
            string_value(&self.order_type),
            string_value(&self.misc),
            Value::from(self.trade_id),
        ]
    }
}

/// Best bid/ask at a moment: `[time, bid, ask]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadPoint {
    pub time: i64,
    pub bid: DecimalString,
    pub ask: DecimalString,
}

impl Row for SpreadPoint {
    const NAME: &'static str = "spread";
    const SERIES: &'static str = "spread series";
    const WIDTH: usize = 3;

    fn decode(items: &[Value]) -> Result<Self, CodecError> {
        Ok(Self {
            time: whole_number(Self::NAME, items, 0)?,
            bid: decimal(Self::NAME, items, 1)?,
            ask: decimal(Self::NAME, items, 2)?,
        })
    }

    fn encode(&self) -> Vec<Value> {
        vec![
            Value::from(self.time),
            string_value(self.bid.as_str()),
            string_value(self.ask.as_str()),
        ]
    }
}

positional_serde!(OhlcPoint, BookLevel, TradeTick, SpreadPoint);
