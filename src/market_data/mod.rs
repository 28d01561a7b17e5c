//! Positional-array codec for market-data payloads.
//!
//! Kraken ships candles, order-book levels, trades and spreads as bare JSON
//! arrays whose meaning depends on the element position:
//!
//! ```json
//! {"XXBTZUSD": [[1688671200, "30306.1", "30306.2", "30306.1", "30306.1", "30306.1", "3.39243896", 23]], "last": 1688672160}
//! ```
//!
//! Each record type implements [`Row`]; the containers in [`series`] wrap a
//! pair's rows together with the pagination cursor. Prices and volumes stay
//! verbatim [`DecimalString`](crate::types::DecimalString)s, timestamps are
//! converted as documented on each row type.

pub mod rows;
pub mod series;

use serde_json::Value;
use thiserror::Error;

pub use rows::{BookLevel, OhlcPoint, SpreadPoint, TradeTick};
pub use series::{Cursor, OhlcSeries, OrderBook, PairSeries, SpreadSeries, TradeSeries};

/// A payload did not match the positional layout it was decoded as.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// An element (or the row itself) had the wrong JSON kind or length.
    #[error("{target}: expected {expected}{}, found {found}", position(.index))]
    TypeMismatch {
        /// Record being decoded, e.g. `"OHLC row"`.
        target: &'static str,
        /// Element position, `None` when the row itself is wrong.
        index: Option<usize>,
        expected: String,
        found: String,
    },

    /// A container object had an unexpected set of keys.
    #[error("{target}: unexpected keys {keys:?}")]
    Structure {
        target: &'static str,
        /// Every key observed, sorted.
        keys: Vec<String>,
    },
}

fn position(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at index {i}"),
        None => String::new(),
    }
}

/// A fixed-width positional record.
pub trait Row: Sized {
    /// Name used in error messages.
    const NAME: &'static str;
    /// Name of a container of these rows, used in error messages.
    const SERIES: &'static str;
    /// Number of elements on the wire.
    const WIDTH: usize;

    /// Decode from the elements of one array. `items.len()` has not been checked.
    fn decode(items: &[Value]) -> Result<Self, CodecError>;

    /// Produce the wire elements, in order.
    fn encode(&self) -> Vec<Value>;
}

/// Decode one row from a JSON value.
pub fn decode_row<R: Row>(value: &Value) -> Result<R, CodecError> {
    let Value::Array(items) = value else {
        return Err(mismatch(R::NAME, None, format!("array of {} elements", R::WIDTH), value));
    };
    if items.len() != R::WIDTH {
        return Err(CodecError::TypeMismatch {
            target: R::NAME,
            index: Some(items.len().min(R::WIDTH)),
            expected: format!("array of {} elements", R::WIDTH),
            found: format!("array of {} elements", items.len()),
        });
    }
    R::decode(items)
}

/// Encode one row into a JSON array.
pub fn encode_row<R: Row>(row: &R) -> Value {
    Value::Array(row.encode())
}

/// Decode a list of rows, e.g. one side of an order book.
pub fn decode_rows<R: Row>(target: &'static str, value: &Value) -> Result<Vec<R>, CodecError> {
    match value {
        Value::Array(rows) => rows.iter().map(decode_row).collect(),
        other => Err(mismatch(target, None, "array of rows", other)),
    }
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn mismatch(
    target: &'static str,
    index: Option<usize>,
    expected: impl Into<String>,
    found: &Value,
) -> CodecError {
    CodecError::TypeMismatch {
        target,
        index,
        expected: expected.into(),
        found: kind(found).to_owned(),
    }
}

/// Sorted key list of an object, for [`CodecError::Structure`].
pub(crate) fn key_list(map: &serde_json::Map<String, Value>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort();
    keys
}

/// Implements serde traits for a [`Row`] through its positional codec.
macro_rules! positional_serde {
    ($($ty:ty),+ $(,)?) => {$(
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&$crate::market_data::Row::encode(self), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                $crate::market_data::decode_row(&value).map_err(serde::de::Error::custom)
            }
        }
    )+};
}

pub(crate) use positional_serde;
