//! Containers wrapping a pair's rows.
//!
//! Series endpoints answer with exactly two keys, the pair and the
//! pagination cursor:
//!
//! ```json
//! {"XXBTZUSD": [[...], [...]], "last": 1688672160}
//! ```
//!
//! The order book answers with exactly one pair key whose object holds
//! `asks` and `bids`. Any other key set is rejected with
//! [`CodecError::Structure`], listing what was found.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::{BookLevel, CodecError, OhlcPoint, Row, SpreadPoint, TradeTick, decode_rows, encode_row, key_list, mismatch};

const LAST: &str = "last";

/// Pagination cursor stored under `"last"`.
pub trait Cursor: Sized {
    /// What the cursor must look like, for error messages.
    const EXPECTED: &'static str;

    fn from_json(value: &Value) -> Option<Self>;
    fn to_json(&self) -> Value;
}

impl Cursor for i64 {
    const EXPECTED: &'static str = "integer cursor";

    fn from_json(value: &Value) -> Option<Self> {
        value.as_i64()
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

/// Trade cursors are nanosecond ids sent as strings; numbers are accepted verbatim.
impl Cursor for String {
    const EXPECTED: &'static str = "string cursor";

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

/// Rows of a single pair plus the cursor for the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSeries<R, L> {
    pub pair: String,
    pub rows: Vec<R>,
    pub last: L,
}

/// `/0/public/OHLC` result.
pub type OhlcSeries = PairSeries<OhlcPoint, i64>;
/// `/0/public/Trades` result.
pub type TradeSeries = PairSeries<TradeTick, String>;
/// `/0/public/Spread` result.
pub type SpreadSeries = PairSeries<SpreadPoint, i64>;

impl<R: Row, L: Cursor> PairSeries<R, L> {
    pub fn new(pair: impl Into<String>, rows: Vec<R>, last: L) -> Self {
        Self {
            pair: pair.into(),
            rows,
            last,
        }
    }

    /// Decode from a `{ <pair>: [rows], "last": cursor }` object.
    pub fn from_value(value: &Value) -> Result<Self, CodecError> {
        let target = R::SERIES;
        let Value::Object(map) = value else {
            return Err(mismatch(target, None, "object", value));
        };
        if map.len() != 2 || !map.contains_key(LAST) {
            return Err(CodecError::Structure {
                target,
                keys: key_list(map),
            });
        }

        let mut pair = None;
        let mut last = None;
        for (key, value) in map {
            if key == LAST {
                last = Some(L::from_json(value).ok_or_else(|| mismatch(target, None, L::EXPECTED, value))?);
            } else {
                pair = Some((key.clone(), decode_rows(target, value)?));
            }
        }

        match (pair, last) {
            (Some((pair, rows)), Some(last)) => Ok(Self { pair, rows, last }),
            _ => Err(CodecError::Structure {
                target,
                keys: key_list(map),
            }),
        }
    }

    /// Encode back to the wire object, pair entry first.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(self.pair.clone(), self.encoded_rows());
        map.insert(LAST.to_owned(), self.last.to_json());
        Value::Object(map)
    }

    fn encoded_rows(&self) -> Value {
        Value::Array(self.rows.iter().map(encode_row).collect())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R: Row, L: Cursor> Serialize for PairSeries<R, L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(&self.pair, &self.encoded_rows())?;
        map.serialize_entry(LAST, &self.last.to_json())?;
        map.end()
    }
}

impl<'de, R: Row, L: Cursor> Deserialize<'de> for PairSeries<R, L> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// `/0/public/Depth` result for one pair, levels in received order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBook {
    pub pair: String,
    pub asks: Vec<BookLevel>,
    pub bids: Vec<BookLevel>,
}

impl OrderBook {
    const NAME: &'static str = "order book";

    pub fn from_value(value: &Value) -> Result<Self, CodecError> {
        let Value::Object(outer) = value else {
            return Err(mismatch(Self::NAME, None, "object", value));
        };
        let mut entries = outer.iter();
        let (pair, sides) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(CodecError::Structure {
                    target: Self::NAME,
                    keys: key_list(outer),
                });
            }
        };
        let Value::Object(sides) = sides else {
            return Err(mismatch(Self::NAME, None, "object with asks and bids", sides));
        };
        match (sides.get("asks"), sides.get("bids")) {
            (Some(asks), Some(bids)) if sides.len() == 2 => Ok(Self {
                pair: pair.clone(),
                asks: decode_rows(BookLevel::SERIES, asks)?,
                bids: decode_rows(BookLevel::SERIES, bids)?,
            }),
            _ => Err(CodecError::Structure {
                target: Self::NAME,
                keys: key_list(sides),
            }),
        }
    }

    fn sides(&self) -> Value {
        let mut sides = Map::new();
        sides.insert("asks".into(), Value::Array(self.asks.iter().map(encode_row).collect()));
        sides.insert("bids".into(), Value::Array(self.bids.iter().map(encode_row).collect()));
        Value::Object(sides)
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(self.pair.clone(), self.sides());
        Value::Object(map)
    }

    pub fn best_ask(&self) -> Option<&BookLevel> {
        self.asks.first()
    }

    pub fn best_bid(&self) -> Option<&BookLevel> {
        self.bids.first()
    }
}

impl Serialize for OrderBook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.pair, &self.sides())?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for OrderBook {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ohlc_series_decodes_pair_and_cursor() {
        let series: OhlcSeries = serde_json::from_value(json!({
            "XXBTZUSD": [[1688671200, "30306.1", "30306.2", "30306.1", "30306.1", "30306.1", "3.39243896", 23]],
            "last": 1688672160
        }))
        .unwrap();
        assert_eq!(series.pair, "XXBTZUSD");
        assert_eq!(series.len(), 1);
        assert_eq!(series.last, 1688672160);
    }

    #[test]
    fn extra_key_is_a_structure_error_naming_every_key() {
        let err = OhlcSeries::from_value(&json!({"XXBTZUSD": [], "XETHZUSD": [], "last": 1})).unwrap_err();
        assert_eq!(
            err,
            CodecError::Structure {
                target: "OHLC series",
                keys: vec!["XETHZUSD".into(), "XXBTZUSD".into(), "last".into()],
            }
        );
    }

    #[test]
    fn missing_last_is_a_structure_error() {
        let err = SpreadSeries::from_value(&json!({"XXBTZUSD": [], "cursor": 1})).unwrap_err();
        assert!(matches!(err, CodecError::Structure { ref keys, .. } if keys.len() == 2));
    }

    #[test]
    fn trade_series_accepts_string_cursor() {
        let series: TradeSeries = serde_json::from_value(json!({
            "XXBTZUSD": [["30243.40000", "0.34507674", 1688669597.8277369, "b", "m", "", 61044952]],
            "last": "1688671969993150842"
        }))
        .unwrap();
        assert_eq!(series.last, "1688671969993150842");
        assert_eq!(series.rows[0].side, "b");
    }

    #[test]
    fn series_serializes_pair_then_last() {
        let series = SpreadSeries::new(
            "XXBTZUSD",
            vec![SpreadPoint {
                time: 1688671834,
                bid: "30306.1".into(),
                ask: "30306.2".into(),
            }],
            1688671834,
        );
        assert_eq!(
            serde_json::to_string(&series).unwrap(),
            r#"{"XXBTZUSD":[[1688671834,"30306.1","30306.2"]],"last":1688671834}"#
        );
    }

    #[test]
    fn lowercase_pair_stays_before_last() {
        let series = SpreadSeries::new(
            "xbtusd",
            vec![SpreadPoint {
                time: 1688671834,
                bid: "30306.1".into(),
                ask: "30306.2".into(),
            }],
            5,
        );
        let value = series.to_value();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["xbtusd", "last"]);
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            serde_json::to_string(&series).unwrap()
        );
    }

    #[test]
    fn order_book_requires_single_pair_and_both_sides() {
        let book: OrderBook = serde_json::from_value(json!({
            "XXBTZUSD": {
                "asks": [["30384.10000", "2.059", 1688671659]],
                "bids": [["30297.00000", "0.115", 1688671656], ["30296.70000", "0.002", 1688671674]]
            }
        }))
        .unwrap();
        assert_eq!(book.best_ask().unwrap().price.as_str(), "30384.10000");
        assert_eq!(book.bids.len(), 2);

        let err = OrderBook::from_value(&json!({"XXBTZUSD": {"asks": []}})).unwrap_err();
        assert_eq!(
            err,
            CodecError::Structure {
                target: "order book",
                keys: vec!["asks".into()],
            }
        );

        let err = OrderBook::from_value(&json!({"A": {}, "B": {}})).unwrap_err();
        assert!(matches!(err, CodecError::Structure { ref keys, .. } if keys == &["A", "B"]));
    }
}
