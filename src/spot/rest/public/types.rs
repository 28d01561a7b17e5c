//! Request and reference-data types of the public endpoints.
//!
//! Market data series (`OHLC`, `Depth`, `Trades`, `Spread`) decode through
//! the positional-array codec in [`crate::market_data`].

use serde::{Deserialize, Serialize};

use crate::types::{DecimalString, OhlcInterval};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerTime {
    pub unixtime: i64,
    /// e.g. `Sun, 21 Mar 21 14:23:14 +0000`.
    pub rfc1123: String,
}

/// Exchange status: `online`, `maintenance`, `cancel_only` or `post_only`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemStatus {
    pub status: String,
    pub timestamp: String,
}

impl SystemStatus {
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetInfoRequest {
    /// Comma separated asset names.
    pub asset: Option<String>,
    pub aclass: Option<String>,
}

impl AssetInfoRequest {
    pub fn for_assets(assets: impl Into<String>) -> Self {
        Self {
            asset: Some(assets.into()),
            aclass: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssetInfo {
    pub aclass: String,
    pub altname: String,
    pub decimals: u8,
    pub display_decimals: u8,
    #[serde(default)]
    pub collateral_value: Option<DecimalString>,
    #[serde(default)]
    pub status: Option<String>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetPairsRequest {
    /// Comma separated pair names.
    pub pair: Option<String>,
    /// `info`, `leverage`, `fees` or `margin`.
    pub info: Option<String>,
    pub country_code: Option<String>,
}

impl AssetPairsRequest {
    pub fn for_pairs(pairs: impl Into<String>) -> Self {
        Self {
            pair: Some(pairs.into()),
            ..Default::default()
        }
    }
}

/// Fee tier as `[30-day volume, percent fee]`.
pub type FeeSchedule = Vec<(DecimalString, DecimalString)>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssetPair {
    pub altname: String,
    #[serde(default)]
    pub wsname: Option<String>,
    pub aclass_base: String,
    pub base: String,
    pub aclass_quote: String,
    pub quote: String,
    #[serde(default)]
    pub lot: Option<String>,
    pub cost_decimals: u8,
    pub pair_decimals: u8,
    pub lot_decimals: u8,
    pub lot_multiplier: u32,
    #[serde(default)]
    pub leverage_buy: Vec<u32>,
    #[serde(default)]
    pub leverage_sell: Vec<u32>,
    #[serde(default)]
    pub fees: FeeSchedule,
    #[serde(default)]
    pub fees_maker: FeeSchedule,
    #[serde(default)]
    pub fee_volume_currency: Option<String>,
    #[serde(default)]
    pub margin_call: Option<u32>,
    #[serde(default)]
    pub margin_stop: Option<u32>,
    #[serde(default)]
    pub ordermin: Option<DecimalString>,
    #[serde(default)]
    pub costmin: Option<DecimalString>,
    #[serde(default)]
    pub tick_size: Option<DecimalString>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub long_position_limit: Option<u64>,
    #[serde(default)]
    pub short_position_limit: Option<u64>,
}

/// Ticker of one pair. Kraken's single-letter keys are kept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TickerInfo {
    /// Ask `[price, whole lot volume, lot volume]`.
    pub a: Vec<DecimalString>,
    /// Bid `[price, whole lot volume, lot volume]`.
    pub b: Vec<DecimalString>,
    /// Last trade `[price, lot volume]`.
    pub c: Vec<DecimalString>,
    /// Volume `[today, last 24 hours]`.
    pub v: Vec<DecimalString>,
    /// VWAP `[today, last 24 hours]`.
    pub p: Vec<DecimalString>,
    /// Trade count `[today, last 24 hours]`.
    pub t: Vec<u64>,
    pub l: Vec<DecimalString>,
    pub h: Vec<DecimalString>,
    /// Today's opening price.
    pub o: DecimalString,
}

impl TickerInfo {
    pub fn ask_price(&self) -> Option<&DecimalString> {
        self.a.first()
    }

    pub fn bid_price(&self) -> Option<&DecimalString> {
        self.b.first()
    }

    pub fn last_price(&self) -> Option<&DecimalString> {
        self.c.first()
    }

    pub fn volume_24h(&self) -> Option<&DecimalString> {
        self.v.get(1)
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct OhlcRequest {
    pub pair: String,
    pub interval: Option<OhlcInterval>,
    /// Only candles after this Unix time (the previous response's `last`).
    pub since: Option<i64>,
}

impl OhlcRequest {
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            interval: None,
            since: None,
        }
    }

    pub fn interval(mut self, interval: OhlcInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct OrderBookRequest {
    pub pair: String,
    /// Levels per side, 1 to 500.
    pub count: Option<u16>,
}

impl OrderBookRequest {
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            count: None,
        }
    }

    pub fn count(mut self, count: u16) -> Self {
        self.count = Some(count.clamp(1, 500));
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct RecentTradesRequest {
    pub pair: String,
    /// Nanosecond cursor from a previous response's `last`.
    pub since: Option<String>,
    pub count: Option<u16>,
}

impl RecentTradesRequest {
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            since: None,
            count: None,
        }
    }

    pub fn since(mut self, since: impl Into<String>) -> Self {
        self.since = Some(since.into());
        self
    }

    pub fn count(mut self, count: u16) -> Self {
        self.count = Some(count);
        self
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct RecentSpreadsRequest {
    pub pair: String,
    pub since: Option<i64>,
}

impl RecentSpreadsRequest {
    pub fn new(pair: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            since: None,
        }
    }

    pub fn since(mut self, since: i64) -> Self {
        self.since = Some(since);
        self
    }
}
