//! Balances, orders, trades, positions, ledgers and fee volume.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::KrakenError;
use crate::spot::rest::SpotRestClient;
use crate::spot::rest::endpoints::private;
use crate::types::{ApiResponse, BuySell, DecimalString, LedgerType, OrderStatus, OrderType};

/// Balance per asset.
pub type Balances = HashMap<String, DecimalString>;

/// `BalanceEx` result keyed by asset.
pub type ExtendedBalances = HashMap<String, ExtendedBalance>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtendedBalance {
    pub balance: DecimalString,
    /// Amount held by open orders.
    #[serde(default)]
    pub hold_trade: Option<DecimalString>,
    #[serde(default)]
    pub credit: Option<DecimalString>,
    #[serde(default)]
    pub credit_used: Option<DecimalString>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradeBalanceRequest {
    /// Base asset the balances are expressed in (Kraken defaults to `ZUSD`).
    pub asset: Option<String>,
}

/// Margin summary returned by `TradeBalance`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeBalance {
    #[serde(rename = "eb")]
    pub equivalent_balance: DecimalString,
    #[serde(rename = "tb")]
    pub trade_balance: DecimalString,
    #[serde(rename = "m", default)]
    pub margin: Option<DecimalString>,
    #[serde(rename = "n", default)]
    pub unrealized_pnl: Option<DecimalString>,
    #[serde(rename = "c", default)]
    pub cost_basis: Option<DecimalString>,
    #[serde(rename = "v", default)]
    pub floating_valuation: Option<DecimalString>,
    #[serde(rename = "e")]
    pub equity: DecimalString,
    #[serde(rename = "mf")]
    pub free_margin: DecimalString,
    /// Absent while no position is open.
    #[serde(rename = "ml", default)]
    pub margin_level: Option<DecimalString>,
    #[serde(rename = "uv", default)]
    pub unexecuted_value: Option<DecimalString>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct OpenOrdersRequest {
    pub trades: Option<bool>,
    pub userref: Option<i64>,
    pub cl_ord_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenOrders {
    pub open: HashMap<String, Order>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClosedOrdersRequest {
    pub trades: Option<bool>,
    pub userref: Option<i64>,
    pub cl_ord_id: Option<String>,
    /// Unix seconds or an order id.
    pub start: Option<String>,
    pub end: Option<String>,
    pub ofs: Option<u32>,
    /// `open`, `close` or `both`.
    pub closetime: Option<String>,
    pub consolidate_taker: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClosedOrders {
    pub closed: HashMap<String, Order>,
    pub count: u32,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct QueryOrdersRequest {
    /// Comma separated order ids, at most 50.
    pub txid: String,
    pub trades: Option<bool>,
    pub userref: Option<i64>,
    pub consolidate_taker: Option<bool>,
}

impl QueryOrdersRequest {
    pub fn new(txids: impl Into<String>) -> Self {
        Self {
            txid: txids.into(),
            trades: None,
            userref: None,
            consolidate_taker: None,
        }
    }

    pub fn with_trades(mut self) -> Self {
        self.trades = Some(true);
        self
    }
}

/// An order as reported by `OpenOrders`, `ClosedOrders` and `QueryOrders`.
///
/// Amounts keep the exact text Kraken sent; fields Kraken omits for a given
/// order kind are `None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub refid: Option<String>,
    #[serde(default)]
    pub userref: Option<i64>,
    #[serde(default)]
    pub cl_ord_id: Option<String>,
    pub status: OrderStatus,
    pub opentm: f64,
    #[serde(default)]
    pub starttm: Option<f64>,
    #[serde(default)]
    pub expiretm: Option<f64>,
    #[serde(default)]
    pub closetm: Option<f64>,
    pub descr: OrderDescription,
    pub vol: DecimalString,
    pub vol_exec: DecimalString,
    pub cost: DecimalString,
    pub fee: DecimalString,
    /// Average fill price.
    pub price: DecimalString,
    #[serde(default)]
    pub stopprice: Option<DecimalString>,
    #[serde(default)]
    pub limitprice: Option<DecimalString>,
    /// `last` or `index`, present on triggered order types only.
    #[serde(default)]
    pub trigger: Option<String>,
    #[serde(default)]
    pub margin: Option<bool>,
    #[serde(default)]
    pub misc: String,
    #[serde(default)]
    pub oflags: String,
    #[serde(default)]
    pub trades: Vec<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl Order {
    pub fn is_filled(&self) -> bool {
        self.vol_exec.as_str() == self.vol.as_str()
            || matches!(
                (self.vol_exec.to_decimal(), self.vol.to_decimal()),
                (Ok(done), Ok(total)) if done == total
            )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderDescription {
    pub pair: String,
    #[serde(rename = "type")]
    pub side: BuySell,
    pub ordertype: OrderType,
    pub price: DecimalString,
    pub price2: DecimalString,
    pub leverage: String,
    /// Human readable summary, e.g. `buy 1.25 XBTUSD @ limit 37500.0`.
    pub order: String,
    #[serde(default)]
    pub close: Option<String>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradesHistoryRequest {
    #[serde(rename = "type")]
    pub trade_type: Option<String>,
    pub trades: Option<bool>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub ofs: Option<u32>,
    pub consolidate_taker: Option<bool>,
    pub ledgers: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TradesHistory {
    pub trades: HashMap<String, Trade>,
    pub count: u32,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct QueryTradesRequest {
    /// Comma separated trade ids, at most 20.
    pub txid: String,
    pub trades: Option<bool>,
}

impl QueryTradesRequest {
    pub fn new(txids: impl Into<String>) -> Self {
        Self {
            txid: txids.into(),
            trades: None,
        }
    }
}

/// One of the account's own fills.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Trade {
    pub ordertxid: String,
    #[serde(default)]
    pub postxid: Option<String>,
    pub pair: String,
    pub time: f64,
    #[serde(rename = "type")]
    pub side: BuySell,
    pub ordertype: OrderType,
    pub price: DecimalString,
    pub cost: DecimalString,
    pub fee: DecimalString,
    pub vol: DecimalString,
    #[serde(default)]
    pub margin: Option<DecimalString>,
    #[serde(default)]
    pub maker: Option<bool>,
    #[serde(default)]
    pub misc: String,
    #[serde(default)]
    pub ledgers: Option<Vec<String>>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct OpenPositionsRequest {
    pub txid: Option<String>,
    pub docalcs: Option<bool>,
    pub consolidation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Position {
    pub ordertxid: String,
    pub posstatus: String,
    pub pair: String,
    pub time: f64,
    #[serde(rename = "type")]
    pub side: BuySell,
    pub ordertype: OrderType,
    pub cost: DecimalString,
    pub fee: DecimalString,
    pub vol: DecimalString,
    pub vol_closed: DecimalString,
    pub margin: DecimalString,
    /// Only with `docalcs=true`.
    #[serde(default)]
    pub value: Option<DecimalString>,
    #[serde(default)]
    pub net: Option<DecimalString>,
    #[serde(default)]
    pub terms: Option<String>,
    #[serde(default)]
    pub rollovertm: Option<String>,
    #[serde(default)]
    pub misc: String,
    #[serde(default)]
    pub oflags: String,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct LedgersRequest {
    /// Comma separated assets, or `all`.
    pub asset: Option<String>,
    pub aclass: Option<String>,
    #[serde(rename = "type")]
    pub ledger_type: Option<LedgerType>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub ofs: Option<u32>,
    pub without_count: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgersInfo {
    pub ledger: HashMap<String, LedgerEntry>,
    /// Missing when the request set `without_count`.
    #[serde(default)]
    pub count: Option<u32>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct QueryLedgersRequest {
    /// Comma separated ledger ids, at most 20.
    pub id: String,
    pub trades: Option<bool>,
}

impl QueryLedgersRequest {
    pub fn new(ids: impl Into<String>) -> Self {
        Self {
            id: ids.into(),
            trades: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LedgerEntry {
    pub refid: String,
    pub time: f64,
    #[serde(rename = "type")]
    pub ledger_type: LedgerType,
    #[serde(default)]
    pub subtype: Option<String>,
    pub aclass: String,
    pub asset: String,
    pub amount: DecimalString,
    pub fee: DecimalString,
    pub balance: DecimalString,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct TradeVolumeRequest {
    /// Comma separated pairs to report fee tiers for.
    pub pair: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TradeVolume {
    pub currency: String,
    /// 30-day volume in `currency`.
    pub volume: DecimalString,
    #[serde(default)]
    pub fees: Option<HashMap<String, FeeTier>>,
    #[serde(default)]
    pub fees_maker: Option<HashMap<String, FeeTier>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeeTier {
    pub fee: DecimalString,
    #[serde(default)]
    pub minfee: Option<DecimalString>,
    #[serde(default)]
    pub maxfee: Option<DecimalString>,
    #[serde(default)]
    pub nextfee: Option<DecimalString>,
    #[serde(default)]
    pub nextvolume: Option<DecimalString>,
    #[serde(default)]
    pub tiervolume: Option<DecimalString>,
}

impl SpotRestClient {
    /// Cash balance of every asset held.
    ///
    /// ```rust,no_run
    /// use kraken_spot_rest::auth::EnvCredentials;
    /// use kraken_spot_rest::spot::rest::SpotRestClient;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = SpotRestClient::builder()
    ///         .credentials(Arc::new(EnvCredentials::from_env()?))
    ///         .build();
    ///
    ///     let balances = client.get_account_balance().await?.into_result()?;
    ///     for (asset, amount) in &balances {
    ///         println!("{asset}: {amount}");
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_account_balance(&self) -> Result<ApiResponse<Balances>, KrakenError> {
        self.private_post(private::BALANCE, &None::<&()>).await
    }

    /// Balances with the amount held by open orders.
    pub async fn get_extended_balance(&self) -> Result<ApiResponse<ExtendedBalances>, KrakenError> {
        self.private_post(private::BALANCE_EX, &None::<&()>).await
    }

    pub async fn get_trade_balance(
        &self,
        request: Option<&TradeBalanceRequest>,
    ) -> Result<ApiResponse<TradeBalance>, KrakenError> {
        self.private_post(private::TRADE_BALANCE, &request).await
    }

    pub async fn get_open_orders(
        &self,
        request: Option<&OpenOrdersRequest>,
    ) -> Result<ApiResponse<OpenOrders>, KrakenError> {
        self.private_post(private::OPEN_ORDERS, &request).await
    }

    /// Closed and cancelled orders, 50 per page (use `ofs` to page).
    pub async fn get_closed_orders(
        &self,
        request: Option<&ClosedOrdersRequest>,
    ) -> Result<ApiResponse<ClosedOrders>, KrakenError> {
        self.private_post(private::CLOSED_ORDERS, &request).await
    }

    pub async fn query_orders(
        &self,
        request: &QueryOrdersRequest,
    ) -> Result<ApiResponse<HashMap<String, Order>>, KrakenError> {
        self.private_post(private::QUERY_ORDERS, request).await
    }

    pub async fn get_trades_history(
        &self,
        request: Option<&TradesHistoryRequest>,
    ) -> Result<ApiResponse<TradesHistory>, KrakenError> {
        self.private_post(private::TRADES_HISTORY, &request).await
    }

    pub async fn query_trades(
        &self,
        request: &QueryTradesRequest,
    ) -> Result<ApiResponse<HashMap<String, Trade>>, KrakenError> {
        self.private_post(private::QUERY_TRADES, request).await
    }

    pub async fn get_open_positions(
        &self,
        request: Option<&OpenPositionsRequest>,
    ) -> Result<ApiResponse<HashMap<String, Position>>, KrakenError> {
        self.private_post(private::OPEN_POSITIONS, &request).await
    }

    pub async fn get_ledgers(
        &self,
        request: Option<&LedgersRequest>,
    ) -> Result<ApiResponse<LedgersInfo>, KrakenError> {
        self.private_post(private::LEDGERS, &request).await
    }

    pub async fn query_ledgers(
        &self,
        request: &QueryLedgersRequest,
    ) -> Result<ApiResponse<HashMap<String, LedgerEntry>>, KrakenError> {
        self.private_post(private::QUERY_LEDGERS, request).await
    }

    pub async fn get_trade_volume(
        &self,
        request: Option<&TradeVolumeRequest>,
    ) -> Result<ApiResponse<TradeVolume>, KrakenError> {
        self.private_post(private::TRADE_VOLUME, &request).await
    }
}
