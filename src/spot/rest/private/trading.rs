//! Order placement and cancellation.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::KrakenError;
use crate::spot::rest::SpotRestClient;
use crate::spot::rest::endpoints::private;
use crate::types::{ApiResponse, BuySell, DecimalString, OrderType, SelfTradePrevent, TimeInForce, TriggerType};

/// Parameters of `AddOrder`.
///
/// Prices and volumes are sent exactly as given; build them from a
/// [`rust_decimal::Decimal`] or from text.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct AddOrderRequest {
    pub pair: String,
    #[serde(rename = "type")]
    pub side: BuySell,
    pub ordertype: OrderType,
    pub volume: DecimalString,
    /// Visible part of an iceberg order.
    pub displayvol: Option<DecimalString>,
    /// Limit price, or trigger price for stop and take-profit orders.
    pub price: Option<DecimalString>,
    /// Limit price of the `*-limit` triggered types.
    pub price2: Option<DecimalString>,
    pub trigger: Option<TriggerType>,
    pub leverage: Option<String>,
    pub reduce_only: Option<bool>,
    pub stptype: Option<SelfTradePrevent>,
    /// Comma separated order flags (`post`, `fcib`, `fciq`, `nompp`, `viqc`).
    pub oflags: Option<String>,
    pub timeinforce: Option<TimeInForce>,
    pub starttm: Option<String>,
    pub expiretm: Option<String>,
    pub userref: Option<i64>,
    pub cl_ord_id: Option<String>,
    /// Validate the parameters without placing the order.
    pub validate: Option<bool>,
    #[serde(rename = "close[ordertype]")]
    pub close_ordertype: Option<OrderType>,
    #[serde(rename = "close[price]")]
    pub close_price: Option<DecimalString>,
    #[serde(rename = "close[price2]")]
    pub close_price2: Option<DecimalString>,
}

impl AddOrderRequest {
    pub fn new(pair: impl Into<String>, side: BuySell, ordertype: OrderType, volume: impl Into<DecimalString>) -> Self {
        Self {
            pair: pair.into(),
            side,
            ordertype,
            volume: volume.into(),
            displayvol: None,
            price: None,
            price2: None,
            trigger: None,
            leverage: None,
            reduce_only: None,
            stptype: None,
            oflags: None,
            timeinforce: None,
            starttm: None,
            expiretm: None,
            userref: None,
            cl_ord_id: None,
            validate: None,
            close_ordertype: None,
            close_price: None,
            close_price2: None,
        }
    }

    pub fn price(mut self, price: impl Into<DecimalString>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn price2(mut self, price2: impl Into<DecimalString>) -> Self {
        self.price2 = Some(price2.into());
        self
    }

    pub fn trigger(mut self, trigger: TriggerType) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn leverage(mut self, leverage: impl Into<String>) -> Self {
        self.leverage = Some(leverage.into());
        self
    }

    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = Some(validate);
        self
    }

    pub fn userref(mut self, userref: i64) -> Self {
        self.userref = Some(userref);
        self
    }

    pub fn client_order_id(mut self, id: impl Into<String>) -> Self {
        self.cl_ord_id = Some(id.into());
        self
    }

    pub fn oflags(mut self, flags: impl Into<String>) -> Self {
        self.oflags = Some(flags.into());
        self
    }

    /// Shorthand for `oflags("post")`.
    pub fn post_only(self) -> Self {
        self.oflags("post")
    }

    pub fn time_in_force(mut self, tif: TimeInForce) -> Self {
        self.timeinforce = Some(tif);
        self
    }

    /// Attach a conditional close order.
    pub fn close(mut self, ordertype: OrderType, price: impl Into<DecimalString>) -> Self {
        self.close_ordertype = Some(ordertype);
        self.close_price = Some(price.into());
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddOrderResponse {
    pub descr: AddOrderDescription,
    /// Empty when the request only validated.
    #[serde(default)]
    pub txid: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddOrderDescription {
    pub order: String,
    #[serde(default)]
    pub close: Option<String>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct CancelOrderRequest {
    /// Order id or user reference.
    pub txid: Option<String>,
    pub cl_ord_id: Option<String>,
}

impl CancelOrderRequest {
    pub fn new(txid: impl Into<String>) -> Self {
        Self {
            txid: Some(txid.into()),
            cl_ord_id: None,
        }
    }

    pub fn by_client_id(cl_ord_id: impl Into<String>) -> Self {
        Self {
            txid: None,
            cl_ord_id: Some(cl_ord_id.into()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrderResponse {
    pub count: u32,
    #[serde(default)]
    pub pending: Option<bool>,
}

/// Dead man's switch: cancel every order once `timeout` seconds pass without
/// a new call. A timeout of zero disarms it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CancelAllOrdersAfterRequest {
    pub timeout: u32,
}

impl CancelAllOrdersAfterRequest {
    pub fn new(timeout: u32) -> Self {
        Self { timeout }
    }

    pub fn disarm() -> Self {
        Self { timeout: 0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelAllOrdersAfterResponse {
    #[serde(with = "time::serde::rfc3339")]
    pub current_time: OffsetDateTime,
    /// The Unix epoch while the switch is disarmed.
    #[serde(with = "time::serde::rfc3339")]
    pub trigger_time: OffsetDateTime,
}

impl CancelAllOrdersAfterResponse {
    pub fn is_armed(&self) -> bool {
        self.trigger_time.unix_timestamp() != 0
    }
}

/// Token for the authenticated WebSocket channels.
#[derive(Debug, Clone, Deserialize)]
pub struct WebSocketToken {
    pub token: String,
    /// Seconds the token stays valid if unused.
    pub expires: u32,
}

impl SpotRestClient {
    /// Place an order.
    ///
    /// ```rust,no_run
    /// use kraken_spot_rest::auth::StaticCredentials;
    /// use kraken_spot_rest::spot::rest::{SpotRestClient, private::AddOrderRequest};
    /// use kraken_spot_rest::{BuySell, OrderType};
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = SpotRestClient::builder()
    ///         .credentials(Arc::new(StaticCredentials::new("key", "secret")))
    ///         .build();
    ///
    ///     let request = AddOrderRequest::new("XBTUSD", BuySell::Buy, OrderType::Limit, "0.001")
    ///         .price("50000")
    ///         .validate(true);
    ///
    ///     let placed = client.add_order(&request).await?.into_result()?;
    ///     println!("{}", placed.descr.order);
    ///     Ok(())
    /// }
    /// ```
    pub async fn add_order(&self, request: &AddOrderRequest) -> Result<ApiResponse<AddOrderResponse>, KrakenError> {
        self.private_post(private::ADD_ORDER, request).await
    }

    pub async fn cancel_order(
        &self,
        request: &CancelOrderRequest,
    ) -> Result<ApiResponse<CancelOrderResponse>, KrakenError> {
        self.private_post(private::CANCEL_ORDER, request).await
    }

    pub async fn cancel_all_orders(&self) -> Result<ApiResponse<CancelOrderResponse>, KrakenError> {
        self.private_post(private::CANCEL_ALL, &None::<&()>).await
    }

    pub async fn cancel_all_orders_after(
        &self,
        request: &CancelAllOrdersAfterRequest,
    ) -> Result<ApiResponse<CancelAllOrdersAfterResponse>, KrakenError> {
        self.private_post(private::CANCEL_ALL_ORDERS_AFTER, request).await
    }

    /// A token for the private WebSocket channels, valid for 15 minutes.
    pub async fn get_websocket_token(&self) -> Result<ApiResponse<WebSocketToken>, KrakenError> {
        self.private_post(private::GET_WEBSOCKETS_TOKEN, &None::<&()>).await
    }
}
