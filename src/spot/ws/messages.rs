//! Method frames and their acknowledgements.

use serde::{Deserialize, Serialize};

use crate::types::Envelope;

/// Error recorded when Kraken reports a failure without an error string.
const UNSPECIFIED_FAILURE: &str = "EGeneral:Unspecified failure";

/// `{"method": ..., "params": ..., "req_id": ...}`
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct WsRequest<T> {
    pub method: String,
    pub params: T,
    /// Echoed back in the acknowledgement.
    pub req_id: Option<u64>,
}

impl<T> WsRequest<T> {
    pub fn new(method: impl Into<String>, params: T) -> Self {
        Self {
            method: method.into(),
            params,
            req_id: None,
        }
    }

    pub fn with_req_id(mut self, id: u64) -> Self {
        self.req_id = Some(id);
        self
    }
}

impl WsRequest<SubscribeParams> {
    pub fn subscribe(params: SubscribeParams) -> Self {
        Self::new("subscribe", params)
    }

    pub fn unsubscribe(params: SubscribeParams) -> Self {
        Self::new("unsubscribe", params)
    }
}

/// Acknowledgement of a [`WsRequest`].
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct WsResponse<T> {
    pub method: String,
    pub success: bool,
    #[serde(default)]
    pub result: Option<T>,
    /// `"ECategory:Message"`, as in REST envelopes.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub req_id: Option<u64>,
    #[serde(default)]
    pub time_in: Option<String>,
    #[serde(default)]
    pub time_out: Option<String>,
}

impl<T> WsResponse<T> {
    /// The acknowledgement in REST envelope form.
    ///
    /// A failed acknowledgement always yields a non-empty error list, so
    /// [`Envelope::into_result`] treats both transports the same way.
    pub fn into_envelope(self) -> Envelope<T> {
        let mut error: Vec<String> = self.error.into_iter().filter(|e| !e.is_empty()).collect();
        if !self.success && error.is_empty() {
            error.push(UNSPECIFIED_FAILURE.to_owned());
        }
        Envelope {
            error,
            result: self.result,
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct SubscribeParams {
    pub channel: String,
    pub symbol: Option<Vec<String>>,
    /// From `GetWebSocketsToken`, for private channels.
    pub token: Option<String>,
    pub snapshot: Option<bool>,
    pub depth: Option<u32>,
}

impl SubscribeParams {
    pub fn public(channel: impl Into<String>, symbols: Vec<String>) -> Self {
        Self {
            channel: channel.into(),
            symbol: Some(symbols),
            token: None,
            snapshot: None,
            depth: None,
        }
    }

    pub fn private(channel: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            symbol: None,
            token: Some(token.into()),
            snapshot: None,
            depth: None,
        }
    }

    pub fn with_snapshot(mut self, snapshot: bool) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }
}

pub mod channels {
    pub const TICKER: &str = "ticker";
    pub const BOOK: &str = "book";
    pub const LEVEL3: &str = "level3";
    pub const OHLC: &str = "ohlc";
    pub const TRADE: &str = "trade";
    pub const INSTRUMENT: &str = "instrument";
    pub const STATUS: &str = "status";
    pub const HEARTBEAT: &str = "heartbeat";
    pub const EXECUTIONS: &str = "executions";
    pub const BALANCES: &str = "balances";
}

/// `result` of a subscribe acknowledgement; one per symbol.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubscriptionResult {
    pub channel: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub snapshot: Option<bool>,
    #[serde(default)]
    pub depth: Option<u32>,
}
