//! WebSocket v2 acknowledgement types.
//!
//! The connection engine lives outside this crate; these types only model
//! the request/acknowledgement frames so that an acknowledgement can be
//! handled exactly like a REST [`Envelope`](crate::types::Envelope).

pub mod messages;

pub use messages::{SubscribeParams, SubscriptionResult, WsRequest, WsResponse, channels};
