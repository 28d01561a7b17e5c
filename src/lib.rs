//! # Kraken Spot REST
//!
//! A typed async client for the Kraken Spot REST API.
//!
//! - One method per endpoint, each returning the decoded
//!   [`ApiResponse`](types::ApiResponse) envelope
//! - A request pipeline with a pluggable [`Authorizer`](auth::Authorizer)
//!   and an observing decorator
//! - Prices and volumes kept as exact [`DecimalString`](types::DecimalString)s
//! - A positional-array codec for OHLC, order book, trade and spread rows
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kraken_spot_rest::spot::rest::SpotRestClient;
//! use kraken_spot_rest::spot::rest::public::RecentTradesRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SpotRestClient::new();
//!     let trades = client
//!         .get_recent_trades(&RecentTradesRequest::new("XBTUSD").count(5))
//!         .await?
//!         .into_result()?;
//!     for trade in &trades.rows {
//!         println!("{} {} @ {}", trade.time, trade.volume, trade.price);
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod market_data;
pub mod spot;
pub mod types;

pub use error::KrakenError;
pub use types::common::{BuySell, OrderStatus, OrderType};
pub use types::{ApiResponse, DecimalString, Envelope};

/// Result type alias using KrakenError
pub type Result<T> = std::result::Result<T, KrakenError>;
