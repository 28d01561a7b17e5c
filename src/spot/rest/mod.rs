//! Kraken Spot REST client.
//!
//! [`SpotRestClient`] exposes one method per endpoint. Each call runs through
//! the [`pipeline`]: the request is forged, authorized once when the endpoint
//! is private, sent over the [`transport`] and dispatched on the response
//! media type.
//!
//! ```rust,no_run
//! use kraken_spot_rest::spot::rest::SpotRestClient;
//! use kraken_spot_rest::spot::rest::public::OrderBookRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SpotRestClient::new();
//!     let book = client
//!         .get_order_book(&OrderBookRequest::new("XBTUSD").count(10))
//!         .await?
//!         .into_result()?;
//!     if let (Some(ask), Some(bid)) = (book.best_ask(), book.best_bid()) {
//!         println!("{}: {} / {}", book.pair, bid.price, ask.price);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod endpoints;
pub mod pipeline;
pub mod private;
pub mod public;
pub mod transport;

pub use client::{SpotRestClient, SpotRestClientBuilder};
pub use endpoints::KRAKEN_BASE_URL;
pub use pipeline::{Execution, MediaType, Pipeline, RequestDescriptor, StreamMedia};
pub use transport::Transport;
