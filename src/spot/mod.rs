//! Kraken Spot APIs.
//!
//! - [`rest`]: the REST client and its request pipeline
//! - [`ws`]: WebSocket v2 request and acknowledgement frames

pub mod rest;
pub mod ws;

pub use rest::SpotRestClient;
