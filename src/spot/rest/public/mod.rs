//! Public REST endpoints (no authentication required).

mod types;

pub use types::*;

use std::collections::HashMap;

use crate::error::KrakenError;
use crate::market_data::{OhlcSeries, OrderBook, SpreadSeries, TradeSeries};
use crate::spot::rest::SpotRestClient;
use crate::spot::rest::endpoints::public;
use crate::types::ApiResponse;

impl SpotRestClient {
    /// Kraken's clock.
    ///
    /// ```rust,no_run
    /// use kraken_spot_rest::spot::rest::SpotRestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = SpotRestClient::new();
    ///     let time = client.get_server_time().await?.into_result()?;
    ///     println!("{} ({})", time.unixtime, time.rfc1123);
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_server_time(&self) -> Result<ApiResponse<ServerTime>, KrakenError> {
        self.public_get(public::TIME).await
    }

    pub async fn get_system_status(&self) -> Result<ApiResponse<SystemStatus>, KrakenError> {
        self.public_get(public::SYSTEM_STATUS).await
    }

    pub async fn get_assets(
        &self,
        request: Option<&AssetInfoRequest>,
    ) -> Result<ApiResponse<HashMap<String, AssetInfo>>, KrakenError> {
        self.public_get_with_params(public::ASSETS, &request).await
    }

    pub async fn get_asset_pairs(
        &self,
        request: Option<&AssetPairsRequest>,
    ) -> Result<ApiResponse<HashMap<String, AssetPair>>, KrakenError> {
        self.public_get_with_params(public::ASSET_PAIRS, &request).await
    }

    /// Tickers for a comma separated list of pairs, e.g. `"XBTUSD,ETHUSD"`.
    pub async fn get_ticker(&self, pairs: &str) -> Result<ApiResponse<HashMap<String, TickerInfo>>, KrakenError> {
        self.public_get_with_params(public::TICKER, &[("pair", pairs)]).await
    }

    /// Up to 720 candles of one pair.
    ///
    /// The rows decode positionally; a row of the wrong shape fails the whole
    /// call with [`KrakenError::Decode`] naming the row and index.
    pub async fn get_ohlc(&self, request: &OhlcRequest) -> Result<ApiResponse<OhlcSeries>, KrakenError> {
        self.public_get_with_params(public::OHLC, request).await
    }

    pub async fn get_order_book(&self, request: &OrderBookRequest) -> Result<ApiResponse<OrderBook>, KrakenError> {
        self.public_get_with_params(public::DEPTH, request).await
    }

    /// The last 1000 trades of one pair; page forward with the returned `last`.
    pub async fn get_recent_trades(
        &self,
        request: &RecentTradesRequest,
    ) -> Result<ApiResponse<TradeSeries>, KrakenError> {
        self.public_get_with_params(public::TRADES, request).await
    }

    pub async fn get_recent_spreads(
        &self,
        request: &RecentSpreadsRequest,
    ) -> Result<ApiResponse<SpreadSeries>, KrakenError> {
        self.public_get_with_params(public::SPREAD, request).await
    }
}
