//! Calls against the real Kraken API.
//!
//! Run with `KRAKEN_LIVE_TESTS=1 cargo test --test live_smoke -- --ignored`;
//! credentials come from `KRAKEN_API_KEY` and `KRAKEN_API_SECRET` (a `.env`
//! file works too).

mod common;

use std::sync::Arc;

use kraken_spot_rest::auth::EnvCredentials;
use kraken_spot_rest::spot::rest::SpotRestClient;
use kraken_spot_rest::spot::rest::public::OrderBookRequest;

fn live_tests_enabled() -> bool {
    std::env::var("KRAKEN_LIVE_TESTS").ok().as_deref() == Some("1")
}

#[tokio::test]
#[ignore]
async fn live_spot_public_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    common::init_tracing();

    let client = SpotRestClient::new();
    let status = client.get_system_status().await?.into_result()?;
    tracing::info!(status = ?status.status, "system status");

    let book = client
        .get_order_book(&OrderBookRequest::new("XBTUSD").count(5))
        .await?
        .into_result()?;
    assert!(book.asks.len() <= 5);
    assert!(book.bids.len() <= 5);

    Ok(())
}

#[tokio::test]
#[ignore]
async fn live_spot_private_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    common::init_tracing();

    let credentials = match EnvCredentials::try_from_env() {
        Some(creds) => creds,
        None => return Ok(()),
    };
    let client = SpotRestClient::builder()
        .credentials(Arc::new(credentials))
        .build();

    let _balances = client.get_account_balance().await?.into_result()?;
    let token = client.get_websocket_token().await?.into_result()?;
    assert!(!token.token.is_empty());

    Ok(())
}
