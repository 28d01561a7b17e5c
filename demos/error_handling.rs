//! Example: Telling transport, status and API failures apart.
//!
//! Run with: cargo run --example error_handling

use kraken_spot_rest::error::{ApiError, KrakenError, error_codes};
use kraken_spot_rest::spot::rest::SpotRestClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_error = ApiError::parse(error_codes::RATE_LIMIT_EXCEEDED);
    println!("API error: {api_error}");
    println!("Full code: {}", api_error.full_code());
    println!("Is rate limit: {}", api_error.is_rate_limit());

    // Nothing listens on port 9, so this fails in the transport.
    let offline = SpotRestClient::builder().base_url("http://127.0.0.1:9").build();
    report(offline.get_server_time().await.map(|_| ()));

    // A missing path answers 404; the body is left for the caller.
    let client = SpotRestClient::builder()
        .base_url("https://api.kraken.com/does-not-exist")
        .build();
    report(client.get_server_time().await.map(|_| ()));

    // Unknown pairs come back inside a 200 envelope.
    let client = SpotRestClient::new();
    let response = client.get_ticker("NOTAPAIR").await?;
    report(response.into_result().map(|_| ()));

    Ok(())
}

fn report(outcome: Result<(), KrakenError>) {
    let Err(err) = outcome else {
        println!("ok");
        return;
    };
    let operation = err.operation().unwrap_or("-").to_owned();
    if let Some(status) = err.status() {
        println!("[{operation}] HTTP {status}");
        if let Some(response) = err.into_response() {
            println!("  content-length: {:?}", response.content_length());
        }
        return;
    }
    match err.root() {
        KrakenError::Transport(e) => println!("[{operation}] transport: {e}"),
        KrakenError::Api(api) if api.full_code() == error_codes::UNKNOWN_ASSET_PAIR => {
            println!("unknown pair: {api}");
        }
        other => println!("[{operation}] {other}"),
    }
}
