#![allow(dead_code)]

use std::sync::{Arc, Once};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

use kraken_spot_rest::auth::StaticCredentials;
use kraken_spot_rest::spot::rest::SpotRestClient;

static TRACING: Once = Once::new();

/// Route `tracing` events and wiremock's `log` records to the test output.
/// Set `RUST_LOG=debug` to see them.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
        let _ = tracing_log::LogTracer::init();
    });
}

pub fn public_client(server: &MockServer) -> SpotRestClient {
    init_tracing();
    SpotRestClient::builder().base_url(server.uri()).build()
}

pub fn signing_client(server: &MockServer) -> SpotRestClient {
    init_tracing();
    let secret = STANDARD.encode("test_secret");
    SpotRestClient::builder()
        .base_url(server.uri())
        .credentials(Arc::new(StaticCredentials::new("test_key", secret)))
        .build()
}
