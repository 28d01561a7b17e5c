//! The HTTP transport seam.

use async_trait::async_trait;
use reqwest::{Request, Response};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

/// Sends a fully forged request and returns the raw response.
///
/// No retries happen at this layer or above it; a failure is reported once.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, reqwest_middleware::Error>;
}

#[async_trait]
impl Transport for ClientWithMiddleware {
    async fn send(&self, request: Request) -> Result<Response, reqwest_middleware::Error> {
        self.execute(request).await
    }
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn send(&self, request: Request) -> Result<Response, reqwest_middleware::Error> {
        self.execute(request).await.map_err(reqwest_middleware::Error::from)
    }
}

/// The default transport: reqwest (rustls) with request tracing spans.
///
/// Carries no default headers; the pipeline sets `User-Agent` on every request.
pub fn default_transport() -> ClientWithMiddleware {
    ClientBuilder::new(reqwest::Client::new())
        .with(TracingMiddleware::default())
        .build()
}
