//! The authorization boundary of the request pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Request;
use reqwest::header::HeaderValue;
use tokio_util::sync::CancellationToken;

use crate::auth::{CredentialsProvider, sign_request};
use crate::error::KrakenError;

pub const API_KEY_HEADER: &str = "API-Key";
pub const API_SIGN_HEADER: &str = "API-Sign";

/// Turns a forged request into one the venue will accept.
///
/// Called exactly once per forged request. The request is owned: an
/// implementation returns either the same request with headers added or an
/// entirely new one. Returning an error aborts the call before anything is
/// sent.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self, ctx: &CancellationToken, request: Request) -> Result<Request, KrakenError>;
}

#[async_trait]
impl<A: Authorizer + ?Sized> Authorizer for Arc<A> {
    async fn authorize(&self, ctx: &CancellationToken, request: Request) -> Result<Request, KrakenError> {
        (**self).authorize(ctx, request).await
    }
}

/// Kraken API-key signing.
///
/// Expects a url-encoded form body whose `nonce` field is already set.
pub struct KrakenSigner {
    credentials: Arc<dyn CredentialsProvider>,
}

impl KrakenSigner {
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self { credentials }
    }
}

impl std::fmt::Debug for KrakenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrakenSigner")
            .field("credentials", self.credentials.get_credentials())
            .finish()
    }
}

fn header(value: &str) -> Result<HeaderValue, KrakenError> {
    HeaderValue::from_str(value).map_err(|e| KrakenError::Auth(format!("invalid header value: {e}")))
}

#[async_trait]
impl Authorizer for KrakenSigner {
    async fn authorize(&self, _ctx: &CancellationToken, mut request: Request) -> Result<Request, KrakenError> {
        let body = request
            .body()
            .and_then(|b| b.as_bytes())
            .ok_or_else(|| KrakenError::Auth("private request has no form body".into()))?;
        let body = std::str::from_utf8(body).map_err(|_| KrakenError::Auth("form body is not UTF-8".into()))?;

        let nonce = url::form_urlencoded::parse(body.as_bytes())
            .find(|(key, _)| key == "nonce")
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| KrakenError::Auth("form body has no nonce field".into()))?;

        let credentials = self.credentials.get_credentials();
        let signature = sign_request(credentials, request.url().path(), &nonce, body)?;

        let headers = request.headers_mut();
        headers.insert(API_KEY_HEADER, header(&credentials.api_key)?);
        headers.insert(API_SIGN_HEADER, header(&signature)?);
        Ok(request)
    }
}
