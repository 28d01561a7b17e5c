//! Request forging and execution.
//!
//! Every REST call goes through the same two steps:
//!
//! 1. [`Pipeline::forge`] turns a [`RequestDescriptor`] into a
//!    `reqwest::Request`, sets the standard headers and hands the request to
//!    the configured [`Authorizer`] exactly once.
//! 2. [`Pipeline::execute`] sends it and dispatches on the response media
//!    type: JSON bodies are read and decoded, octet-stream and zip bodies are
//!    handed back unread.
//!
//! Business errors inside a decoded envelope are not inspected here.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Body, Method, Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::auth::Authorizer;
use crate::error::KrakenError;
use crate::spot::rest::transport::Transport;
use crate::types::ResponseMeta;

pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// What to send, before it becomes a `reqwest::Request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    content_type: String,
    query: Option<String>,
    body: Option<Bytes>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            content_type: FORM_URLENCODED.to_owned(),
            query: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Url-encode `params` as the query string.
    pub fn query<Q: Serialize + ?Sized>(self, params: &Q) -> Result<Self, KrakenError> {
        let encoded = serde_urlencoded::to_string(params).map_err(|e| KrakenError::Forge(e.to_string()))?;
        Ok(self.raw_query(encoded))
    }

    /// Use an already encoded query string; an empty string means no query.
    pub fn raw_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.is_empty()).then_some(query);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn encoded_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn body_bytes(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}

/// Body kinds handed back to the caller unread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamMedia {
    OctetStream,
    Zip,
}

/// Media types the pipeline knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Json,
    Stream(StreamMedia),
}

impl MediaType {
    /// Classify a `Content-Type` value, ignoring parameters and case.
    pub fn parse(content_type: &str) -> Option<Self> {
        let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
        match essence.as_str() {
            "application/json" => Some(Self::Json),
            "application/octet-stream" => Some(Self::Stream(StreamMedia::OctetStream)),
            "application/zip" | "application/x-zip-compressed" => Some(Self::Stream(StreamMedia::Zip)),
            other if other.starts_with("application/") && other.ends_with("+json") => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for StreamMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StreamMedia::OctetStream => "application/octet-stream",
            StreamMedia::Zip => "application/zip",
        })
    }
}

/// Outcome of a successful [`Pipeline::execute`].
#[derive(Debug)]
pub enum Execution<R> {
    /// A JSON body, fully read and decoded. The connection body is released.
    Decoded { meta: ResponseMeta, value: R },
    /// A binary body, not yet read. Reading and dropping it is the caller's job.
    Stream { media: StreamMedia, response: Response },
}

impl<R> Execution<R> {
    /// The decoded value; a streamed body is dropped and reported as invalid.
    pub fn into_decoded(self) -> Result<(ResponseMeta, R), KrakenError> {
        match self {
            Execution::Decoded { meta, value } => Ok((meta, value)),
            Execution::Stream { media, .. } => Err(KrakenError::InvalidResponse(format!(
                "expected a JSON body, got {media}"
            ))),
        }
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, Execution::Stream { .. })
    }
}

/// Forges and executes requests against one base URL.
#[derive(Clone)]
pub struct Pipeline {
    base_url: String,
    user_agent: String,
    transport: Arc<dyn Transport>,
    authorizer: Option<Arc<dyn Authorizer>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("authorized", &self.authorizer.is_some())
            .finish()
    }
}

impl Pipeline {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: user_agent.into(),
            transport,
            authorizer: None,
        }
    }

    /// A copy of this pipeline that authorizes every forged request.
    pub fn with_authorizer(&self, authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            authorizer: Some(authorizer),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the outgoing request.
    ///
    /// Fails with [`KrakenError::Forge`] on an invalid URL or header value,
    /// or with whatever the authorizer returned. Nothing is sent.
    pub async fn forge(&self, ctx: &CancellationToken, descriptor: RequestDescriptor) -> Result<Request, KrakenError> {
        let RequestDescriptor {
            method,
            path,
            content_type,
            query,
            body,
        } = descriptor;

        let target = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let mut url = Url::parse(&target).map_err(|e| KrakenError::Forge(format!("invalid URL {target:?}: {e}")))?;
        url.set_query(query.as_deref());

        let user_agent = HeaderValue::from_str(&self.user_agent)
            .map_err(|e| KrakenError::Forge(format!("invalid user agent {:?}: {e}", self.user_agent)))?;
        let content_type = HeaderValue::from_str(&content_type)
            .map_err(|e| KrakenError::Forge(format!("invalid content type {content_type:?}: {e}")))?;

        let mut request = Request::new(method, url);
        let headers = request.headers_mut();
        headers.insert(USER_AGENT, user_agent);
        headers.insert(CONTENT_TYPE, content_type);
        if let Some(body) = body {
            *request.body_mut() = Some(Body::from(body));
        }

        debug!(method = %request.method(), url = %request.url(), "forged request");

        match &self.authorizer {
            Some(authorizer) => authorizer.authorize(ctx, request).await,
            None => Ok(request),
        }
    }

    /// Send a forged request and dispatch on the response media type.
    pub async fn execute<R: DeserializeOwned>(
        &self,
        ctx: &CancellationToken,
        request: Request,
    ) -> Result<Execution<R>, KrakenError> {
        if ctx.is_cancelled() {
            debug!(url = %request.url(), "cancelled before send");
            return Err(KrakenError::Cancelled);
        }

        let response = self.transport.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, url = %response.url(), "non-success status");
            return Err(KrakenError::Status {
                status,
                response: Box::new(response),
            });
        }

        let declared = content_type(response.headers());
        match declared.as_deref().and_then(MediaType::parse) {
            Some(MediaType::Json) => {
                let meta = ResponseMeta {
                    status,
                    headers: response.headers().clone(),
                    url: response.url().clone(),
                };
                let body = response.bytes().await.map_err(reqwest_middleware::Error::from)?;
                debug!(url = %meta.url, bytes = body.len(), "decoding JSON body");
                let value = serde_json::from_slice(&body)?;
                Ok(Execution::Decoded { meta, value })
            }
            Some(MediaType::Stream(media)) => {
                debug!(url = %response.url(), %media, "returning streamed body");
                Ok(Execution::Stream { media, response })
            }
            None => {
                let declared = declared.unwrap_or_default();
                warn!(url = %response.url(), content_type = %declared, "unsupported content type");
                Err(KrakenError::UnsupportedContentType(declared))
            }
        }
    }

    /// [`forge`](Self::forge) followed by [`execute`](Self::execute).
    pub async fn call<R: DeserializeOwned>(
        &self,
        ctx: &CancellationToken,
        descriptor: RequestDescriptor,
    ) -> Result<Execution<R>, KrakenError> {
        let request = self.forge(ctx, descriptor).await?;
        self.execute(ctx, request).await
    }
}

fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}
