//! Observability decorator for an [`Authorizer`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Request;
use tokio_util::sync::CancellationToken;

use crate::auth::Authorizer;
use crate::error::KrakenError;

/// Callbacks around each authorization.
pub trait AuthorizeHook: Send + Sync {
    /// Invoked before the wrapped authorizer runs.
    fn before(&self, request: &Request);

    /// Invoked once the wrapped authorizer has returned.
    fn after(&self, elapsed: Duration, outcome: Result<&Request, &KrakenError>);
}

/// Default hook: `tracing` events at debug level, warn on failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHook;

impl AuthorizeHook for TracingHook {
    fn before(&self, request: &Request) {
        tracing::debug!(method = %request.method(), path = request.url().path(), "authorizing request");
    }

    fn after(&self, elapsed: Duration, outcome: Result<&Request, &KrakenError>) {
        let elapsed_us = elapsed.as_micros() as u64;
        match outcome {
            Ok(request) => {
                tracing::debug!(path = request.url().path(), elapsed_us, "request authorized")
            }
            Err(error) => tracing::warn!(%error, elapsed_us, "authorization failed"),
        }
    }
}

/// Wraps exactly one authorizer and reports every call to a hook.
///
/// The wrapped authorizer sees the request unchanged and is invoked exactly
/// once per call; its result is returned as is.
pub struct ObservedAuthorizer<H = TracingHook> {
    inner: Arc<dyn Authorizer>,
    hook: H,
}

impl ObservedAuthorizer<TracingHook> {
    pub fn new(inner: Arc<dyn Authorizer>) -> Self {
        Self {
            inner,
            hook: TracingHook,
        }
    }

    pub fn builder() -> ObservedAuthorizerBuilder<TracingHook> {
        ObservedAuthorizerBuilder {
            inner: None,
            hook: TracingHook,
        }
    }
}

impl<H: AuthorizeHook> ObservedAuthorizer<H> {
    pub fn with_hook(inner: Arc<dyn Authorizer>, hook: H) -> Self {
        Self { inner, hook }
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }
}

#[async_trait]
impl<H: AuthorizeHook> Authorizer for ObservedAuthorizer<H> {
    async fn authorize(&self, ctx: &CancellationToken, request: Request) -> Result<Request, KrakenError> {
        self.hook.before(&request);
        let started = Instant::now();
        let outcome = self.inner.authorize(ctx, request).await;
        self.hook.after(started.elapsed(), outcome.as_ref());
        outcome
    }
}

/// Builder for [`ObservedAuthorizer`]; refuses to build without an inner authorizer.
pub struct ObservedAuthorizerBuilder<H> {
    inner: Option<Arc<dyn Authorizer>>,
    hook: H,
}

impl<H: AuthorizeHook> ObservedAuthorizerBuilder<H> {
    pub fn inner(mut self, inner: Arc<dyn Authorizer>) -> Self {
        self.inner = Some(inner);
        self
    }

    pub fn hook<H2: AuthorizeHook>(self, hook: H2) -> ObservedAuthorizerBuilder<H2> {
        ObservedAuthorizerBuilder {
            inner: self.inner,
            hook,
        }
    }

    pub fn build(self) -> Result<ObservedAuthorizer<H>, KrakenError> {
        let inner = self
            .inner
            .ok_or_else(|| KrakenError::Config("observed authorizer requires an inner authorizer".into()))?;
        Ok(ObservedAuthorizer {
            inner,
            hook: self.hook,
        })
    }
}
