//! Kraken Spot REST API client implementation.

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::auth::{
    Authorizer, CredentialsProvider, IncreasingNonce, KrakenSigner, NonceProvider, ObservedAuthorizer, OtpProvider,
};
use crate::error::KrakenError;
use crate::spot::rest::endpoints::KRAKEN_BASE_URL;
use crate::spot::rest::pipeline::{Execution, Pipeline, RequestDescriptor};
use crate::spot::rest::transport::{Transport, default_transport};
use crate::types::{ApiResponse, Envelope};

/// The Kraken Spot REST API client.
///
/// Every endpoint method returns the decoded [`ApiResponse`]: the envelope
/// (result plus Kraken's error list) and the HTTP metadata. Call
/// [`ApiResponse::into_result`] to turn a non-empty error list into a
/// [`KrakenError`].
///
/// ```rust,no_run
/// use kraken_spot_rest::spot::rest::SpotRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = SpotRestClient::new();
///     let time = client.get_server_time().await?.into_result()?;
///     println!("Server time: {}", time.unixtime);
///     Ok(())
/// }
/// ```
///
/// Private endpoints need credentials (or a custom [`Authorizer`]):
///
/// ```rust,no_run
/// use kraken_spot_rest::auth::StaticCredentials;
/// use kraken_spot_rest::spot::rest::SpotRestClient;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = SpotRestClient::builder()
///         .credentials(Arc::new(StaticCredentials::new("api_key", "api_secret")))
///         .build();
///
///     for (asset, amount) in client.get_account_balance().await?.into_result()? {
///         println!("{asset}: {amount}");
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct SpotRestClient {
    pipeline: Pipeline,
    authorizer: Option<Arc<dyn Authorizer>>,
    nonce_provider: Arc<dyn NonceProvider>,
    otp_provider: Option<Arc<dyn OtpProvider>>,
    cancel: CancellationToken,
}

impl SpotRestClient {
    /// Create a new client with default settings.
    ///
    /// This client can only access public endpoints.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> SpotRestClientBuilder {
        SpotRestClientBuilder::new()
    }

    /// A copy of this client whose calls observe `token`.
    ///
    /// Calls made after the token is cancelled fail with
    /// [`KrakenError::Cancelled`] without touching the network.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: token,
            ..self.clone()
        }
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// The pipeline used for unsigned requests.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub(crate) async fn public_get<T>(&self, endpoint: &str) -> Result<ApiResponse<T>, KrakenError>
    where
        T: DeserializeOwned,
    {
        self.call(&self.pipeline, RequestDescriptor::get(endpoint)).await
    }

    pub(crate) async fn public_get_with_params<T, Q>(&self, endpoint: &str, params: &Q) -> Result<ApiResponse<T>, KrakenError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let descriptor = RequestDescriptor::get(endpoint)
            .query(params)
            .map_err(|e| e.in_operation(endpoint))?;
        self.call(&self.pipeline, descriptor).await
    }

    /// Signed POST returning a decoded envelope.
    pub(crate) async fn private_post<T, P>(&self, endpoint: &str, params: &P) -> Result<ApiResponse<T>, KrakenError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let (pipeline, descriptor) = self.private_request(endpoint, params).map_err(|e| e.in_operation(endpoint))?;
        self.call(&pipeline, descriptor).await
    }

    /// Signed POST whose response may be a binary body.
    pub(crate) async fn private_execute<T, P>(&self, endpoint: &str, params: &P) -> Result<Execution<Envelope<T>>, KrakenError>
    where
        T: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let outcome = async {
            let (pipeline, descriptor) = self.private_request(endpoint, params)?;
            pipeline.call::<Envelope<T>>(&self.cancel, descriptor).await
        };
        outcome.await.map_err(|e| e.in_operation(endpoint))
    }

    fn private_request<P>(&self, endpoint: &str, params: &P) -> Result<(Pipeline, RequestDescriptor), KrakenError>
    where
        P: Serialize + ?Sized,
    {
        let authorizer = self.authorizer.clone().ok_or(KrakenError::MissingCredentials)?;
        let body = self.private_form(params)?;
        Ok((
            self.pipeline.with_authorizer(authorizer),
            RequestDescriptor::post(endpoint).body(body),
        ))
    }

    /// `nonce=..[&otp=..]&<params>`, the nonce always first.
    fn private_form<P: Serialize + ?Sized>(&self, params: &P) -> Result<String, KrakenError> {
        let mut form = url::form_urlencoded::Serializer::new(String::new());
        form.append_pair("nonce", &self.nonce_provider.next_nonce().to_string());
        if let Some(otp) = self.otp_provider.as_ref().and_then(|p| p.one_time_password()) {
            form.append_pair("otp", otp.expose_secret());
        }
        let mut body = form.finish();

        let params = serde_urlencoded::to_string(params).map_err(|e| KrakenError::Forge(e.to_string()))?;
        if !params.is_empty() {
            body.push('&');
            body.push_str(&params);
        }
        Ok(body)
    }

    async fn call<T>(&self, pipeline: &Pipeline, descriptor: RequestDescriptor) -> Result<ApiResponse<T>, KrakenError>
    where
        T: DeserializeOwned,
    {
        let operation = descriptor.path().to_owned();
        let outcome = async {
            let (meta, envelope) = pipeline
                .call::<Envelope<T>>(&self.cancel, descriptor)
                .await?
                .into_decoded()?;
            if !envelope.is_success() {
                debug!(operation = %operation, errors = ?envelope.error, "envelope carries errors");
            }
            Ok::<_, KrakenError>(ApiResponse { meta, envelope })
        };
        outcome.await.map_err(|e| e.in_operation(operation))
    }
}

impl Default for SpotRestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SpotRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpotRestClient")
            .field("pipeline", &self.pipeline)
            .field("can_sign", &self.authorizer.is_some())
            .field("has_otp", &self.otp_provider.is_some())
            .finish()
    }
}

/// Builder for [`SpotRestClient`].
pub struct SpotRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    authorizer: Option<Arc<dyn Authorizer>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    otp_provider: Option<Arc<dyn OtpProvider>>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    cancel: Option<CancellationToken>,
}

impl SpotRestClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: KRAKEN_BASE_URL.to_string(),
            credentials: None,
            authorizer: None,
            nonce_provider: None,
            otp_provider: None,
            user_agent: None,
            transport: None,
            cancel: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sign private requests with Kraken API keys from this provider.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Use a custom authorizer for private requests instead of key signing.
    pub fn authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Add an `otp` field to every private request.
    pub fn otp_provider(mut self, provider: Arc<dyn OtpProvider>) -> Self {
        self.otp_provider = Some(provider);
        self
    }

    /// An invalid header value fails every request with `KrakenError::Forge`.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Replace the HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn build(self) -> SpotRestClient {
        // Validated when a request is forged.
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| concat!("kraken-spot-rest/", env!("CARGO_PKG_VERSION")).to_owned());

        let transport = self.transport.unwrap_or_else(|| Arc::new(default_transport()));

        // An explicit authorizer wins over credentials.
        let authorizer = self.authorizer.or_else(|| {
            self.credentials.map(|credentials| {
                let signer: Arc<dyn Authorizer> = Arc::new(KrakenSigner::new(credentials));
                Arc::new(ObservedAuthorizer::new(signer)) as Arc<dyn Authorizer>
            })
        });

        SpotRestClient {
            pipeline: Pipeline::new(self.base_url, user_agent, transport),
            authorizer,
            nonce_provider: self
                .nonce_provider
                .unwrap_or_else(|| Arc::new(IncreasingNonce::new())),
            otp_provider: self.otp_provider,
            cancel: self.cancel.unwrap_or_default(),
        }
    }
}

impl Default for SpotRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
