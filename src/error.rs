//! Error types for the Kraken client library.
//!
//! Transport, protocol and business failures are kept apart: the request
//! pipeline only ever produces the transport/protocol variants, while the
//! error list carried inside a decoded envelope becomes [`KrakenError::Api`]
//! (or [`KrakenError::RateLimitExceeded`]) only when the caller asks for it
//! through [`crate::types::envelope::ApiResponse::into_result`].

use reqwest::StatusCode;
use thiserror::Error;

use crate::market_data::CodecError;

/// The main error type for all Kraken client operations.
#[derive(Error, Debug)]
pub enum KrakenError {
    /// The outgoing request could not be built (bad URL, bad header value, unencodable body).
    #[error("failed to forge request: {0}")]
    Forge(String),

    /// The cancellation token was already cancelled when the request was about to be sent.
    #[error("request cancelled before it was sent")]
    Cancelled,

    /// The transport failed to deliver the request or to read the response.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest_middleware::Error),

    /// The server answered with a non-success status.
    ///
    /// The raw response travels with the error and its body has not been read.
    #[error("unexpected HTTP status {status}")]
    Status {
        /// Status code of the response.
        status: StatusCode,
        /// The raw response, body untouched.
        response: Box<reqwest::Response>,
    },

    /// The response declared a media type the pipeline does not handle.
    #[error("unsupported content type: {0:?}")]
    UnsupportedContentType(String),

    /// A JSON body could not be decoded into the requested type.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A positional-array market-data payload did not match its layout.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Kraken API returned an error
    #[error("Kraken API error: {0}")]
    Api(ApiError),

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(ApiError),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for private endpoints")]
    MissingCredentials,

    /// Invalid response from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A component was configured incompletely.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Writing a streamed body to its destination failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error annotated with the endpoint that produced it.
    #[error("{operation}: {source}")]
    Operation {
        /// Endpoint path, e.g. `/0/private/ClosedOrders`.
        operation: String,
        /// Underlying failure.
        #[source]
        source: Box<KrakenError>,
    },
}

impl KrakenError {
    /// Wrap `self` with the endpoint it came from.
    pub fn in_operation(self, operation: impl Into<String>) -> Self {
        match self {
            // Never stack two annotations for the same call.
            err @ KrakenError::Operation { .. } => err,
            other => KrakenError::Operation {
                operation: operation.into(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, skipping endpoint annotations.
    pub fn root(&self) -> &KrakenError {
        match self {
            KrakenError::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// Endpoint path attached to this error, if any.
    pub fn operation(&self) -> Option<&str> {
        match self {
            KrakenError::Operation { operation, .. } => Some(operation),
            _ => None,
        }
    }

    /// HTTP status of a [`KrakenError::Status`] failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self.root() {
            KrakenError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Take back the raw response of a [`KrakenError::Status`] failure.
    ///
    /// The body has not been consumed; reading it is up to the caller.
    pub fn into_response(self) -> Option<reqwest::Response> {
        match self {
            KrakenError::Status { response, .. } => Some(*response),
            KrakenError::Operation { source, .. } => source.into_response(),
            _ => None,
        }
    }

    /// The business error, if this is an envelope failure.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self.root() {
            KrakenError::Api(err) | KrakenError::RateLimitExceeded(err) => Some(err),
            _ => None,
        }
    }
}

/// Kraken API error codes and messages.
///
/// These are errors returned by the Kraken API itself in the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The error category (e.g., "EGeneral")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Any further entries of the error list, verbatim.
    pub additional: Vec<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if !self.additional.is_empty() {
            write!(f, " (+{} more)", self.additional.len())?;
        }
        Ok(())
    }
}

impl ApiError {
    /// Create a new API error from code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            additional: Vec::new(),
        }
    }

    /// Parse one `"ECategory:Message"` entry.
    pub fn parse(entry: &str) -> Self {
        match entry.split_once(':') {
            Some((code, message)) => Self::new(code, message),
            None => Self::new("Unknown", entry),
        }
    }

    /// Build an error from Kraken's error list, e.g. `["EGeneral:Invalid arguments"]`.
    ///
    /// Returns `None` for an empty list.
    pub fn from_error_array(errors: &[String]) -> Option<Self> {
        let (first, rest) = errors.split_first()?;
        let mut err = Self::parse(first);
        err.additional = rest.to_vec();
        Some(err)
    }

    /// Get the full error string in Kraken's format (code:message).
    pub fn full_code(&self) -> String {
        format!("{}:{}", self.code, self.message)
    }

    /// Check if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self.code.as_str(), "EAPI" | "EOrder") && self.message.contains("Rate limit")
    }

    /// Check if this is an invalid nonce error.
    pub fn is_invalid_nonce(&self) -> bool {
        self.code == "EAPI" && self.message.contains("Invalid nonce")
    }

    /// Check if this is an invalid key error.
    pub fn is_invalid_key(&self) -> bool {
        self.code == "EAPI" && self.message.contains("Invalid key")
    }

    /// Check if this is an invalid signature error.
    pub fn is_invalid_signature(&self) -> bool {
        self.code == "EAPI" && self.message.contains("Invalid signature")
    }

    /// Check if this is a permission denied error.
    pub fn is_permission_denied(&self) -> bool {
        self.code == "EGeneral" && self.message.contains("Permission denied")
    }

    /// Check if this is a service unavailable error.
    pub fn is_service_unavailable(&self) -> bool {
        self.code == "EService" && (self.message.contains("Unavailable") || self.message.contains("Busy"))
    }
}

impl From<ApiError> for KrakenError {
    fn from(err: ApiError) -> Self {
        if err.is_rate_limit() {
            KrakenError::RateLimitExceeded(err)
        } else {
            KrakenError::Api(err)
        }
    }
}

/// Known Kraken error codes for pattern matching.
pub mod error_codes {
    /// General errors
    pub const INVALID_ARGUMENTS: &str = "EGeneral:Invalid arguments";
    pub const PERMISSION_DENIED: &str = "EGeneral:Permission denied";
    pub const UNKNOWN_METHOD: &str = "EGeneral:Unknown method";
    pub const INTERNAL_ERROR: &str = "EGeneral:Internal error";

    /// API errors
    pub const INVALID_KEY: &str = "EAPI:Invalid key";
    pub const INVALID_SIGNATURE: &str = "EAPI:Invalid signature";
    pub const INVALID_NONCE: &str = "EAPI:Invalid nonce";
    pub const RATE_LIMIT_EXCEEDED: &str = "EAPI:Rate limit exceeded";
    pub const FEATURE_DISABLED: &str = "EAPI:Feature disabled";

    /// Order errors
    pub const ORDER_RATE_LIMIT: &str = "EOrder:Rate limit exceeded";
    pub const INSUFFICIENT_FUNDS: &str = "EOrder:Insufficient funds";
    pub const INVALID_ORDER: &str = "EOrder:Invalid order";
    pub const ORDER_NOT_FOUND: &str = "EOrder:Unknown order";

    /// Service errors
    pub const SERVICE_UNAVAILABLE: &str = "EService:Unavailable";
    pub const SERVICE_BUSY: &str = "EService:Busy";

    /// Query errors
    pub const UNKNOWN_ASSET_PAIR: &str = "EQuery:Unknown asset pair";
    pub const UNKNOWN_ASSET: &str = "EQuery:Unknown asset";

    /// Export errors
    pub const EXPORT_NOT_FOUND: &str = "EGeneral:Unknown report";
}
