//! The `{ "error": [...], "result": ... }` wrapper around every REST payload.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ApiError, KrakenError};

/// Kraken's response envelope.
///
/// A non-empty `error` list signals a business failure even though the HTTP
/// exchange itself succeeded; both shapes decode without error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    /// Error entries in `"ECategory:Message"` form.
    #[serde(default)]
    pub error: Vec<String>,
    /// Payload, absent on most failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> Envelope<T> {
    /// An envelope carrying a result and no errors.
    pub fn ok(result: T) -> Self {
        Self {
            error: Vec::new(),
            result: Some(result),
        }
    }

    /// `true` when the error list is empty.
    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }

    /// The first error entry, parsed.
    pub fn api_error(&self) -> Option<ApiError> {
        ApiError::from_error_array(&self.error)
    }

    /// Collapse the envelope into the payload or a business error.
    pub fn into_result(self) -> Result<T, KrakenError> {
        if let Some(err) = ApiError::from_error_array(&self.error) {
            return Err(err.into());
        }
        self.result
            .ok_or_else(|| KrakenError::InvalidResponse("envelope has neither errors nor a result".into()))
    }
}

/// HTTP details of a response whose body has been decoded.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    /// Response status (always a success status).
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Final URL after redirects.
    pub url: Url,
}

/// A decoded envelope plus the HTTP metadata it arrived with.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub meta: ResponseMeta,
    pub envelope: Envelope<T>,
}

impl<T> ApiResponse<T> {
    /// Error list from the envelope.
    pub fn errors(&self) -> &[String] {
        &self.envelope.error
    }

    /// The payload, if present, regardless of errors.
    pub fn result(&self) -> Option<&T> {
        self.envelope.result.as_ref()
    }

    /// See [`Envelope::into_result`].
    pub fn into_result(self) -> Result<T, KrakenError> {
        self.envelope.into_result()
    }

    /// Transform the payload while keeping errors and metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            meta: self.meta,
            envelope: Envelope {
                error: self.envelope.error,
                result: self.envelope.result.map(f),
            },
        }
    }
}
