//! Bulk trade and ledger exports.
//!
//! An export is requested with [`SpotRestClient::add_export`], polled with
//! [`SpotRestClient::get_export_status`] and, once `Processed`, downloaded as
//! a zip archive with [`SpotRestClient::retrieve_export`]. The archive is
//! handed back as an unread body; see [`ExportDownload`].

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use reqwest::Response;
use reqwest::header::CONTENT_LENGTH;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::error::KrakenError;
use crate::spot::rest::SpotRestClient;
use crate::spot::rest::endpoints::private;
use crate::spot::rest::pipeline::{Execution, StreamMedia};
use crate::types::{ApiResponse, ResponseMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Trades,
    Ledgers,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct AddExportRequest {
    pub report: ReportKind,
    pub format: ExportFormat,
    pub description: String,
    /// Comma separated column list; Kraken exports every column by default.
    pub fields: Option<String>,
    /// Unix seconds.
    pub starttm: Option<i64>,
    pub endtm: Option<i64>,
}

impl AddExportRequest {
    pub fn new(report: ReportKind, description: impl Into<String>) -> Self {
        Self {
            report,
            format: ExportFormat::default(),
            description: description.into(),
            fields: None,
            starttm: None,
            endtm: None,
        }
    }

    pub fn format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn between(mut self, start: i64, end: i64) -> Self {
        self.starttm = Some(start);
        self.endtm = Some(end);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddExportResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportStatusRequest {
    pub report: ReportKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ExportState {
    Queued,
    Processing,
    Processed,
}

/// One export as listed by `ExportStatus`. Timestamps are Unix seconds sent
/// as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportReport {
    pub id: String,
    pub descr: String,
    pub format: ExportFormat,
    pub report: ReportKind,
    #[serde(default)]
    pub subtype: Option<String>,
    pub status: ExportState,
    #[serde(default)]
    pub flags: Option<String>,
    pub fields: String,
    pub createdtm: String,
    #[serde(default)]
    pub expiretm: Option<String>,
    pub starttm: String,
    #[serde(default)]
    pub completedtm: Option<String>,
    pub datastarttm: String,
    pub dataendtm: String,
    #[serde(default)]
    pub aclass: Option<String>,
    pub asset: String,
}

impl ExportReport {
    pub fn is_ready(&self) -> bool {
        self.status == ExportState::Processed
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RetrieveExportRequest {
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoveKind {
    /// Cancel a queued or processing export.
    Cancel,
    /// Delete a processed export.
    Delete,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveExportRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RemoveKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoveExportResponse {
    #[serde(default)]
    pub delete: Option<bool>,
    #[serde(default)]
    pub cancel: Option<bool>,
}

/// What `RetrieveExport` answered.
#[derive(Debug)]
pub enum ExportRetrieval {
    /// The archive, body still unread.
    Download(ExportDownload),
    /// Kraken answered with a JSON envelope instead, typically carrying
    /// [`EXPORT_NOT_FOUND`](crate::error::error_codes::EXPORT_NOT_FOUND).
    Rejected(ApiResponse<Value>),
}

impl ExportRetrieval {
    /// The download, or the envelope's error.
    pub fn into_download(self) -> Result<ExportDownload, KrakenError> {
        match self {
            ExportRetrieval::Download(download) => Ok(download),
            ExportRetrieval::Rejected(response) => match response.envelope.api_error() {
                Some(error) => Err(error.into()),
                None => Err(KrakenError::InvalidResponse(
                    "export retrieval returned JSON without an error".to_owned(),
                )),
            },
        }
    }
}

/// An export archive whose body has not been read yet.
///
/// The connection stays checked out until the body is consumed with
/// [`bytes_stream`](Self::bytes_stream), [`write_to`](Self::write_to) or
/// [`bytes`](Self::bytes), or until this value is dropped.
#[derive(Debug)]
pub struct ExportDownload {
    media: StreamMedia,
    response: Response,
}

impl ExportDownload {
    pub fn media(&self) -> StreamMedia {
        self.media
    }

    pub fn content_length(&self) -> Option<u64> {
        self.response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok())
    }

    pub fn meta(&self) -> ResponseMeta {
        ResponseMeta {
            status: self.response.status(),
            headers: self.response.headers().clone(),
            url: self.response.url().clone(),
        }
    }

    pub fn bytes_stream(self) -> impl Stream<Item = Result<Bytes, KrakenError>> {
        self.response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| KrakenError::from(reqwest_middleware::Error::from(e))))
    }

    /// Copy the archive into `writer`, returning the number of bytes written.
    pub async fn write_to<W>(self, writer: &mut W) -> Result<u64, KrakenError>
    where
        W: AsyncWrite + Unpin,
    {
        let stream = self.bytes_stream();
        tokio::pin!(stream);

        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;
        debug!(bytes = written, "export archive written");
        Ok(written)
    }

    /// Read the whole archive into memory.
    pub async fn bytes(self) -> Result<Bytes, KrakenError> {
        self.response
            .bytes()
            .await
            .map_err(|e| KrakenError::from(reqwest_middleware::Error::from(e)))
    }
}

impl SpotRestClient {
    pub async fn add_export(&self, request: &AddExportRequest) -> Result<ApiResponse<AddExportResponse>, KrakenError> {
        self.private_post(private::ADD_EXPORT, request).await
    }

    pub async fn get_export_status(
        &self,
        request: &ExportStatusRequest,
    ) -> Result<ApiResponse<Vec<ExportReport>>, KrakenError> {
        self.private_post(private::EXPORT_STATUS, request).await
    }

    /// Download a processed export.
    ///
    /// ```rust,no_run
    /// use kraken_spot_rest::auth::EnvCredentials;
    /// use kraken_spot_rest::spot::rest::SpotRestClient;
    /// use kraken_spot_rest::spot::rest::private::RetrieveExportRequest;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = SpotRestClient::builder()
    ///         .credentials(Arc::new(EnvCredentials::from_env()?))
    ///         .build();
    ///
    ///     let request = RetrieveExportRequest { id: "TCJA".into() };
    ///     let download = client.retrieve_export(&request).await?.into_download()?;
    ///     let mut file = tokio::fs::File::create("export.zip").await?;
    ///     download.write_to(&mut file).await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn retrieve_export(&self, request: &RetrieveExportRequest) -> Result<ExportRetrieval, KrakenError> {
        match self.private_execute::<Value, _>(private::RETRIEVE_EXPORT, request).await? {
            Execution::Stream { media, response } => Ok(ExportRetrieval::Download(ExportDownload { media, response })),
            Execution::Decoded { meta, value } => Ok(ExportRetrieval::Rejected(ApiResponse { meta, envelope: value })),
        }
    }

    pub async fn remove_export(
        &self,
        request: &RemoveExportRequest,
    ) -> Result<ApiResponse<RemoveExportResponse>, KrakenError> {
        self.private_post(private::REMOVE_EXPORT, request).await
    }
}
