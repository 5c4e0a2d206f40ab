//! Media-type negotiation and reader dispatch.

use bytes::Bytes;
use tokio_stream::StreamExt;

use super::codec::integers::IntegerPolicy;
use super::framing::{event_stream, BodyStream};
use super::message::response::ResponseDocument;
use super::reader::{BufferedReader, StreamingReader};
use crate::driver::error::{DriverError, DriverResult};
use crate::driver::record::Record;
use crate::http::message::metadata::ResultSummary;

// ============================================================================
// Media types
// ============================================================================

/// Buffered response media type; also the request `Content-Type`.
pub const QUERY_MEDIA_TYPE: &str = "application/vnd.neo4j.query";

/// Streamed, line-delimited response media type.
pub const QUERY_STREAMING_MEDIA_TYPE: &str = "application/vnd.neo4j.query+jsonl";

/// Generic JSON, accepted as a buffered fallback.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// The request `Accept` header; the streamed form is preferred.
pub const ACCEPT_HEADER: &str =
    "application/vnd.neo4j.query+jsonl, application/vnd.neo4j.query, application/json";

/// Strip media-type parameters such as `;version=1.0`.
fn media_type(content_type: &str) -> &str {
    content_type
        .split_once(';')
        .map_or(content_type, |(media, _)| media)
        .trim()
}

// ============================================================================
// HttpResponse
// ============================================================================

/// A response handed over by the transport.
pub struct HttpResponse {
    url: String,
    content_type: Option<String>,
    body: BodyStream,
}

impl HttpResponse {
    /// Wrap a transport response.
    pub fn new(url: impl Into<String>, content_type: Option<String>, body: BodyStream) -> Self {
        Self {
            url: url.into(),
            content_type,
            body,
        }
    }

    /// Wrap a fully buffered body.
    pub fn from_bytes(
        url: impl Into<String>,
        content_type: Option<String>,
        body: impl Into<Bytes>,
    ) -> Self {
        Self::new(
            url,
            content_type,
            Box::pin(tokio_stream::once(Ok(body.into()))),
        )
    }

    /// The requested URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The response `Content-Type` header.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("url", &self.url)
            .field("content_type", &self.content_type)
            .finish()
    }
}

// ============================================================================
// QueryReader
// ============================================================================

/// A reader over either wire form.
#[derive(Debug)]
pub enum QueryReader {
    /// Fully materialized document
    Buffered(BufferedReader),
    /// Live event stream
    Streaming(StreamingReader),
}

impl QueryReader {
    /// The response field names.
    pub async fn keys(&mut self) -> DriverResult<Vec<String>> {
        match self {
            QueryReader::Buffered(reader) => reader.keys(),
            QueryReader::Streaming(reader) => reader.keys().await,
        }
    }

    /// Decode and return the next row, or `None` once exhausted.
    pub async fn next_record(&mut self) -> DriverResult<Option<Record>> {
        match self {
            QueryReader::Buffered(reader) => reader.next_record(),
            QueryReader::Streaming(reader) => reader.next_record().await,
        }
    }

    /// The summary metadata bundle.
    pub async fn summary(&mut self) -> DriverResult<ResultSummary> {
        match self {
            QueryReader::Buffered(reader) => reader.summary(),
            QueryReader::Streaming(reader) => reader.summary().await,
        }
    }

    /// Whether the response is being streamed.
    pub fn is_streaming(&self) -> bool {
        matches!(self, QueryReader::Streaming(_))
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Choose a reader from the response `Content-Type`.
///
/// The streamed media type builds the event pipeline; anything else is
/// read fully, JSON-parsed (an empty body reads as `{}`), and handed to
/// the buffered reader. Body-read and parse failures surface as
/// service-unavailable errors carrying the requested URL.
pub async fn dispatch(response: HttpResponse, policy: IntegerPolicy) -> DriverResult<QueryReader> {
    let HttpResponse {
        url,
        content_type,
        body,
    } = response;
    let media = content_type.as_deref().map(media_type);

    if media == Some(QUERY_STREAMING_MEDIA_TYPE) {
        tracing::debug!(url = %url, "dispatching streaming query response");
        let reader = StreamingReader::new(event_stream(body), policy);
        return Ok(QueryReader::Streaming(reader));
    }

    tracing::debug!(url = %url, content_type = ?media, "dispatching buffered query response");
    let text = read_body_text(body).await.map_err(|err| {
        DriverError::service_unavailable(format!(
            "Failed to read response body from {}: {}",
            url, err
        ))
    })?;
    let text = if text.trim().is_empty() { "{}" } else { &text };

    let document: ResponseDocument = serde_json::from_str(text).map_err(|err| {
        DriverError::service_unavailable(format!(
            "Failed to parse response body from {}: {}",
            url, err
        ))
    })?;

    Ok(QueryReader::Buffered(BufferedReader::from_document(
        document, media, policy,
    )))
}

async fn read_body_text(mut body: BodyStream) -> Result<String, String> {
    let mut buffer = Vec::new();
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|err| err.to_string())?;
        buffer.extend_from_slice(&chunk);
    }
    String::from_utf8(buffer).map_err(|err| err.to_string())
}

// ============================================================================
// Tests
// ============================================================================
