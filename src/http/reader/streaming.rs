//! Streaming response reader.

use std::sync::Arc;

use tokio_stream::StreamExt;

use crate::driver::error::{DriverError, DriverResult};
use crate::driver::record::Record;
use crate::http::codec::decoder::ValueDecoder;
use crate::http::codec::integers::IntegerPolicy;
use crate::http::framing::EventStream;
use crate::http::message::metadata::ResultSummary;
use crate::http::message::response::{QueryEvent, ServerFailure};

/// Reader over a streamed event sequence.
///
/// Field names and summary resolve lazily by consuming events in arrival
/// order. Exactly one `Header` must precede any `Record`, and a `Summary`
/// (or `Error`) terminates the response; any other ordering is a protocol
/// error. The first terminal error is latched and re-raised from every
/// later accessor.
pub struct StreamingReader {
    events: EventStream,
    decoder: ValueDecoder,
    keys: Option<Arc<[String]>>,
    summary: Option<ResultSummary>,
    done: bool,
    failure: Option<DriverError>,
}

impl std::fmt::Debug for StreamingReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingReader")
            .field("keys", &self.keys)
            .field("done", &self.done)
            .field("failure", &self.failure)
            .finish()
    }
}

impl StreamingReader {
    /// Create a reader over an event stream.
    pub fn new(events: EventStream, policy: IntegerPolicy) -> Self {
        Self {
            events,
            decoder: ValueDecoder::new(policy),
            keys: None,
            summary: None,
            done: false,
            failure: None,
        }
    }

    /// The response field names, consuming the `Header` event on first
    /// call.
    pub async fn keys(&mut self) -> DriverResult<Vec<String>> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        if let Some(keys) = &self.keys {
            return Ok(keys.to_vec());
        }

        match self.pull().await? {
            QueryEvent::Header { fields } => {
                let fields = fields
                    .ok_or_else(|| DriverError::protocol("Header event is missing fields"))?;
                let shared: Arc<[String]> = fields.into();
                self.keys = Some(shared.clone());
                Ok(shared.to_vec())
            }
            QueryEvent::Error { failures } => Err(self.latch(failures)),
            other => Err(DriverError::protocol(format!(
                "Expected a Header event, received {}",
                other.name()
            ))),
        }
    }

    /// Decode and return the next row, or `None` once the summary has
    /// arrived.
    pub async fn next_record(&mut self) -> DriverResult<Option<Record>> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        if self.summary.is_some() {
            return Ok(None);
        }

        loop {
            match self.pull().await? {
                QueryEvent::Header { fields } => {
                    if let Some(fields) = fields {
                        self.keys = Some(fields.into());
                    }
                }
                QueryEvent::Record { row } => {
                    let keys = self
                        .keys
                        .as_ref()
                        .ok_or_else(|| {
                            DriverError::protocol("Record event received before Header")
                        })?;
                    return Ok(Some(self.decoder.decode_row(&row, keys)?));
                }
                QueryEvent::Summary(body) => {
                    self.summary = Some(self.decoder.decode_summary(&body)?);
                    return Ok(None);
                }
                QueryEvent::Error { failures } => return Err(self.latch(failures)),
            }
        }
    }

    /// The summary metadata bundle, draining events up to `Summary`.
    ///
    /// Calling this before the rows were consumed commits to draining
    /// them; intermediate records are skipped, not returned.
    pub async fn summary(&mut self) -> DriverResult<ResultSummary> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        if let Some(summary) = &self.summary {
            return Ok(summary.clone());
        }

        loop {
            match self.pull().await? {
                QueryEvent::Header { fields } => {
                    if let Some(fields) = fields {
                        self.keys = Some(fields.into());
                    }
                }
                QueryEvent::Record { .. } => {
                    tracing::debug!("skipping record while draining to summary");
                }
                QueryEvent::Summary(body) => {
                    let summary = self.decoder.decode_summary(&body)?;
                    self.summary = Some(summary.clone());
                    return Ok(summary);
                }
                QueryEvent::Error { failures } => return Err(self.latch(failures)),
            }
        }
    }

    /// Pull the next event; stream-level failures latch, exhaustion is
    /// terminal.
    async fn pull(&mut self) -> DriverResult<QueryEvent> {
        if self.done {
            return Err(DriverError::protocol("Closed streaming"));
        }
        match self.events.next().await {
            Some(Ok(event)) => Ok(event),
            Some(Err(error)) => {
                self.failure = Some(error.clone());
                Err(error)
            }
            None => {
                self.done = true;
                Err(DriverError::protocol("Closed streaming"))
            }
        }
    }

    /// Latch the first reported failure as the reader's terminal error.
    fn latch(&mut self, failures: Vec<ServerFailure>) -> DriverError {
        let error = failures
            .first()
            .map(|failure| failure.to_error())
            .unwrap_or_else(|| DriverError::protocol("Server replied an empty error response"));
        self.failure = Some(error.clone());
        error
    }
}

// ============================================================================
// Tests
// ============================================================================
