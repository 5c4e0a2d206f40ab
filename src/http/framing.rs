//! Line framing for streamed responses.
//!
//! A streamed response is line-delimited JSON: the body byte stream is
//! framed into whole lines, and each line parses into one
//! [`QueryEvent`]. The framer buffers a partial trailing line across
//! chunk boundaries and never emits blank lines.

use std::pin::Pin;

use bytes::{Bytes, BytesMut};
use futures::Stream;
use tokio_stream::StreamExt;
use tokio_util::codec::{Decoder, FramedRead};
use tokio_util::io::StreamReader;

use super::message::response::QueryEvent;
use crate::driver::error::{DriverError, DriverResult};

/// The response body as a byte stream.
pub type BodyStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send>>;

/// A parsed event stream.
pub type EventStream = Pin<Box<dyn Stream<Item = DriverResult<QueryEvent>> + Send>>;

// ============================================================================
// LineFramer
// ============================================================================

/// Codec framing a byte stream into whole, non-blank lines.
#[derive(Debug, Default)]
pub struct LineFramer;

impl LineFramer {
    /// Create a new framer.
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for LineFramer {
    type Item = String;
    type Error = DriverError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, DriverError> {
        while let Some(idx) = src.iter().position(|byte| *byte == b'\n') {
            let line = src.split_to(idx + 1);
            let text = std::str::from_utf8(&line[..idx])
                .map_err(|_| DriverError::protocol("Response line is not valid UTF-8"))?
                .trim();
            if !text.is_empty() {
                return Ok(Some(text.to_string()));
            }
        }
        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>, DriverError> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        if src.is_empty() {
            return Ok(None);
        }
        // A final line without a trailing newline still counts.
        let tail = src.split();
        let text = std::str::from_utf8(&tail)
            .map_err(|_| DriverError::protocol("Response line is not valid UTF-8"))?
            .trim();
        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text.to_string()))
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Compose the streaming pipeline: body bytes -> lines -> events.
pub fn event_stream(body: BodyStream) -> EventStream {
    let lines = FramedRead::new(StreamReader::new(body), LineFramer::new());
    Box::pin(lines.map(|line| line.and_then(|line| QueryEvent::parse(&line))))
}

// ============================================================================
// Tests
// ============================================================================
