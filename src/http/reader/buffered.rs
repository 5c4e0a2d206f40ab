//! Buffered response reader.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::driver::error::{DriverError, DriverResult};
use crate::driver::record::Record;
use crate::http::codec::decoder::ValueDecoder;
use crate::http::codec::integers::IntegerPolicy;
use crate::http::codec::wire::WireValue;
use crate::http::message::metadata::{ResultSummary, SummaryBody};
use crate::http::message::response::ResponseDocument;
use crate::http::negotiation::{JSON_MEDIA_TYPE, QUERY_MEDIA_TYPE};

/// Reader over a fully materialized response document.
///
/// Rows decode lazily: each [`next_record`](Self::next_record) call
/// consumes one stored row, so iteration is single-pass. A failed
/// construction yields a reader that raises the same error from every
/// accessor.
#[derive(Debug)]
pub struct BufferedReader {
    decoder: ValueDecoder,
    keys: Arc<[String]>,
    rows: VecDeque<Vec<WireValue>>,
    body: SummaryBody,
    summary: Option<ResultSummary>,
    error: Option<DriverError>,
}

impl BufferedReader {
    /// Build a reader from a parsed response document.
    pub fn from_document(
        document: ResponseDocument,
        content_type: Option<&str>,
        policy: IntegerPolicy,
    ) -> Self {
        if let Some(failures) = document.errors {
            let error = failures
                .first()
                .map(|failure| failure.to_error())
                .unwrap_or_else(|| {
                    DriverError::protocol("Server replied an empty error response")
                });
            return Self::failed(error, policy);
        }

        match content_type {
            Some(QUERY_MEDIA_TYPE) | Some(JSON_MEDIA_TYPE) => {}
            other => {
                return Self::failed(
                    DriverError::protocol(format!(
                        "Unexpected Content-Type '{}' for a query response",
                        other.unwrap_or("<missing>")
                    )),
                    policy,
                );
            }
        }

        let data = document.data.unwrap_or_default();
        Self {
            decoder: ValueDecoder::new(policy),
            keys: data.fields.into(),
            rows: data.values.into(),
            body: document.summary,
            summary: None,
            error: None,
        }
    }

    /// Build a reader that raises `error` from every accessor.
    pub fn failed(error: DriverError, policy: IntegerPolicy) -> Self {
        Self {
            decoder: ValueDecoder::new(policy),
            keys: Vec::new().into(),
            rows: VecDeque::new(),
            body: SummaryBody::default(),
            summary: None,
            error: Some(error),
        }
    }

    /// The response field names.
    pub fn keys(&self) -> DriverResult<Vec<String>> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(self.keys.to_vec())
    }

    /// Decode and return the next row, or `None` once exhausted.
    pub fn next_record(&mut self) -> DriverResult<Option<Record>> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        match self.rows.pop_front() {
            Some(row) => Ok(Some(self.decoder.decode_row(&row, &self.keys)?)),
            None => Ok(None),
        }
    }

    /// The summary metadata bundle.
    pub fn summary(&mut self) -> DriverResult<ResultSummary> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        if let Some(summary) = &self.summary {
            return Ok(summary.clone());
        }
        let summary = self.decoder.decode_summary(&self.body)?;
        self.summary = Some(summary.clone());
        Ok(summary)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::types::{Int, Value};

    fn document(json: &str) -> ResponseDocument {
        serde_json::from_str(json).unwrap()
    }

    fn success_reader() -> BufferedReader {
        let doc = document(
            r#"{
                "data": {
                    "fields": ["n", "s"],
                    "values": [
                        [{"$type":"Integer","_value":"1"}, {"$type":"String","_value":"x"}],
                        [{"$type":"Integer","_value":"2"}, {"$type":"String","_value":"y"}]
                    ]
                },
                "counters": {"containsUpdates": false},
                "bookmarks": ["bm:1"]
            }"#,
        );
        BufferedReader::from_document(doc, Some(QUERY_MEDIA_TYPE), IntegerPolicy::Lossless)
    }

    #[test]
    fn test_keys() {
        let reader = success_reader();
        assert_eq!(reader.keys().unwrap(), vec!["n", "s"]);
        // Idempotent
        assert_eq!(reader.keys().unwrap(), vec!["n", "s"]);
    }

    #[test]
    fn test_stream_is_single_pass() {
        let mut reader = success_reader();

        let first = reader.next_record().unwrap().unwrap();
        assert_eq!(first.get("n"), Some(&Value::Integer(Int::Lossless(1))));
        assert_eq!(first.get("s"), Some(&Value::String("x".into())));

        let second = reader.next_record().unwrap().unwrap();
        assert_eq!(second.get("n"), Some(&Value::Integer(Int::Lossless(2))));

        assert!(reader.next_record().unwrap().is_none());
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_summary() {
        let mut reader = success_reader();
        let summary = reader.summary().unwrap();

        assert_eq!(summary.bookmarks, vec!["bm:1"]);
        assert!(!summary.counters.contains_updates);

        // Idempotent
        assert_eq!(reader.summary().unwrap(), summary);
    }

    #[test]
    fn test_json_fallback_content_type() {
        let doc = document(r#"{"data": {"fields": [], "values": []}}"#);
        let reader = BufferedReader::from_document(
            doc,
            Some(JSON_MEDIA_TYPE),
            IntegerPolicy::Lossless,
        );
        assert!(reader.keys().is_ok());
    }

    #[test]
    fn test_wrong_content_type_fails_every_accessor() {
        let doc = document(r#"{"data": {"fields": [], "values": []}}"#);
        let mut reader =
            BufferedReader::from_document(doc, Some("text/html"), IntegerPolicy::Lossless);

        assert!(reader.keys().is_err());
        assert!(reader.next_record().is_err());
        assert!(reader.summary().is_err());
    }

    #[test]
    fn test_server_error_document() {
        let doc = document(
            r#"{"errors": [{"code": "Neo.ClientError.Statement.SyntaxError", "message": "bad"}]}"#,
        );
        let reader =
            BufferedReader::from_document(doc, Some(QUERY_MEDIA_TYPE), IntegerPolicy::Lossless);

        assert_eq!(
            reader.keys().unwrap_err(),
            DriverError::server("Neo.ClientError.Statement.SyntaxError", "bad")
        );
    }

    #[test]
    fn test_error_code_fallback() {
        let doc = document(r#"{"errors": [{"error": "Neo.Legacy", "message": "bad"}]}"#);
        let reader =
            BufferedReader::from_document(doc, Some(QUERY_MEDIA_TYPE), IntegerPolicy::Lossless);

        assert_eq!(
            reader.keys().unwrap_err(),
            DriverError::server("Neo.Legacy", "bad")
        );
    }

    #[test]
    fn test_empty_error_list() {
        let doc = document(r#"{"errors": []}"#);
        let reader =
            BufferedReader::from_document(doc, Some(QUERY_MEDIA_TYPE), IntegerPolicy::Lossless);

        assert_eq!(
            reader.keys().unwrap_err(),
            DriverError::protocol("Server replied an empty error response")
        );
    }
}
