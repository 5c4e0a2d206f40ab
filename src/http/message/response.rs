//! Response envelopes: streamed events and the buffered document.

use serde::Deserialize;

use super::metadata::SummaryBody;
use crate::driver::error::{DriverError, DriverResult};
use crate::http::codec::wire::WireValue;

// ============================================================================
// QueryEvent - one line of a streamed response
// ============================================================================

/// One event of a streamed response.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryEvent {
    /// Field names, first event of every response
    Header {
        /// Column names
        fields: Option<Vec<String>>,
    },
    /// One result row
    Record {
        /// Row values
        row: Vec<WireValue>,
    },
    /// Terminal metadata bundle
    Summary(SummaryBody),
    /// Terminal server failure
    Error {
        /// Reported failures, most significant first
        failures: Vec<ServerFailure>,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HeaderBody {
    fields: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    failures: Vec<ServerFailure>,
}

impl QueryEvent {
    /// Parse one response line into an event.
    ///
    /// A line is an event iff it is a JSON object with a string `$event`
    /// and a non-null structured `_body`; the body's inner shape is
    /// enforced by the readers, not here.
    pub fn parse(line: &str) -> DriverResult<QueryEvent> {
        let document: serde_json::Value = serde_json::from_str(line)
            .map_err(|err| DriverError::protocol(format!("Invalid event line: {}", err)))?;
        let object = document
            .as_object()
            .ok_or_else(|| DriverError::protocol("Event line is not a JSON object"))?;

        let name = object
            .get("$event")
            .and_then(|value| value.as_str())
            .ok_or_else(|| DriverError::protocol("Event line has no string '$event' field"))?;
        let body = object
            .get("_body")
            .filter(|value| value.is_object() || value.is_array())
            .ok_or_else(|| DriverError::protocol("Event line has no structured '_body' field"))?
            .clone();

        match name {
            "Header" => {
                let body: HeaderBody = parse_body(body, "Header")?;
                Ok(QueryEvent::Header {
                    fields: body.fields,
                })
            }
            "Record" => {
                let row: Vec<WireValue> = parse_body(body, "Record")?;
                Ok(QueryEvent::Record { row })
            }
            "Summary" => Ok(QueryEvent::Summary(parse_body(body, "Summary")?)),
            "Error" => {
                let body: ErrorBody = parse_body(body, "Error")?;
                Ok(QueryEvent::Error {
                    failures: body.failures,
                })
            }
            other => Err(DriverError::protocol(format!(
                "Unknown event type '{}'",
                other
            ))),
        }
    }

    /// The event name.
    pub fn name(&self) -> &'static str {
        match self {
            QueryEvent::Header { .. } => "Header",
            QueryEvent::Record { .. } => "Record",
            QueryEvent::Summary(_) => "Summary",
            QueryEvent::Error { .. } => "Error",
        }
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(
    body: serde_json::Value,
    event: &str,
) -> DriverResult<T> {
    serde_json::from_value(body)
        .map_err(|err| DriverError::protocol(format!("Invalid {} body: {}", event, err)))
}

// ============================================================================
// ServerFailure
// ============================================================================

/// One failure reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerFailure {
    /// Failure code
    pub code: Option<String>,
    /// Failure message
    pub message: String,
    /// Legacy code field some server versions populate instead of `code`
    pub error: Option<String>,
}

impl ServerFailure {
    /// The failure as a driver error.
    pub fn to_error(&self) -> DriverError {
        // TODO: drop the `error` fallback once every supported server
        // version reports `code`.
        let code = self
            .code
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_default();
        DriverError::server(code, self.message.clone())
    }
}

// ============================================================================
// ResponseDocument - buffered response
// ============================================================================

/// A buffered response document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseDocument {
    /// Result payload of a success document
    #[serde(default)]
    pub data: Option<DataBlock>,
    /// Summary metadata of a success document
    #[serde(flatten)]
    pub summary: SummaryBody,
    /// Failures of an error document
    #[serde(default)]
    pub errors: Option<Vec<ServerFailure>>,
}

/// Field names and row values of a success document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataBlock {
    /// Column names
    pub fields: Vec<String>,
    /// Rows of tagged wire values
    pub values: Vec<Vec<WireValue>>,
}

// ============================================================================
// Tests
// ============================================================================
