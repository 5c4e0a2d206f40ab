//! # HTTP Query API protocol layer
//!
//! Codec and streaming adapter for the Query API's JSON-over-HTTP wire
//! protocol. The transport itself (connections, pooling, TLS) lives with
//! the caller; this layer translates bytes and documents.
//!
//! ## Pipeline
//!
//! - [`codec`] - tagged wire values, the value codec, and the integer
//!   policy
//! - [`message`] - request bodies, response documents, streamed events,
//!   and summary metadata
//! - [`framing`] - line framing for the streamed form
//! - [`reader`] - buffered and streaming response readers
//! - [`negotiation`] - media types and reader dispatch
//!
//! A buffered response is one JSON document; a streamed response is a
//! sequence of lines, each one event: `Header`, zero or more `Record`s,
//! then `Summary` (or a terminating `Error`).

pub mod codec;
pub mod error;
pub mod framing;
pub mod message;
pub mod negotiation;
pub mod reader;

pub use codec::{IntegerPolicy, ValueDecoder, WireValue};
pub use error::ErrorCode;
pub use framing::{BodyStream, EventStream, LineFramer};
pub use message::{
    Counters, Notification, ProfiledQueryPlan, QueryEvent, QueryPlan, QueryRequest,
    ResponseDocument, ResultSummary,
};
pub use negotiation::{
    dispatch, HttpResponse, QueryReader, ACCEPT_HEADER, JSON_MEDIA_TYPE, QUERY_MEDIA_TYPE,
    QUERY_STREAMING_MEDIA_TYPE,
};
pub use reader::{BufferedReader, StreamingReader};
