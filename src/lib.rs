//! # Zeta4G HTTP Driver
//!
//! Client-side codec and streaming adapter for the
//! [Zeta4G](https://github.com/zeta9044/zeta4g) graph database HTTP
//! Query API.
//!
//! ## Features
//!
//! - **Typed values** - integers, floats, temporals, points, byte
//!   buffers, nodes, relationships, and paths, decoded from the
//!   protocol's tagged JSON form
//! - **Streaming** - line-delimited responses decode event by event;
//!   rows are available before the response finishes
//! - **Integer policies** - keep 64-bit integers lossless, widen them,
//!   or read them as doubles
//! - **Async/Await** - built on Tokio stream tooling
//!
//! ## Encoding a request
//!
//! ```rust
//! use zeta4g_http_driver::{params, AuthToken, QueryConfig, QueryRequest};
//!
//! let request = QueryRequest::new(
//!     AuthToken::basic("zeta4g", "password"),
//!     "MATCH (n:Person {name: $name}) RETURN n",
//!     Some(params! {"name" => "Alice"}),
//!     QueryConfig::new().with_bookmark("bm:1234"),
//! );
//!
//! // Hand these to the transport:
//! let _content_type = request.content_type();
//! let _accept = request.accept();
//! let _authorization = request.authorization()?;
//! let _body = request.body()?;
//! # Ok::<(), zeta4g_http_driver::DriverError>(())
//! ```
//!
//! ## Reading a response
//!
//! ```rust,no_run
//! use zeta4g_http_driver::{dispatch, HttpResponse, IntegerPolicy};
//!
//! # async fn example(response: HttpResponse) -> Result<(), zeta4g_http_driver::DriverError> {
//! // `response` wraps the transport's status line and body stream.
//! let mut reader = dispatch(response, IntegerPolicy::Lossless).await?;
//!
//! let keys = reader.keys().await?;
//! while let Some(record) = reader.next_record().await? {
//!     println!("{:?}", record.get(&keys[0]));
//! }
//! let summary = reader.summary().await?;
//! println!("bookmarks: {:?}", summary.bookmarks);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`driver`] - value model, records, errors, auth, configuration
//! - [`http`] - wire codec, framing, readers, and negotiation

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod driver;
pub mod http;

// Re-exports for convenience
pub use driver::{
    AccessMode, AuthToken, Bookmark, BrokenValue, DateTime, DriverError, DriverResult, Duration,
    Int, Node, OffsetTime, Path, PathSegment, Point, QueryConfig, Record, Relationship,
    TransactionConfig, Value,
};

pub use http::{
    dispatch, BufferedReader, Counters, HttpResponse, IntegerPolicy, Notification,
    ProfiledQueryPlan, QueryEvent, QueryPlan, QueryReader, QueryRequest, ResultSummary,
    StreamingReader, WireValue,
};
