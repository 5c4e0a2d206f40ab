//! Response readers.
//!
//! Both readers expose the same surface (field names, a single-pass
//! record stream, and the summary bundle) over the two wire forms: a
//! fully materialized document or a live event stream.

pub mod buffered;
pub mod streaming;

pub use buffered::BufferedReader;
pub use streaming::StreamingReader;
