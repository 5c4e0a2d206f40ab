//! Query API wire envelopes.
//!
//! Request bodies with their negotiation headers, buffered response
//! documents, streamed events, and summary metadata.

pub mod metadata;
pub mod request;
pub mod response;

pub use metadata::{
    CounterTotals, Counters, InputPosition, Notification, PlanBody, ProfiledQueryPlan, QueryPlan,
    ResultSummary, SummaryBody,
};
pub use request::QueryRequest;
pub use response::{DataBlock, QueryEvent, ResponseDocument, ServerFailure};
