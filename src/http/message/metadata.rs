//! Summary metadata types.
//!
//! Raw serde bodies as the server sends them, and the decoded forms the
//! readers hand to callers. Integer fields of the decoded forms are
//! policy-typed; see [`IntegerPolicy`](crate::http::codec::IntegerPolicy).

use std::collections::HashMap;

use serde::Deserialize;

use crate::driver::types::{Int, Value};
use crate::http::codec::wire::WireValue;

// ============================================================================
// Raw bodies
// ============================================================================

/// Summary payload as sent by the server.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryBody {
    /// New bookmarks
    pub bookmarks: Option<Vec<String>>,
    /// Update counters
    pub counters: Option<CounterTotals>,
    /// Execution plan with runtime statistics (PROFILE)
    pub profiled_query_plan: Option<PlanBody>,
    /// Execution plan (EXPLAIN)
    pub query_plan: Option<PlanBody>,
    /// Notifications
    pub notifications: Option<Vec<Notification>>,
}

/// Update counters as sent by the server.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CounterTotals {
    /// Whether the query performed any update
    pub contains_updates: bool,
    /// Nodes created
    pub nodes_created: i64,
    /// Nodes deleted
    pub nodes_deleted: i64,
    /// Properties set
    pub properties_set: i64,
    /// Relationships created
    pub relationships_created: i64,
    /// Relationships deleted
    pub relationships_deleted: i64,
    /// Labels added
    pub labels_added: i64,
    /// Labels removed
    pub labels_removed: i64,
    /// Indexes added
    pub indexes_added: i64,
    /// Indexes removed
    pub indexes_removed: i64,
    /// Constraints added
    pub constraints_added: i64,
    /// Constraints removed
    pub constraints_removed: i64,
    /// Whether the query performed any system update
    pub contains_system_updates: bool,
    /// System updates
    pub system_updates: i64,
}

/// Execution plan node as sent by the server.
///
/// Plain plans carry only the operator fields; profiled plans add runtime
/// statistics. Missing fields default to zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanBody {
    /// Database hits
    pub db_hits: i64,
    /// Rows produced
    pub records: i64,
    /// Whether page cache statistics are present
    pub has_page_cache_stats: bool,
    /// Page cache hits
    pub page_cache_hits: i64,
    /// Page cache misses
    pub page_cache_misses: i64,
    /// Page cache hit ratio
    pub page_cache_hit_ratio: f64,
    /// Time spent, in microseconds
    pub time: i64,
    /// Operator type
    pub operator_type: String,
    /// Operator arguments
    pub arguments: HashMap<String, WireValue>,
    /// Identifiers in scope
    pub identifiers: Vec<String>,
    /// Child plans
    pub children: Vec<PlanBody>,
}

// ============================================================================
// Decoded forms
// ============================================================================

/// Update statistics for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Counters {
    /// Whether the query performed any update
    pub contains_updates: bool,
    /// Nodes created
    pub nodes_created: Int,
    /// Nodes deleted
    pub nodes_deleted: Int,
    /// Properties set
    pub properties_set: Int,
    /// Relationships created
    pub relationships_created: Int,
    /// Relationships deleted
    pub relationships_deleted: Int,
    /// Labels added
    pub labels_added: Int,
    /// Labels removed
    pub labels_removed: Int,
    /// Indexes added
    pub indexes_added: Int,
    /// Indexes removed
    pub indexes_removed: Int,
    /// Constraints added
    pub constraints_added: Int,
    /// Constraints removed
    pub constraints_removed: Int,
    /// Whether the query performed any system update
    pub contains_system_updates: bool,
    /// System updates
    pub system_updates: Int,
}

impl Counters {
    /// Whether any update was performed.
    pub fn has_updates(&self) -> bool {
        self.contains_updates || self.contains_system_updates
    }
}

/// Execution plan node (EXPLAIN).
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    /// Operator type
    pub operator_type: String,
    /// Operator arguments
    pub args: HashMap<String, Value>,
    /// Identifiers in scope
    pub identifiers: Vec<String>,
    /// Child plans
    pub children: Vec<QueryPlan>,
}

/// Execution plan node with runtime statistics (PROFILE).
#[derive(Debug, Clone, PartialEq)]
pub struct ProfiledQueryPlan {
    /// Database hits
    pub db_hits: Int,
    /// Rows produced
    pub rows: Int,
    /// Whether page cache statistics are present
    pub has_page_cache_stats: bool,
    /// Page cache hits
    pub page_cache_hits: Int,
    /// Page cache misses
    pub page_cache_misses: Int,
    /// Page cache hit ratio
    pub page_cache_hit_ratio: f64,
    /// Time spent, in microseconds
    pub time: Int,
    /// Operator type
    pub operator_type: String,
    /// Operator arguments
    pub args: HashMap<String, Value>,
    /// Identifiers in scope
    pub identifiers: Vec<String>,
    /// Child plans
    pub children: Vec<ProfiledQueryPlan>,
}

/// Notification attached to a summary.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Notification {
    /// Notification code
    pub code: String,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Severity
    pub severity: String,
    /// Position in the query text
    pub position: Option<InputPosition>,
}

/// Position in the query text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputPosition {
    /// Offset from the start of the query
    pub offset: i64,
    /// Line number (1-based)
    pub line: i64,
    /// Column number (1-based)
    pub column: i64,
}

/// The metadata bundle terminating a response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    /// Bookmarks produced by the query
    pub bookmarks: Vec<String>,
    /// Update statistics
    pub counters: Counters,
    /// Profiled execution plan, when the query was profiled
    pub profile: Option<ProfiledQueryPlan>,
    /// Execution plan, when the query was explained
    pub plan: Option<QueryPlan>,
    /// Notifications
    pub notifications: Option<Vec<Notification>>,
}

// ============================================================================
// Tests
// ============================================================================
