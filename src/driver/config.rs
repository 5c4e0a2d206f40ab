//! Query configuration.
//!
//! The per-query inputs the request encoder folds into the transaction
//! envelope: bookmarks, access mode, impersonation, and transaction
//! settings. Session and transaction orchestration live with the caller;
//! these types only carry their decisions to the wire.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use super::types::Value;

// ============================================================================
// AccessMode
// ============================================================================

/// Access mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    /// Read
    #[default]
    Read,
    /// Write
    Write,
}

impl AccessMode {
    /// The wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::Read => "READ",
            AccessMode::Write => "WRITE",
        }
    }
}

// ============================================================================
// Bookmark
// ============================================================================

/// Causal consistency bookmark.
///
/// An opaque token the server hands out with each summary; sending it
/// back makes the next query wait for the state it names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bookmark(String);

impl Bookmark {
    /// Wrap a raw bookmark token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap the raw token.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Bookmark {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Bookmark {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Bookmark {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

// ============================================================================
// TransactionConfig
// ============================================================================

/// Transaction settings forwarded in the request envelope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionConfig {
    /// Server-side execution timeout
    pub timeout: Option<Duration>,
    /// Metadata attached to the transaction
    pub metadata: HashMap<String, Value>,
}

impl TransactionConfig {
    /// Create empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server-side execution timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replace the metadata map.
    pub fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Whether these settings would add nothing to the envelope.
    pub fn is_empty(&self) -> bool {
        self.timeout.is_none() && self.metadata.is_empty()
    }
}

// ============================================================================
// QueryConfig
// ============================================================================

/// Per-query configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryConfig {
    /// Bookmarks to wait for
    pub bookmarks: Vec<Bookmark>,
    /// Transaction settings
    pub tx_config: Option<TransactionConfig>,
    /// Access mode hint
    pub mode: Option<AccessMode>,
    /// User to impersonate
    pub impersonated_user: Option<String>,
}

impl QueryConfig {
    /// Create a new configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bookmarks.
    pub fn with_bookmarks(mut self, bookmarks: Vec<Bookmark>) -> Self {
        self.bookmarks = bookmarks;
        self
    }

    /// Add a bookmark.
    pub fn with_bookmark(mut self, bookmark: impl Into<Bookmark>) -> Self {
        self.bookmarks.push(bookmark.into());
        self
    }

    /// Set the transaction settings.
    pub fn with_tx_config(mut self, tx_config: TransactionConfig) -> Self {
        self.tx_config = Some(tx_config);
        self
    }

    /// Set the access mode.
    pub fn with_mode(mut self, mode: AccessMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the impersonated user.
    pub fn with_impersonated_user(mut self, user: impl Into<String>) -> Self {
        self.impersonated_user = Some(user.into());
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
