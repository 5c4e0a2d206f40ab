//! Query request encoding.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::{json, Map, Value as JsonValue};

use crate::driver::auth::AuthToken;
use crate::driver::config::QueryConfig;
use crate::driver::error::{DriverError, DriverResult};
use crate::driver::types::Value;
use crate::http::codec::encoder::{encode_parameters, encode_value};
use crate::http::negotiation::{ACCEPT_HEADER, QUERY_MEDIA_TYPE};

// ============================================================================
// QueryRequest
// ============================================================================

/// An encoded query request.
///
/// Exposes the negotiation headers and the JSON body; the body is built
/// on first access and cached.
#[derive(Debug)]
pub struct QueryRequest {
    auth: AuthToken,
    statement: String,
    parameters: Option<HashMap<String, Value>>,
    config: QueryConfig,
    body: OnceLock<DriverResult<JsonValue>>,
}

impl QueryRequest {
    /// Create a new request.
    pub fn new(
        auth: AuthToken,
        statement: impl Into<String>,
        parameters: Option<HashMap<String, Value>>,
        config: QueryConfig,
    ) -> Self {
        Self {
            auth,
            statement: statement.into(),
            parameters,
            config,
            body: OnceLock::new(),
        }
    }

    /// The statement text.
    pub fn statement(&self) -> &str {
        &self.statement
    }

    /// The request `Content-Type` header value.
    pub fn content_type(&self) -> &'static str {
        QUERY_MEDIA_TYPE
    }

    /// The request `Accept` header value; the streamed form is preferred.
    pub fn accept(&self) -> &'static str {
        ACCEPT_HEADER
    }

    /// The request `Authorization` header value, if any.
    pub fn authorization(&self) -> DriverResult<Option<String>> {
        self.auth.header_value()
    }

    /// The request body.
    pub fn body(&self) -> DriverResult<&JsonValue> {
        self.body
            .get_or_init(|| self.build_body())
            .as_ref()
            .map_err(|err| err.clone())
    }

    fn build_body(&self) -> DriverResult<JsonValue> {
        let mut body = Map::new();
        body.insert("statement".to_string(), json!(self.statement));
        body.insert("includeCounters".to_string(), json!(true));

        self.apply_envelope(&mut body)?;

        if let Some(parameters) = &self.parameters {
            if !parameters.is_empty() {
                let encoded = encode_parameters(parameters)?;
                body.insert(
                    "parameters".to_string(),
                    serde_json::to_value(encoded)
                        .map_err(|err| DriverError::serialization(err.to_string()))?,
                );
            }
        }

        Ok(JsonValue::Object(body))
    }

    /// Splice the transaction envelope into the body: bookmarks, access
    /// mode, impersonation, and transaction settings, each omitted when
    /// absent.
    fn apply_envelope(&self, body: &mut Map<String, JsonValue>) -> DriverResult<()> {
        if !self.config.bookmarks.is_empty() {
            let bookmarks: Vec<&str> = self
                .config
                .bookmarks
                .iter()
                .map(|bookmark| bookmark.as_str())
                .collect();
            body.insert("bookmarks".to_string(), json!(bookmarks));
        }

        if let Some(mode) = self.config.mode {
            body.insert("accessMode".to_string(), json!(mode.as_str()));
        }

        if let Some(user) = &self.config.impersonated_user {
            body.insert("impersonatedUser".to_string(), json!(user));
        }

        if let Some(tx_config) = &self.config.tx_config {
            if let Some(timeout) = tx_config.timeout {
                // Milliseconds on the wire.
                body.insert(
                    "maxExecutionTime".to_string(),
                    json!(timeout.as_millis() as u64),
                );
            }
            if !tx_config.metadata.is_empty() {
                let mut metadata = Map::new();
                for (key, value) in &tx_config.metadata {
                    metadata.insert(
                        key.clone(),
                        serde_json::to_value(encode_value(value)?)
                            .map_err(|err| DriverError::serialization(err.to_string()))?,
                    );
                }
                body.insert("txMetadata".to_string(), JsonValue::Object(metadata));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
