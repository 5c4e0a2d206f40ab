//! Tagged wire values.
//!
//! The Query API carries every value as a tagged JSON object
//! `{"$type": ..., "_value": ...}`. The tag set is closed; serde's
//! unknown-variant rejection enforces it at parse time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A tagged wire value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type", content = "_value")]
pub enum WireValue {
    /// Null value
    Null(()),
    /// Boolean value
    Boolean(bool),
    /// 64-bit integer as a decimal string
    Integer(String),
    /// Float as a decimal string
    Float(String),
    /// UTF-8 string
    String(String),
    /// Time of day, optionally with a UTC offset
    Time(String),
    /// Calendar date
    Date(String),
    /// Time of day without offset
    LocalTime(String),
    /// Date and time with offset and zone id
    ZonedDateTime(String),
    /// Date and time with offset
    OffsetDateTime(String),
    /// Date and time without offset
    LocalDateTime(String),
    /// ISO-8601 duration
    Duration(String),
    /// WKT-style spatial point
    Point(String),
    /// Base64-encoded bytes
    Base64(String),
    /// Map of string keys to wire values
    Map(HashMap<String, WireValue>),
    /// List of wire values
    List(Vec<WireValue>),
    /// Graph node
    Node(WireNode),
    /// Graph relationship
    Relationship(WireRelationship),
    /// Alternating node/relationship sequence
    Path(Vec<WireValue>),
}

impl WireValue {
    /// The wire tag.
    pub fn tag(&self) -> &'static str {
        match self {
            WireValue::Null(_) => "Null",
            WireValue::Boolean(_) => "Boolean",
            WireValue::Integer(_) => "Integer",
            WireValue::Float(_) => "Float",
            WireValue::String(_) => "String",
            WireValue::Time(_) => "Time",
            WireValue::Date(_) => "Date",
            WireValue::LocalTime(_) => "LocalTime",
            WireValue::ZonedDateTime(_) => "ZonedDateTime",
            WireValue::OffsetDateTime(_) => "OffsetDateTime",
            WireValue::LocalDateTime(_) => "LocalDateTime",
            WireValue::Duration(_) => "Duration",
            WireValue::Point(_) => "Point",
            WireValue::Base64(_) => "Base64",
            WireValue::Map(_) => "Map",
            WireValue::List(_) => "List",
            WireValue::Node(_) => "Node",
            WireValue::Relationship(_) => "Relationship",
            WireValue::Path(_) => "Path",
        }
    }

    /// Null wire value.
    pub fn null() -> Self {
        WireValue::Null(())
    }
}

/// Node payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireNode {
    /// Element id
    pub element_id: String,
    /// Labels
    pub labels: Vec<String>,
    /// Properties; omitted by the server when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, WireValue>>,
}

/// Relationship payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireRelationship {
    /// Element id
    pub element_id: String,
    /// Start node element id
    pub start_node_element_id: String,
    /// End node element id
    pub end_node_element_id: String,
    /// Relationship type
    #[serde(rename = "type")]
    pub rel_type: String,
    /// Properties; omitted by the server when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, WireValue>>,
}
