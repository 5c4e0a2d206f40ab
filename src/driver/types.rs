//! Driver types.
//!
//! The caller-facing graph value model shared by parameters and results.

use std::collections::HashMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::error::{DriverError, DriverResult};

// ============================================================================
// Int - policy-typed integer
// ============================================================================

/// An integer decoded under the session's integer policy.
///
/// The wire carries integers as decimal strings to preserve the full
/// 64-bit range; the active [`IntegerPolicy`](crate::http::codec::IntegerPolicy)
/// decides which representation the caller receives.
#[derive(Debug, Clone, PartialEq)]
pub enum Int {
    /// 64-bit integer (default policy)
    Lossless(i64),
    /// Wide integer, covers the entire wire range
    Big(i128),
    /// Double-precision float
    Number(f64),
}

impl Int {
    /// The value as `i64`, when exactly representable.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Int::Lossless(i) => Some(*i),
            Int::Big(i) => i64::try_from(*i).ok(),
            Int::Number(n) => {
                if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n <= i64::MAX as f64 {
                    Some(*n as i64)
                } else {
                    None
                }
            }
        }
    }

    /// The value as `f64` (lossy for large integers).
    pub fn as_f64(&self) -> f64 {
        match self {
            Int::Lossless(i) => *i as f64,
            Int::Big(i) => *i as f64,
            Int::Number(n) => *n,
        }
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Int::Lossless(i) => write!(f, "{}", i),
            Int::Big(i) => write!(f, "{}", i),
            Int::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<i64> for Int {
    fn from(v: i64) -> Self {
        Int::Lossless(v)
    }
}

impl From<i32> for Int {
    fn from(v: i32) -> Self {
        Int::Lossless(v as i64)
    }
}

// ============================================================================
// Value - graph value
// ============================================================================

/// Graph value type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null
    Null,
    /// Boolean
    Boolean(bool),
    /// Integer under the active integer policy
    Integer(Int),
    /// Float (f64)
    Float(f64),
    /// String
    String(String),
    /// Bytes
    Bytes(Vec<u8>),
    /// List
    List(Vec<Value>),
    /// Map
    Map(HashMap<String, Value>),
    /// Node
    Node(Node),
    /// Relationship
    Relationship(Relationship),
    /// Path
    Path(Path),
    /// Point (2D/3D)
    Point(Point),
    /// Date
    Date(NaiveDate),
    /// Time with UTC offset
    Time(OffsetTime),
    /// LocalTime
    LocalTime(NaiveTime),
    /// DateTime with UTC offset and/or zone id
    DateTime(DateTime),
    /// LocalDateTime
    LocalDateTime(NaiveDateTime),
    /// Duration
    Duration(Duration),
    /// Placeholder for a value that failed to decode; raises the original
    /// protocol error on typed access
    Broken(BrokenValue),
}

impl Value {
    /// Whether this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The value as boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as `i64`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => i.as_i64(),
            _ => None,
        }
    }

    /// The value as `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(i.as_f64()),
            _ => None,
        }
    }

    /// The value as string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The value as byte slice.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// The value as list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// The value as map.
    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// The value as node.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(n) => Some(n),
            _ => None,
        }
    }

    /// The value as relationship.
    pub fn as_relationship(&self) -> Option<&Relationship> {
        match self {
            Value::Relationship(r) => Some(r),
            _ => None,
        }
    }

    /// The value as path.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }

    /// The type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
            Value::Node(_) => "Node",
            Value::Relationship(_) => "Relationship",
            Value::Path(_) => "Path",
            Value::Point(_) => "Point",
            Value::Date(_) => "Date",
            Value::Time(_) => "Time",
            Value::LocalTime(_) => "LocalTime",
            Value::DateTime(_) => "DateTime",
            Value::LocalDateTime(_) => "LocalDateTime",
            Value::Duration(_) => "Duration",
            Value::Broken(_) => "Broken",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Value::List(l) => write!(f, "[{} items]", l.len()),
            Value::Map(m) => write!(f, "{{{} entries}}", m.len()),
            Value::Node(n) => write!(f, "{}", n),
            Value::Relationship(r) => write!(f, "{}", r),
            Value::Path(p) => write!(f, "{}", p),
            Value::Point(p) => write!(f, "{}", p),
            Value::Date(d) => write!(f, "{}", d),
            Value::Time(t) => write!(f, "{}", t),
            Value::LocalTime(t) => write!(f, "{}", t),
            Value::DateTime(dt) => write!(f, "{}", dt),
            Value::LocalDateTime(dt) => write!(f, "{}", dt),
            Value::Duration(d) => write!(f, "{}", d),
            Value::Broken(b) => write!(f, "{}", b),
        }
    }
}

// From implementations
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(Int::Lossless(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(Int::Lossless(v as i64))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Int> for Value {
    fn from(v: Int) -> Self {
        Value::Integer(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

// ============================================================================
// Node - graph node
// ============================================================================

/// Graph node.
///
/// This API identifies entities by element id only; there is no numeric
/// identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Element id
    pub element_id: String,
    /// Labels
    pub labels: Vec<String>,
    /// Properties
    pub properties: HashMap<String, Value>,
}

impl Node {
    /// Create a new node.
    pub fn new(
        element_id: impl Into<String>,
        labels: Vec<String>,
        properties: HashMap<String, Value>,
    ) -> Self {
        Self {
            element_id: element_id.into(),
            labels,
            properties,
        }
    }

    /// Whether the node carries a label.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Get a property.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Get a property converted to a concrete type.
    pub fn get_as<T: TryFrom<Value, Error = DriverError>>(&self, key: &str) -> DriverResult<T> {
        self.properties
            .get(key)
            .cloned()
            .ok_or_else(|| DriverError::type_conversion(format!("Property '{}' not found", key)))
            .and_then(|v| T::try_from(v))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = if self.labels.is_empty() {
            String::new()
        } else {
            format!(":{}", self.labels.join(":"))
        };
        write!(f, "({}{})", self.element_id, labels)
    }
}

// ============================================================================
// Relationship - graph relationship
// ============================================================================

/// Graph relationship.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    /// Element id
    pub element_id: String,
    /// Start node element id
    pub start_node_element_id: String,
    /// End node element id
    pub end_node_element_id: String,
    /// Type
    pub rel_type: String,
    /// Properties
    pub properties: HashMap<String, Value>,
}

impl Relationship {
    /// Create a new relationship.
    pub fn new(
        element_id: impl Into<String>,
        start_node_element_id: impl Into<String>,
        end_node_element_id: impl Into<String>,
        rel_type: impl Into<String>,
        properties: HashMap<String, Value>,
    ) -> Self {
        Self {
            element_id: element_id.into(),
            start_node_element_id: start_node_element_id.into(),
            end_node_element_id: end_node_element_id.into(),
            rel_type: rel_type.into(),
            properties,
        }
    }

    /// Get a property.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({})-[:{}]->({})",
            self.start_node_element_id, self.rel_type, self.end_node_element_id
        )
    }
}

// ============================================================================
// Path - graph path
// ============================================================================

/// Graph path.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Nodes, in traversal order
    pub nodes: Vec<Node>,
    /// Relationships, in traversal order
    pub relationships: Vec<Relationship>,
}

/// One step of a path: `(start)-[relationship]-(end)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment<'a> {
    /// Segment start node
    pub start: &'a Node,
    /// Segment relationship
    pub relationship: &'a Relationship,
    /// Segment end node
    pub end: &'a Node,
}

impl Path {
    /// Create a new path.
    pub fn new(nodes: Vec<Node>, relationships: Vec<Relationship>) -> Self {
        Self {
            nodes,
            relationships,
        }
    }

    /// Path length (number of relationships).
    pub fn len(&self) -> usize {
        self.relationships.len()
    }

    /// Whether the path has no relationships.
    pub fn is_empty(&self) -> bool {
        self.relationships.is_empty()
    }

    /// Start node.
    pub fn start(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// End node.
    pub fn end(&self) -> Option<&Node> {
        self.nodes.last()
    }

    /// The path as `(start, relationship, end)` segments.
    pub fn segments(&self) -> impl Iterator<Item = PathSegment<'_>> {
        self.relationships
            .iter()
            .enumerate()
            .filter_map(move |(i, rel)| {
                Some(PathSegment {
                    start: self.nodes.get(i)?,
                    relationship: rel,
                    end: self.nodes.get(i + 1)?,
                })
            })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Path: {} nodes, {} rels>",
            self.nodes.len(),
            self.relationships.len()
        )
    }
}

// ============================================================================
// Point - spatial coordinate
// ============================================================================

/// Spatial coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// SRID (spatial reference id)
    pub srid: i32,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate (3D points only)
    pub z: Option<f64>,
}

impl Point {
    /// Create a 2D point.
    pub fn new_2d(srid: i32, x: f64, y: f64) -> Self {
        Self { srid, x, y, z: None }
    }

    /// Create a 3D point.
    pub fn new_3d(srid: i32, x: f64, y: f64, z: f64) -> Self {
        Self {
            srid,
            x,
            y,
            z: Some(z),
        }
    }

    /// WGS84 2D point (longitude, latitude).
    pub fn wgs84_2d(longitude: f64, latitude: f64) -> Self {
        Self::new_2d(4326, longitude, latitude)
    }

    /// Cartesian 2D point.
    pub fn cartesian_2d(x: f64, y: f64) -> Self {
        Self::new_2d(7203, x, y)
    }

    /// Whether the point is 3D.
    pub fn is_3d(&self) -> bool {
        self.z.is_some()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.z {
            Some(z) => write!(
                f,
                "Point(srid={}, x={}, y={}, z={})",
                self.srid, self.x, self.y, z
            ),
            None => write!(f, "Point(srid={}, x={}, y={})", self.srid, self.x, self.y),
        }
    }
}

// ============================================================================
// Duration - time interval
// ============================================================================

/// Time interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Duration {
    /// Months
    pub months: i64,
    /// Days
    pub days: i64,
    /// Seconds
    pub seconds: i64,
    /// Nanoseconds
    pub nanoseconds: i32,
}

impl Duration {
    /// Create a new duration.
    pub fn new(months: i64, days: i64, seconds: i64, nanoseconds: i32) -> Self {
        Self {
            months,
            days,
            seconds,
            nanoseconds,
        }
    }

    /// Duration of whole seconds.
    pub fn from_seconds(seconds: i64) -> Self {
        Self::new(0, 0, seconds, 0)
    }

    /// Duration of whole days.
    pub fn from_days(days: i64) -> Self {
        Self::new(0, days, 0, 0)
    }

    /// Duration of whole months.
    pub fn from_months(months: i64) -> Self {
        Self::new(months, 0, 0, 0)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}M{}DT{}", self.months, self.days, self.seconds)?;
        if self.nanoseconds != 0 {
            let frac = format!("{:09}", self.nanoseconds);
            write!(f, ".{}", frac.trim_end_matches('0'))?;
        }
        write!(f, "S")
    }
}

// ============================================================================
// OffsetTime - time of day with UTC offset
// ============================================================================

/// Time of day with a UTC offset.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetTime {
    /// Time of day
    pub time: NaiveTime,
    /// UTC offset in seconds
    pub offset_seconds: i32,
}

impl OffsetTime {
    /// Create a new offset time.
    pub fn new(time: NaiveTime, offset_seconds: i32) -> Self {
        Self {
            time,
            offset_seconds,
        }
    }
}

impl fmt::Display for OffsetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.time.format("%H:%M:%S%.f"),
            format_offset(self.offset_seconds)
        )
    }
}

// ============================================================================
// DateTime - date and time with UTC offset and/or zone id
// ============================================================================

/// Date and time with an optional UTC offset and optional zone id.
///
/// A `DateTime` used as a parameter must carry an offset; without one the
/// wall-clock instant is ambiguous and the encoder rejects it.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTime {
    /// Date and time of day
    pub datetime: NaiveDateTime,
    /// UTC offset in seconds
    pub offset_seconds: Option<i32>,
    /// Named time zone id (e.g. `Europe/Stockholm`)
    pub zone_id: Option<String>,
}

impl DateTime {
    /// Create a new date-time.
    pub fn new(
        datetime: NaiveDateTime,
        offset_seconds: Option<i32>,
        zone_id: Option<String>,
    ) -> Self {
        Self {
            datetime,
            offset_seconds,
            zone_id,
        }
    }

    /// Date-time pinned to a UTC offset.
    pub fn with_offset(datetime: NaiveDateTime, offset_seconds: i32) -> Self {
        Self::new(datetime, Some(offset_seconds), None)
    }

    /// Date-time pinned to an offset within a named zone.
    pub fn with_zone(
        datetime: NaiveDateTime,
        offset_seconds: Option<i32>,
        zone_id: impl Into<String>,
    ) -> Self {
        Self::new(datetime, offset_seconds, Some(zone_id.into()))
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.datetime.format("%Y-%m-%dT%H:%M:%S%.f"))?;
        if let Some(offset) = self.offset_seconds {
            write!(f, "{}", format_offset(offset))?;
        }
        if let Some(zone) = &self.zone_id {
            write!(f, "[{}]", zone)?;
        }
        Ok(())
    }
}

/// Format a UTC offset as `Z` or `±HH:MM`.
pub(crate) fn format_offset(offset_seconds: i32) -> String {
    if offset_seconds == 0 {
        return "Z".to_string();
    }
    let sign = if offset_seconds < 0 { '-' } else { '+' };
    let abs = offset_seconds.unsigned_abs();
    format!("{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

// ============================================================================
// BrokenValue - deferred decode failure
// ============================================================================

/// A value whose wire payload failed to decode.
///
/// Carrying the failure instead of raising it keeps one malformed value
/// from poisoning the rest of its record; the original protocol error
/// surfaces on the first typed access.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenValue {
    message: String,
}

impl BrokenValue {
    /// Create a broken value from the failure message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The original failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The failure as a protocol error.
    pub fn to_error(&self) -> DriverError {
        DriverError::protocol(self.message.clone())
    }
}

impl fmt::Display for BrokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<broken: {}>", self.message)
    }
}

// ============================================================================
// TryFrom implementations
// ============================================================================

macro_rules! try_from_value {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl TryFrom<Value> for $ty {
            type Error = DriverError;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::$variant(v) => Ok(v),
                    Value::Broken(b) => Err(b.to_error()),
                    _ => Err(DriverError::type_conversion(format!(
                        "Cannot convert {} to {}",
                        value.type_name(),
                        $name
                    ))),
                }
            }
        }
    };
}

try_from_value!(bool, Boolean, "bool");
try_from_value!(String, String, "String");
try_from_value!(Vec<u8>, Bytes, "bytes");
try_from_value!(Node, Node, "Node");
try_from_value!(Relationship, Relationship, "Relationship");
try_from_value!(Path, Path, "Path");
try_from_value!(Point, Point, "Point");
try_from_value!(Duration, Duration, "Duration");
try_from_value!(OffsetTime, Time, "Time");
try_from_value!(DateTime, DateTime, "DateTime");

impl TryFrom<Value> for i64 {
    type Error = DriverError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Integer(i) => i.as_i64().ok_or_else(|| {
                DriverError::type_conversion("Integer does not fit in i64".to_string())
            }),
            Value::Broken(b) => Err(b.to_error()),
            _ => Err(DriverError::type_conversion(format!(
                "Cannot convert {} to i64",
                value.type_name()
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = DriverError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Integer(i) => Ok(i.as_f64()),
            Value::Broken(b) => Err(b.to_error()),
            _ => Err(DriverError::type_conversion(format!(
                "Cannot convert {} to f64",
                value.type_name()
            ))),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_types() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Boolean(true).as_bool(), Some(true));
        assert_eq!(Value::from(42i64).as_int(), Some(42));
        assert_eq!(Value::Float(3.14).as_float(), Some(3.14));
        assert_eq!(Value::String("hello".into()).as_str(), Some("hello"));
        assert_eq!(Value::Bytes(vec![1, 2]).as_bytes(), Some(&[1u8, 2][..]));
    }

    #[test]
    fn test_int_representations() {
        assert_eq!(Int::Lossless(42).as_i64(), Some(42));
        assert_eq!(Int::Big(42).as_i64(), Some(42));
        assert_eq!(Int::Number(42.0).as_i64(), Some(42));
        assert_eq!(Int::Number(4.5).as_i64(), None);
        assert_eq!(Int::Big(i64::MAX as i128 + 1).as_i64(), None);

        assert_eq!(Int::Lossless(42).to_string(), "42");
        assert_eq!(Int::Big(-9).to_string(), "-9");
        assert_eq!(Int::Number(42.0).to_string(), "42");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::from(42i64).to_string(), "42");
        assert_eq!(Value::String("hello".into()).to_string(), "\"hello\"");
    }

    #[test]
    fn test_value_from() {
        let v: Value = true.into();
        assert_eq!(v, Value::Boolean(true));

        let v: Value = 42i64.into();
        assert_eq!(v, Value::Integer(Int::Lossless(42)));

        let v: Value = vec![1i64, 2].into();
        assert_eq!(
            v,
            Value::List(vec![Value::from(1i64), Value::from(2i64)])
        );

        let v: Value = Option::<i64>::None.into();
        assert_eq!(v, Value::Null);
    }

    #[test]
    fn test_value_try_from() {
        assert!(bool::try_from(Value::Boolean(true)).unwrap());
        assert_eq!(i64::try_from(Value::from(42i64)).unwrap(), 42);
        assert_eq!(f64::try_from(Value::from(42i64)).unwrap(), 42.0);
        assert_eq!(String::try_from(Value::from("hi")).unwrap(), "hi");
        assert!(i64::try_from(Value::Null).is_err());
    }

    #[test]
    fn test_node() {
        let mut props = HashMap::new();
        props.insert("name".into(), Value::String("Alice".into()));

        let node = Node::new("4:abc:1", vec!["Person".into()], props);

        assert!(node.has_label("Person"));
        assert!(!node.has_label("Company"));
        assert_eq!(node.get("name"), Some(&Value::String("Alice".into())));
        assert_eq!(node.to_string(), "(4:abc:1:Person)");
    }

    #[test]
    fn test_relationship() {
        let rel = Relationship::new("5:abc:9", "4:abc:1", "4:abc:2", "KNOWS", HashMap::new());
        assert_eq!(rel.rel_type, "KNOWS");
        assert_eq!(rel.to_string(), "(4:abc:1)-[:KNOWS]->(4:abc:2)");
    }

    #[test]
    fn test_path_segments() {
        let n1 = Node::new("n1", vec![], HashMap::new());
        let n2 = Node::new("n2", vec![], HashMap::new());
        let n3 = Node::new("n3", vec![], HashMap::new());
        let r1 = Relationship::new("r1", "n1", "n2", "KNOWS", HashMap::new());
        let r2 = Relationship::new("r2", "n2", "n3", "KNOWS", HashMap::new());

        let path = Path::new(vec![n1, n2, n3], vec![r1, r2]);
        assert_eq!(path.len(), 2);
        assert_eq!(path.start().unwrap().element_id, "n1");
        assert_eq!(path.end().unwrap().element_id, "n3");

        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start.element_id, "n1");
        assert_eq!(segments[0].relationship.element_id, "r1");
        assert_eq!(segments[0].end.element_id, "n2");
        assert_eq!(segments[1].start.element_id, "n2");
        assert_eq!(segments[1].end.element_id, "n3");
    }

    #[test]
    fn test_point() {
        let p = Point::wgs84_2d(-122.3321, 47.6062);
        assert_eq!(p.srid, 4326);
        assert!(!p.is_3d());

        let p = Point::new_3d(4979, 1.0, 2.0, 3.0);
        assert!(p.is_3d());
    }

    #[test]
    fn test_duration_display() {
        assert_eq!(Duration::new(0, 14, 58320, 0).to_string(), "P0M14DT58320S");
        assert_eq!(
            Duration::new(1, 2, 3, 500_000_000).to_string(),
            "P1M2DT3.5S"
        );
    }

    #[test]
    fn test_offset_time_display() {
        let t = OffsetTime::new(
            NaiveTime::from_hms_nano_opt(12, 50, 35, 556_000_000).unwrap(),
            3600,
        );
        assert_eq!(t.to_string(), "12:50:35.556+01:00");

        let t = OffsetTime::new(NaiveTime::from_hms_opt(1, 2, 3).unwrap(), 0);
        assert_eq!(t.to_string(), "01:02:03Z");
    }

    #[test]
    fn test_date_time_display() {
        let ndt = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();

        let dt = DateTime::with_offset(ndt, -5 * 3600);
        assert_eq!(dt.to_string(), "2024-06-01T08:30:00-05:00");

        let dt = DateTime::with_zone(ndt, Some(7200), "Europe/Stockholm");
        assert_eq!(dt.to_string(), "2024-06-01T08:30:00+02:00[Europe/Stockholm]");
    }

    #[test]
    fn test_broken_value_access() {
        let broken = Value::Broken(BrokenValue::new("Invalid point payload"));
        assert_eq!(broken.type_name(), "Broken");

        let err = Point::try_from(broken).unwrap_err();
        assert_eq!(err, DriverError::protocol("Invalid point payload"));
    }
}
