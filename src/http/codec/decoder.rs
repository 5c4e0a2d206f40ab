//! Wire value decoding.

use std::collections::HashMap;

use super::integers::IntegerPolicy;
use super::scalars;
use super::wire::{WireNode, WireRelationship, WireValue};
use crate::driver::error::{DriverError, DriverResult};
use crate::driver::record::Record;
use crate::driver::types::{
    BrokenValue, DateTime, Node, OffsetTime, Path, Relationship, Value,
};
use crate::http::message::metadata::{
    CounterTotals, Counters, PlanBody, ProfiledQueryPlan, QueryPlan, ResultSummary, SummaryBody,
};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Decoder from tagged wire values to rich values.
///
/// The integer policy is captured once at construction and applied to
/// every integer-valued field the decoder produces.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueDecoder {
    policy: IntegerPolicy,
}

impl ValueDecoder {
    /// Create a decoder with the given integer policy.
    pub fn new(policy: IntegerPolicy) -> Self {
        Self { policy }
    }

    /// The active integer policy.
    pub fn policy(&self) -> IntegerPolicy {
        self.policy
    }

    /// Decode one wire value.
    pub fn decode_value(&self, wire: &WireValue) -> DriverResult<Value> {
        match wire {
            WireValue::Null(()) => Ok(Value::Null),
            WireValue::Boolean(b) => Ok(Value::Boolean(*b)),
            WireValue::Integer(text) => Ok(Value::Integer(self.policy.parse(text)?)),
            WireValue::Float(text) => text.parse().map(Value::Float).map_err(|_| {
                DriverError::protocol(format!("Invalid Float payload '{}'", text))
            }),
            WireValue::String(s) => Ok(Value::String(s.clone())),
            WireValue::Time(text) => {
                let (time, offset) = scalars::parse_time(text)?;
                Ok(match offset {
                    Some(offset) => Value::Time(OffsetTime::new(time, offset)),
                    None => Value::LocalTime(time),
                })
            }
            WireValue::Date(text) => Ok(Value::Date(scalars::parse_date(text)?)),
            WireValue::LocalTime(text) => Ok(Value::LocalTime(scalars::parse_local_time(text)?)),
            WireValue::ZonedDateTime(text) => {
                let (datetime, offset, zone) = scalars::parse_zoned_date_time(text)?;
                Ok(Value::DateTime(DateTime::with_zone(datetime, offset, zone)))
            }
            WireValue::OffsetDateTime(text) => {
                let (datetime, offset) = scalars::parse_offset_date_time(text)?;
                // The encoder never elides the offset, but a payload
                // without one still has a well-defined local reading.
                Ok(match offset {
                    Some(offset) => Value::DateTime(DateTime::with_offset(datetime, offset)),
                    None => Value::LocalDateTime(datetime),
                })
            }
            WireValue::LocalDateTime(text) => {
                Ok(Value::LocalDateTime(scalars::parse_local_date_time(text)?))
            }
            WireValue::Duration(text) => Ok(Value::Duration(scalars::parse_duration(text)?)),
            WireValue::Point(text) => Ok(match scalars::parse_point(text) {
                Ok(point) => Value::Point(point),
                // Defer the failure so one bad point cannot poison the
                // rest of its record.
                Err(err) => Value::Broken(BrokenValue::new(err.to_string())),
            }),
            WireValue::Base64(text) => STANDARD
                .decode(text)
                .map(Value::Bytes)
                .map_err(|_| DriverError::protocol(format!("Invalid Base64 payload '{}'", text))),
            WireValue::Map(entries) => {
                let mut map = HashMap::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(key.clone(), self.decode_value(value)?);
                }
                Ok(Value::Map(map))
            }
            WireValue::List(items) => {
                let values = items
                    .iter()
                    .map(|item| self.decode_value(item))
                    .collect::<DriverResult<Vec<_>>>()?;
                Ok(Value::List(values))
            }
            WireValue::Node(node) => Ok(Value::Node(self.decode_node(node)?)),
            WireValue::Relationship(rel) => {
                Ok(Value::Relationship(self.decode_relationship(rel)?))
            }
            WireValue::Path(elements) => Ok(Value::Path(self.decode_path(elements)?)),
        }
    }

    /// Decode a row of wire values into a record sharing the response's
    /// field names.
    pub fn decode_row(
        &self,
        row: &[WireValue],
        keys: &std::sync::Arc<[String]>,
    ) -> DriverResult<Record> {
        let values = row
            .iter()
            .map(|value| self.decode_value(value))
            .collect::<DriverResult<Vec<_>>>()?;
        Ok(Record::new(std::sync::Arc::clone(keys), values))
    }

    fn decode_properties(
        &self,
        properties: Option<&HashMap<String, WireValue>>,
    ) -> DriverResult<HashMap<String, Value>> {
        let Some(properties) = properties else {
            return Ok(HashMap::new());
        };
        let mut map = HashMap::with_capacity(properties.len());
        for (key, value) in properties {
            map.insert(key.clone(), self.decode_value(value)?);
        }
        Ok(map)
    }

    fn decode_node(&self, node: &WireNode) -> DriverResult<Node> {
        Ok(Node::new(
            node.element_id.clone(),
            node.labels.clone(),
            self.decode_properties(node.properties.as_ref())?,
        ))
    }

    fn decode_relationship(&self, rel: &WireRelationship) -> DriverResult<Relationship> {
        Ok(Relationship::new(
            rel.element_id.clone(),
            rel.start_node_element_id.clone(),
            rel.end_node_element_id.clone(),
            rel.rel_type.clone(),
            self.decode_properties(rel.properties.as_ref())?,
        ))
    }

    /// Decode an alternating node/relationship sequence into a path.
    fn decode_path(&self, elements: &[WireValue]) -> DriverResult<Path> {
        if elements.is_empty() || elements.len() % 2 == 0 {
            return Err(DriverError::protocol(format!(
                "Path payload must alternate nodes and relationships with odd length, got {}",
                elements.len()
            )));
        }

        let mut nodes = Vec::with_capacity(elements.len() / 2 + 1);
        let mut relationships = Vec::with_capacity(elements.len() / 2);
        for (index, element) in elements.iter().enumerate() {
            match (index % 2, element) {
                (0, WireValue::Node(node)) => nodes.push(self.decode_node(node)?),
                (1, WireValue::Relationship(rel)) => {
                    relationships.push(self.decode_relationship(rel)?)
                }
                _ => {
                    return Err(DriverError::protocol(format!(
                        "Unexpected {} at path position {}",
                        element.tag(),
                        index
                    )))
                }
            }
        }

        Ok(Path::new(nodes, relationships))
    }

    /// Decode update counters, coercing every numeric field through the
    /// integer policy.
    pub fn decode_stats(&self, totals: &CounterTotals) -> Counters {
        Counters {
            contains_updates: totals.contains_updates,
            nodes_created: self.policy.from_i64(totals.nodes_created),
            nodes_deleted: self.policy.from_i64(totals.nodes_deleted),
            properties_set: self.policy.from_i64(totals.properties_set),
            relationships_created: self.policy.from_i64(totals.relationships_created),
            relationships_deleted: self.policy.from_i64(totals.relationships_deleted),
            labels_added: self.policy.from_i64(totals.labels_added),
            labels_removed: self.policy.from_i64(totals.labels_removed),
            indexes_added: self.policy.from_i64(totals.indexes_added),
            indexes_removed: self.policy.from_i64(totals.indexes_removed),
            constraints_added: self.policy.from_i64(totals.constraints_added),
            constraints_removed: self.policy.from_i64(totals.constraints_removed),
            contains_system_updates: totals.contains_system_updates,
            system_updates: self.policy.from_i64(totals.system_updates),
        }
    }

    /// Decode an execution plan; argument values pass through the value
    /// decoder.
    pub fn decode_plan(&self, body: &PlanBody) -> DriverResult<QueryPlan> {
        Ok(QueryPlan {
            operator_type: body.operator_type.clone(),
            args: self.decode_args(&body.arguments)?,
            identifiers: body.identifiers.clone(),
            children: body
                .children
                .iter()
                .map(|child| self.decode_plan(child))
                .collect::<DriverResult<Vec<_>>>()?,
        })
    }

    /// Decode a profiled execution plan.
    pub fn decode_profile(&self, body: &PlanBody) -> DriverResult<ProfiledQueryPlan> {
        Ok(ProfiledQueryPlan {
            db_hits: self.policy.from_i64(body.db_hits),
            rows: self.policy.from_i64(body.records),
            has_page_cache_stats: body.has_page_cache_stats,
            page_cache_hits: self.policy.from_i64(body.page_cache_hits),
            page_cache_misses: self.policy.from_i64(body.page_cache_misses),
            page_cache_hit_ratio: body.page_cache_hit_ratio,
            time: self.policy.from_i64(body.time),
            operator_type: body.operator_type.clone(),
            args: self.decode_args(&body.arguments)?,
            identifiers: body.identifiers.clone(),
            children: body
                .children
                .iter()
                .map(|child| self.decode_profile(child))
                .collect::<DriverResult<Vec<_>>>()?,
        })
    }

    /// Decode a summary body into the caller-facing metadata bundle.
    pub fn decode_summary(&self, body: &SummaryBody) -> DriverResult<ResultSummary> {
        let counters = body.counters.clone().unwrap_or_default();
        Ok(ResultSummary {
            bookmarks: body.bookmarks.clone().unwrap_or_default(),
            counters: self.decode_stats(&counters),
            profile: body
                .profiled_query_plan
                .as_ref()
                .map(|plan| self.decode_profile(plan))
                .transpose()?,
            plan: body
                .query_plan
                .as_ref()
                .map(|plan| self.decode_plan(plan))
                .transpose()?,
            notifications: body.notifications.clone(),
        })
    }

    fn decode_args(
        &self,
        arguments: &HashMap<String, WireValue>,
    ) -> DriverResult<HashMap<String, Value>> {
        let mut args = HashMap::with_capacity(arguments.len());
        for (key, value) in arguments {
            args.insert(key.clone(), self.decode_value(value)?);
        }
        Ok(args)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::types::{Duration, Int, Point};
    use chrono::NaiveTime;

    fn decoder() -> ValueDecoder {
        ValueDecoder::new(IntegerPolicy::Lossless)
    }

    fn wire(json: &str) -> WireValue {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_decode_scalars() {
        let d = decoder();

        assert_eq!(d.decode_value(&WireValue::null()).unwrap(), Value::Null);
        assert_eq!(
            d.decode_value(&WireValue::Boolean(true)).unwrap(),
            Value::Boolean(true)
        );
        assert_eq!(
            d.decode_value(&WireValue::Integer("42".into())).unwrap(),
            Value::Integer(Int::Lossless(42))
        );
        assert_eq!(
            d.decode_value(&WireValue::Float("1.5".into())).unwrap(),
            Value::Float(1.5)
        );
        assert_eq!(
            d.decode_value(&WireValue::String("hi".into())).unwrap(),
            Value::String("hi".into())
        );
    }

    #[test]
    fn test_decode_float_special() {
        let d = decoder();
        assert_eq!(
            d.decode_value(&WireValue::Float("Infinity".into())).unwrap(),
            Value::Float(f64::INFINITY)
        );
        match d.decode_value(&WireValue::Float("NaN".into())).unwrap() {
            Value::Float(f) => assert!(f.is_nan()),
            other => panic!("expected float, got {:?}", other),
        }
        assert!(d.decode_value(&WireValue::Float("pi".into())).is_err());
    }

    #[test]
    fn test_decode_duration() {
        // P14DT16H12M -> 14 days, 16h12m of seconds
        let value = decoder()
            .decode_value(&wire(r#"{"$type":"Duration","_value":"P14DT16H12M"}"#))
            .unwrap();
        assert_eq!(value, Value::Duration(Duration::new(0, 14, 58320, 0)));
    }

    #[test]
    fn test_decode_time_with_offset() {
        let value = decoder()
            .decode_value(&wire(r#"{"$type":"Time","_value":"12:50:35.556+01:00"}"#))
            .unwrap();
        match value {
            Value::Time(t) => {
                assert_eq!(
                    t.time,
                    NaiveTime::from_hms_nano_opt(12, 50, 35, 556_000_000).unwrap()
                );
                assert_eq!(t.offset_seconds, 3600);
            }
            other => panic!("expected time, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_time_without_offset_is_local() {
        let value = decoder()
            .decode_value(&wire(r#"{"$type":"Time","_value":"12:50:35"}"#))
            .unwrap();
        assert_eq!(
            value,
            Value::LocalTime(NaiveTime::from_hms_opt(12, 50, 35).unwrap())
        );
    }

    #[test]
    fn test_decode_offset_date_time_fallback() {
        let d = decoder();

        let value = d
            .decode_value(&wire(
                r#"{"$type":"OffsetDateTime","_value":"2024-06-01T08:30:00+02:00"}"#,
            ))
            .unwrap();
        match value {
            Value::DateTime(dt) => {
                assert_eq!(dt.offset_seconds, Some(7200));
                assert_eq!(dt.zone_id, None);
            }
            other => panic!("expected date-time, got {:?}", other),
        }

        // Without an offset the payload reads as a local date-time.
        let value = d
            .decode_value(&wire(
                r#"{"$type":"OffsetDateTime","_value":"2024-06-01T08:30:00"}"#,
            ))
            .unwrap();
        assert!(matches!(value, Value::LocalDateTime(_)));
    }

    #[test]
    fn test_decode_zoned_date_time() {
        let value = decoder()
            .decode_value(&wire(
                r#"{"$type":"ZonedDateTime","_value":"2024-06-01T08:30:00+02:00[Europe/Stockholm]"}"#,
            ))
            .unwrap();
        match value {
            Value::DateTime(dt) => {
                assert_eq!(dt.offset_seconds, Some(7200));
                assert_eq!(dt.zone_id.as_deref(), Some("Europe/Stockholm"));
            }
            other => panic!("expected date-time, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_point() {
        let value = decoder()
            .decode_value(&wire(
                r#"{"$type":"Point","_value":"SRID=4326;POINT Z (1.5 2.5 3.5)"}"#,
            ))
            .unwrap();
        assert_eq!(value, Value::Point(Point::new_3d(4326, 1.5, 2.5, 3.5)));
    }

    #[test]
    fn test_decode_broken_point_defers_error() {
        let d = decoder();
        let value = d
            .decode_value(&wire(r#"{"$type":"Point","_value":"SRID=4326;CIRCLE (1 2)"}"#))
            .unwrap();

        // Decoding succeeds; the failure surfaces on typed access.
        match &value {
            Value::Broken(broken) => assert!(broken.message().contains("Point")),
            other => panic!("expected broken value, got {:?}", other),
        }
        assert!(Point::try_from(value).is_err());
    }

    #[test]
    fn test_decode_base64() {
        let value = decoder()
            .decode_value(&wire(r#"{"$type":"Base64","_value":"AQID"}"#))
            .unwrap();
        assert_eq!(value, Value::Bytes(vec![1, 2, 3]));

        assert!(decoder()
            .decode_value(&wire(r#"{"$type":"Base64","_value":"!!"}"#))
            .is_err());
    }

    #[test]
    fn test_decode_collections() {
        let value = decoder()
            .decode_value(&wire(
                r#"{"$type":"List","_value":[
                    {"$type":"Integer","_value":"1"},
                    {"$type":"Map","_value":{"s":{"$type":"String","_value":"x"}}}
                ]}"#,
            ))
            .unwrap();

        let list = value.as_list().unwrap();
        assert_eq!(list[0], Value::Integer(Int::Lossless(1)));
        assert_eq!(
            list[1].as_map().unwrap().get("s"),
            Some(&Value::String("x".into()))
        );
    }

    #[test]
    fn test_decode_node_missing_properties() {
        let value = decoder()
            .decode_value(&wire(
                r#"{"$type":"Node","_value":{"element_id":"n1","labels":["Person"]}}"#,
            ))
            .unwrap();
        let node = value.as_node().unwrap();
        assert_eq!(node.element_id, "n1");
        assert!(node.properties.is_empty());
    }

    fn wire_node(id: &str) -> String {
        format!(r#"{{"$type":"Node","_value":{{"element_id":"{}","labels":[]}}}}"#, id)
    }

    fn wire_rel(id: &str, start: &str, end: &str) -> String {
        format!(
            r#"{{"$type":"Relationship","_value":{{"element_id":"{}","start_node_element_id":"{}","end_node_element_id":"{}","type":"KNOWS"}}}}"#,
            id, start, end
        )
    }

    #[test]
    fn test_decode_path_reconstruction() {
        let json = format!(
            r#"{{"$type":"Path","_value":[{},{},{},{},{}]}}"#,
            wire_node("n1"),
            wire_rel("r1", "n1", "n2"),
            wire_node("n2"),
            wire_rel("r2", "n2", "n3"),
            wire_node("n3"),
        );
        let value = decoder().decode_value(&wire(&json)).unwrap();

        let path = value.as_path().unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path.start().unwrap().element_id, "n1");
        assert_eq!(path.end().unwrap().element_id, "n3");

        let segments: Vec<_> = path.segments().collect();
        assert_eq!(segments[0].start.element_id, "n1");
        assert_eq!(segments[0].relationship.element_id, "r1");
        assert_eq!(segments[0].end.element_id, "n2");
        assert_eq!(segments[1].start.element_id, "n2");
        assert_eq!(segments[1].relationship.element_id, "r2");
        assert_eq!(segments[1].end.element_id, "n3");
    }

    #[test]
    fn test_decode_path_rejects_bad_shapes() {
        let d = decoder();

        // Even length
        let json = format!(
            r#"{{"$type":"Path","_value":[{},{}]}}"#,
            wire_node("n1"),
            wire_rel("r1", "n1", "n2"),
        );
        assert!(d.decode_value(&wire(&json)).is_err());

        // Empty
        assert!(d.decode_value(&wire(r#"{"$type":"Path","_value":[]}"#)).is_err());

        // Relationship in a node slot
        let json = format!(r#"{{"$type":"Path","_value":[{}]}}"#, wire_rel("r1", "a", "b"));
        assert!(d.decode_value(&wire(&json)).is_err());
    }

    #[test]
    fn test_decode_stats_policy_uniformity() {
        let totals = CounterTotals {
            contains_updates: true,
            nodes_created: 3,
            ..Default::default()
        };

        let stats = ValueDecoder::new(IntegerPolicy::Number).decode_stats(&totals);
        assert_eq!(stats.nodes_created, Int::Number(3.0));
        assert_eq!(stats.nodes_deleted, Int::Number(0.0));

        let stats = ValueDecoder::new(IntegerPolicy::BigInt).decode_stats(&totals);
        assert_eq!(stats.nodes_created, Int::Big(3));

        // Top-level values agree with the counters under the same policy.
        let d = ValueDecoder::new(IntegerPolicy::Number);
        assert_eq!(
            d.decode_value(&WireValue::Integer("3".into())).unwrap(),
            Value::Integer(Int::Number(3.0))
        );
    }

    #[test]
    fn test_decode_profile_renames() {
        let body: PlanBody = serde_json::from_str(
            r#"{
                "operatorType": "AllNodesScan",
                "dbHits": 35,
                "records": 34,
                "arguments": {"n": {"$type": "String", "_value": "n"}},
                "children": []
            }"#,
        )
        .unwrap();

        let profile = decoder().decode_profile(&body).unwrap();
        assert_eq!(profile.rows, Int::Lossless(34));
        assert_eq!(profile.db_hits, Int::Lossless(35));
        assert_eq!(profile.args.get("n"), Some(&Value::String("n".into())));
    }

    #[test]
    fn test_decode_summary() {
        let body: SummaryBody = serde_json::from_str(
            r#"{"bookmarks": ["bm:1"], "counters": {"nodesCreated": 1}}"#,
        )
        .unwrap();

        let summary = decoder().decode_summary(&body).unwrap();
        assert_eq!(summary.bookmarks, vec!["bm:1"]);
        assert_eq!(summary.counters.nodes_created, Int::Lossless(1));
        assert!(summary.profile.is_none());
        assert!(summary.plan.is_none());
    }
}
