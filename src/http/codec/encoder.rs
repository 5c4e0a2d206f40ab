//! Parameter encoding into tagged wire values.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::scalars;
use super::wire::WireValue;
use crate::driver::error::{DriverError, DriverResult};
use crate::driver::types::Value;

/// Encode one caller value into its tagged wire form.
///
/// Graph entities are not accepted as parameters; a `DateTime` without a
/// UTC offset is ambiguous and rejected.
pub fn encode_value(value: &Value) -> DriverResult<WireValue> {
    match value {
        Value::Null => Ok(WireValue::null()),
        Value::Boolean(b) => Ok(WireValue::Boolean(*b)),
        Value::Float(f) => Ok(WireValue::Float(scalars::format_float(*f))),
        Value::String(s) => Ok(WireValue::String(s.clone())),
        Value::Integer(i) => Ok(WireValue::Integer(i.to_string())),
        Value::Bytes(bytes) => Ok(WireValue::Base64(STANDARD.encode(bytes))),
        Value::List(items) => {
            let encoded = items.iter().map(encode_value).collect::<DriverResult<_>>()?;
            Ok(WireValue::List(encoded))
        }
        Value::Map(entries) => Ok(WireValue::Map(encode_entries(entries)?)),
        Value::Point(point) => Ok(WireValue::Point(scalars::format_point(point))),
        Value::Duration(duration) => Ok(WireValue::Duration(duration.to_string())),
        Value::Date(date) => Ok(WireValue::Date(scalars::format_date(date))),
        Value::LocalTime(time) => Ok(WireValue::LocalTime(scalars::format_local_time(time))),
        Value::Time(time) => Ok(WireValue::Time(time.to_string())),
        Value::LocalDateTime(datetime) => Ok(WireValue::LocalDateTime(
            scalars::format_local_date_time(datetime),
        )),
        Value::DateTime(datetime) => {
            if datetime.offset_seconds.is_none() {
                return Err(DriverError::protocol(
                    "DateTime parameters require a UTC offset",
                ));
            }
            // The zone id decides which tag the canonical text carries.
            if datetime.zone_id.is_some() {
                Ok(WireValue::ZonedDateTime(datetime.to_string()))
            } else {
                Ok(WireValue::OffsetDateTime(datetime.to_string()))
            }
        }
        Value::Node(_) | Value::Relationship(_) | Value::Path(_) => {
            Err(DriverError::protocol(format!(
                "{} values cannot be used as query parameters",
                value.type_name()
            )))
        }
        Value::Broken(broken) => Err(broken.to_error()),
    }
}

/// Encode a parameter map.
pub fn encode_parameters(
    parameters: &HashMap<String, Value>,
) -> DriverResult<HashMap<String, WireValue>> {
    encode_entries(parameters)
}

fn encode_entries(
    entries: &HashMap<String, Value>,
) -> DriverResult<HashMap<String, WireValue>> {
    let mut encoded = HashMap::with_capacity(entries.len());
    for (key, value) in entries {
        encoded.insert(key.clone(), encode_value(value)?);
    }
    Ok(encoded)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::types::{
        BrokenValue, DateTime, Duration, Int, Node, OffsetTime, Point,
    };
    use crate::http::codec::decoder::ValueDecoder;
    use crate::http::codec::integers::IntegerPolicy;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_encode_parameter_map() {
        let mut params = HashMap::new();
        params.insert("n".to_string(), Value::Float(42.0));
        params.insert("s".to_string(), Value::String("hi".into()));
        params.insert("b".to_string(), Value::Bytes(vec![1, 2, 3]));

        let encoded = encode_parameters(&params).unwrap();
        assert_eq!(encoded.get("n"), Some(&WireValue::Float("42".into())));
        assert_eq!(encoded.get("s"), Some(&WireValue::String("hi".into())));
        assert_eq!(encoded.get("b"), Some(&WireValue::Base64("AQID".into())));
    }

    #[test]
    fn test_encode_integer_forms() {
        assert_eq!(
            encode_value(&Value::Integer(Int::Lossless(42))).unwrap(),
            WireValue::Integer("42".into())
        );
        assert_eq!(
            encode_value(&Value::Integer(Int::Big(-7))).unwrap(),
            WireValue::Integer("-7".into())
        );
    }

    #[test]
    fn test_encode_point_dimensionality() {
        assert_eq!(
            encode_value(&Value::Point(Point::new_2d(4326, 1.5, 2.5))).unwrap(),
            WireValue::Point("SRID=4326;POINT (1.5 2.5)".into())
        );
        assert_eq!(
            encode_value(&Value::Point(Point::new_3d(4326, 1.5, 2.5, 3.5))).unwrap(),
            WireValue::Point("SRID=4326;POINT Z (1.5 2.5 3.5)".into())
        );
    }

    #[test]
    fn test_encode_date_time_tags() {
        let ndt = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();

        assert_eq!(
            encode_value(&Value::DateTime(DateTime::with_offset(ndt, 7200))).unwrap(),
            WireValue::OffsetDateTime("2024-06-01T08:30:00+02:00".into())
        );
        assert_eq!(
            encode_value(&Value::DateTime(DateTime::with_zone(
                ndt,
                Some(7200),
                "Europe/Stockholm"
            )))
            .unwrap(),
            WireValue::ZonedDateTime("2024-06-01T08:30:00+02:00[Europe/Stockholm]".into())
        );
    }

    #[test]
    fn test_encode_rejects_ambiguous_date_time() {
        let ndt = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let err = encode_value(&Value::DateTime(DateTime::new(ndt, None, None))).unwrap_err();
        assert!(matches!(err, DriverError::Protocol(_)));
    }

    #[test]
    fn test_encode_rejects_graph_entities() {
        let node = Value::Node(Node::new("n1", vec![], HashMap::new()));
        let err = encode_value(&node).unwrap_err();
        assert!(err.to_string().contains("Node"));
    }

    #[test]
    fn test_encode_rejects_broken_values() {
        let broken = Value::Broken(BrokenValue::new("Invalid Point payload 'x'"));
        assert!(encode_value(&broken).is_err());
    }

    #[test]
    fn test_roundtrip_under_each_policy() {
        let values = vec![
            Value::Null,
            Value::Boolean(true),
            Value::Float(3.25),
            Value::String("hello".into()),
            Value::Bytes(vec![0, 255, 7]),
            Value::Point(Point::new_2d(7203, -1.25, 8.5)),
            Value::Duration(Duration::new(1, 2, 3, 500_000_000)),
            Value::Date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
            Value::LocalTime(NaiveTime::from_hms_nano_opt(1, 2, 3, 4_000_000).unwrap()),
            Value::Time(OffsetTime::new(
                NaiveTime::from_hms_opt(12, 50, 35).unwrap(),
                3600,
            )),
            Value::LocalDateTime(
                NaiveDate::from_ymd_opt(2024, 6, 1)
                    .unwrap()
                    .and_hms_opt(8, 30, 0)
                    .unwrap(),
            ),
            Value::DateTime(DateTime::with_zone(
                NaiveDate::from_ymd_opt(2024, 6, 1)
                    .unwrap()
                    .and_hms_opt(8, 30, 0)
                    .unwrap(),
                Some(7200),
                "Europe/Stockholm",
            )),
            Value::List(vec![Value::Boolean(false), Value::String("x".into())]),
        ];

        let decoder = ValueDecoder::new(IntegerPolicy::Lossless);
        for value in values {
            let decoded = decoder.decode_value(&encode_value(&value).unwrap()).unwrap();
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn test_roundtrip_integers_per_policy() {
        let lossless = ValueDecoder::new(IntegerPolicy::Lossless);
        let value = Value::Integer(Int::Lossless(42));
        assert_eq!(
            lossless.decode_value(&encode_value(&value).unwrap()).unwrap(),
            value
        );

        let big = ValueDecoder::new(IntegerPolicy::BigInt);
        let value = Value::Integer(Int::Big(i64::MAX as i128));
        assert_eq!(big.decode_value(&encode_value(&value).unwrap()).unwrap(), value);

        let number = ValueDecoder::new(IntegerPolicy::Number);
        let value = Value::Integer(Int::Number(42.0));
        assert_eq!(
            number.decode_value(&encode_value(&value).unwrap()).unwrap(),
            value
        );
    }

    #[test]
    fn test_roundtrip_map() {
        let mut map = HashMap::new();
        map.insert("a".to_string(), Value::from(1i64));
        map.insert("b".to_string(), Value::String("two".into()));
        let value = Value::Map(map);

        let decoder = ValueDecoder::new(IntegerPolicy::Lossless);
        assert_eq!(
            decoder.decode_value(&encode_value(&value).unwrap()).unwrap(),
            value
        );
    }
}
