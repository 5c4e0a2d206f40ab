//! Record - a single row of a query result.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::error::{DriverError, DriverResult};
use super::types::Value;

// ============================================================================
// Record
// ============================================================================

/// Query result record.
///
/// Every row of one response carries the same field names, so records
/// share one `Arc` of keys resolved from the response header and own
/// only their values. Lookups scan the key slice; rows are narrow.
///
/// A value that failed to decode is carried as
/// [`Broken`](Value::Broken) and raises its original protocol error
/// from the typed accessors, so one bad value never hides the rest of
/// the row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    keys: Arc<[String]>,
    values: Vec<Value>,
}

impl Record {
    /// Create a record over shared field names.
    pub fn new(keys: impl Into<Arc<[String]>>, values: Vec<Value>) -> Self {
        Self {
            keys: keys.into(),
            values,
        }
    }

    /// The field names.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The row values.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The position of a field.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Whether the row has a field.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    /// The value of a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index_of(key).and_then(|index| self.values.get(index))
    }

    /// The value at a position.
    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// The value of a field, converted to a concrete type.
    ///
    /// A broken value re-raises the protocol error recorded when its
    /// payload failed to decode.
    pub fn get_as<T>(&self, key: &str) -> DriverResult<T>
    where
        T: TryFrom<Value, Error = DriverError>,
    {
        match self.get(key) {
            None => Err(DriverError::type_conversion(format!(
                "Record has no field '{}'",
                key
            ))),
            Some(Value::Broken(broken)) => Err(broken.to_error()),
            Some(value) => T::try_from(value.clone()),
        }
    }

    /// The value of a field, with null and absence reading as `None`.
    pub fn get_optional<T>(&self, key: &str) -> DriverResult<Option<T>>
    where
        T: TryFrom<Value, Error = DriverError>,
    {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Broken(broken)) => Err(broken.to_error()),
            Some(value) => T::try_from(value.clone()).map(Some),
        }
    }

    /// Iterate the row as `(field, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.keys
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// The row as a key/value map.
    pub fn to_map(&self) -> HashMap<String, Value> {
        self.iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    /// Consume the record, keeping only the values.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

// ============================================================================
// Tests
// ============================================================================
