//! Integer representation policy.
//!
//! The wire carries integers as decimal strings so the full 64-bit range
//! survives JSON. The policy chosen at codec construction decides how
//! those strings materialize for the caller, and is applied everywhere an
//! integer-valued field is produced: top-level values, nested maps and
//! lists, counters, and plan statistics.

use crate::driver::error::{DriverError, DriverResult};
use crate::driver::types::Int;

/// Integer representation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegerPolicy {
    /// Keep a 64-bit integer representation
    #[default]
    Lossless,
    /// Widen to `i128`, covering the entire wire range
    BigInt,
    /// Represent as a double-precision float
    Number,
}

impl IntegerPolicy {
    /// Parse a decimal integer payload under this policy.
    pub fn parse(&self, text: &str) -> DriverResult<Int> {
        match self {
            IntegerPolicy::Lossless => text
                .parse::<i64>()
                .map(Int::Lossless)
                .map_err(|_| invalid_integer(text)),
            IntegerPolicy::BigInt => text
                .parse::<i128>()
                .map(Int::Big)
                .map_err(|_| invalid_integer(text)),
            IntegerPolicy::Number => text
                .parse::<f64>()
                .map(Int::Number)
                .map_err(|_| invalid_integer(text)),
        }
    }

    /// Coerce a raw JSON integer (counters, plan statistics) under this
    /// policy.
    pub fn from_i64(&self, value: i64) -> Int {
        match self {
            IntegerPolicy::Lossless => Int::Lossless(value),
            IntegerPolicy::BigInt => Int::Big(value as i128),
            IntegerPolicy::Number => Int::Number(value as f64),
        }
    }
}

fn invalid_integer(text: &str) -> DriverError {
    DriverError::protocol(format!("Invalid integer payload '{}'", text))
}
