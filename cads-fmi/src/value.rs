//! The scalar value model shared by start-value bindings and captured
//! outputs.
//!
//! Values cross three boundaries in textual or JSON form: workflow documents
//! feed start values in, FMU setters take locale-independent decimal text,
//! and result snapshots serialize back out as JSON. The conversions here keep
//! those round trips exact.

use serde::{Deserialize, Serialize};

use crate::Error;

/// A single captured or supplied simulation value.
///
/// Serializes as a bare JSON number or boolean, never a quoted numeric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Boolean(bool),
    Integer(i32),
    Real(f64),
}

impl ScalarValue {
    /// Encode to the textual form used for FMU start-value bindings.
    ///
    /// Reals use the shortest representation that round-trips; booleans map
    /// to `1`/`0` so they can feed numeric and boolean inputs alike.
    pub fn encode(&self) -> String {
        match self {
            ScalarValue::Boolean(true) => "1".to_owned(),
            ScalarValue::Boolean(false) => "0".to_owned(),
            ScalarValue::Integer(v) => v.to_string(),
            ScalarValue::Real(v) => v.to_string(),
        }
    }
}

impl std::fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarValue::Boolean(v) => write!(f, "{v}"),
            ScalarValue::Integer(v) => write!(f, "{v}"),
            ScalarValue::Real(v) => write!(f, "{v}"),
        }
    }
}

/// Locale-independent parse of a textual scalar value.
///
/// Rejects empty input, trailing garbage and non-finite values.
pub fn parse_number(input: &str) -> Result<f64, Error> {
    input
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidNumber {
            value: input.to_owned(),
        })
}

/// Nearest integer, ties away from zero. Applied when a real value feeds an
/// integer variable.
pub fn round_to_i32(value: f64) -> i32 {
    value.round() as i32
}

/// Boolean interpretation of a numeric wire value: `0` is false, anything
/// else is true.
pub fn to_boolean(value: f64) -> bool {
    value != 0.0
}
