//! Wire encoding for the loosely typed fields of the IoT Agent data model.
//!
//! Two fields are declared as "any" by the agent API:
//!
//! | Field | Accepted input | Encoding |
//! |-------|----------------|----------|
//! | `Device.explicitAttrs` | bool or string | boolean-looking strings become booleans, `""` is omitted |
//! | `StaticAttribute.value` | anything | text is type-inferred (object, array, number, bool, string) |
//!
//! Both are held as an [`AnyValue`] and encoded on serialization, so the same
//! record always produces the same bytes.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::AgentError;

/// Wire name of the device attribute-explicitness flag.
pub const EXPLICIT_ATTRS: &str = "explicitAttrs";

const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A field value whose JSON type is decided at encoding time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AnyValue {
    /// Not set.
    #[default]
    Absent,
    /// A native boolean.
    Bool(bool),
    /// Text whose meaning is inferred when encoded.
    Text(String),
    /// An already-typed JSON value (number, object, array).
    Raw(Value),
}

impl AnyValue {
    /// Classify a decoded JSON value.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::Bool(flag) => Self::Bool(flag),
            Value::String(text) => Self::Text(text),
            other => Self::Raw(other),
        }
    }

    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The value as JSON, without any inference.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Absent => Value::Null,
            Self::Bool(flag) => Value::Bool(*flag),
            Self::Text(text) => Value::String(text.clone()),
            Self::Raw(value) => value.clone(),
        }
    }
}

impl From<bool> for AnyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for AnyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AnyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for AnyValue {
    fn from(value: i64) -> Self {
        Self::Raw(Value::from(value))
    }
}

impl From<i32> for AnyValue {
    fn from(value: i32) -> Self {
        Self::Raw(Value::from(value))
    }
}

impl From<u64> for AnyValue {
    fn from(value: u64) -> Self {
        Self::Raw(Value::from(value))
    }
}

impl From<f64> for AnyValue {
    fn from(value: f64) -> Self {
        Self::from_json(Value::from(value))
    }
}

impl From<Value> for AnyValue {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

impl Serialize for AnyValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Absent => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Raw(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for AnyValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}

/// Encode a device `explicitAttrs` flag.
///
/// Returns `Ok(None)` when the field must be left out of the payload.
///
/// # Errors
///
/// [`AgentError::InvalidFieldType`] when the value is neither a string nor a
/// boolean.
pub fn encode_explicit_attrs(value: &AnyValue) -> Result<Option<Value>, AgentError> {
    match value {
        AnyValue::Absent => Ok(None),
        AnyValue::Bool(flag) => Ok(Some(Value::Bool(*flag))),
        AnyValue::Text(text) => Ok(match parse_flag(text) {
            Some(flag) => Some(Value::Bool(flag)),
            None if text.is_empty() => None,
            None => Some(Value::String(text.clone())),
        }),
        AnyValue::Raw(_) => Err(AgentError::InvalidFieldType {
            field: EXPLICIT_ATTRS,
            expected: "a string or a bool",
        }),
    }
}

/// Interpret `text` as the richest JSON value it spells.
///
/// Precedence: object, array, float, integer, boolean, then the text itself.
pub fn infer_value(text: &str) -> Value {
    if let Ok(object) = serde_json::from_str::<Map<String, Value>>(text) {
        return Value::Object(object);
    }
    if let Ok(array) = serde_json::from_str::<Vec<Value>>(text) {
        return Value::Array(array);
    }
    if let Some(number) = parse_number(text) {
        return Value::Number(number);
    }
    if text.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::String(text.to_owned())
}

pub(crate) fn omits_explicit_attrs(value: &AnyValue) -> bool {
    matches!(encode_explicit_attrs(value), Ok(None))
}

pub(crate) fn serialize_explicit_attrs<S>(value: &AnyValue, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match encode_explicit_attrs(value).map_err(S::Error::custom)? {
        Some(encoded) => encoded.serialize(serializer),
        None => serializer.serialize_none(),
    }
}

fn parse_flag(text: &str) -> Option<bool> {
    let lowered = text.to_lowercase();
    match lowered.trim().trim_matches('\t') {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_number(text: &str) -> Option<Number> {
    match text.parse::<f64>() {
        Ok(float) if float.is_finite() => float_number(text, float),
        _ => text.parse::<i64>().ok().map(Number::from),
    }
}

// Integral floats are written without a fraction, `1` rather than `1.0`.
fn float_number(text: &str, float: f64) -> Option<Number> {
    if let Ok(integer) = text.parse::<i64>() {
        return Some(Number::from(integer));
    }
    if float.fract() == 0.0 && float.abs() <= MAX_SAFE_INTEGER {
        return Some(Number::from(float as i64));
    }
    Number::from_f64(float)
}
