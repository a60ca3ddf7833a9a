//! Typed field values.
//!
//! The database encodes every field as a single-key JSON object whose key
//! names the value type:
//!
//! ```text
//! { "stringValue": "Alice" }
//! { "integerValue": "42" }
//! { "mapValue": { "fields": { "city": { "stringValue": "Oslo" } } } }
//! ```
//!
//! [`Value`] is the decoded form. Decoding happens during deserialization, so
//! a malformed value (an integer that does not parse, bytes that are not
//! base64) fails the whole response body rather than surfacing later.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Ordered field map of a document or map value.
pub type Fields = IndexMap<String, Value>;

/// A decoded document field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireValue", into = "WireValue")]
pub enum Value {
    /// Explicit null.
    Null,
    /// Boolean.
    Boolean(bool),
    /// 64-bit signed integer.
    Integer(i64),
    /// Double-precision float.
    Double(f64),
    /// Timestamp with nanosecond precision.
    Timestamp(DateTime<Utc>),
    /// UTF-8 string.
    String(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Reference to another document by absolute name.
    Reference(String),
    /// Geographic coordinate.
    GeoPoint(GeoPoint),
    /// Ordered list of values.
    Array(Vec<Value>),
    /// Nested map.
    Map(Fields),
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Value {
    /// Returns the wire name of this value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "nullValue",
            Self::Boolean(_) => "booleanValue",
            Self::Integer(_) => "integerValue",
            Self::Double(_) => "doubleValue",
            Self::Timestamp(_) => "timestampValue",
            Self::String(_) => "stringValue",
            Self::Bytes(_) => "bytesValue",
            Self::Reference(_) => "referenceValue",
            Self::GeoPoint(_) => "geoPointValue",
            Self::Array(_) => "arrayValue",
            Self::Map(_) => "mapValue",
        }
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the string for string and reference values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Reference(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the timestamp, if this is a timestamp.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Returns the bytes, if this is a bytes value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the elements, if this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the fields, if this is a map.
    pub fn as_map(&self) -> Option<&Fields> {
        match self {
            Self::Map(fields) => Some(fields),
            _ => None,
        }
    }

    /// Converts to plain JSON, dropping the type tags.
    ///
    /// Timestamps become RFC 3339 strings, bytes become base64 strings and
    /// non-finite doubles become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Self::Null => Json::Null,
            Self::Boolean(b) => Json::Bool(*b),
            Self::Integer(i) => Json::from(*i),
            Self::Double(d) => serde_json::Number::from_f64(*d).map_or(Json::Null, Json::Number),
            Self::Timestamp(ts) => Json::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::String(s) | Self::Reference(s) => Json::String(s.clone()),
            Self::Bytes(b) => Json::String(STANDARD.encode(b)),
            Self::GeoPoint(point) => serde_json::json!({
                "latitude": point.latitude,
                "longitude": point.longitude,
            }),
            Self::Array(values) => Json::Array(values.iter().map(Self::to_json).collect()),
            Self::Map(fields) => fields_to_json(fields),
        }
    }
}

/// Converts a field map to a plain JSON object.
pub fn fields_to_json(fields: &Fields) -> serde_json::Value {
    serde_json::Value::Object(
        fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect(),
    )
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Self::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::Array(values)
    }
}

impl From<Fields> for Value {
    fn from(fields: Fields) -> Self {
        Self::Map(fields)
    }
}

// ============================================================================
// Wire representation
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum WireValue {
    NullValue(Option<String>),
    BooleanValue(bool),
    IntegerValue(WireInteger),
    DoubleValue(WireDouble),
    TimestampValue(DateTime<Utc>),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(GeoPoint),
    ArrayValue(WireArray),
    MapValue(WireMap),
}

/// Integers travel as decimal strings; plain numbers are accepted too.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WireInteger {
    Number(i64),
    Text(String),
}

/// Non-finite doubles travel as "NaN", "Infinity" or "-Infinity".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WireDouble {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WireArray {
    #[serde(default)]
    values: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WireMap {
    #[serde(default)]
    fields: Fields,
}

impl TryFrom<WireValue> for Value {
    type Error = CoreError;

    fn try_from(wire: WireValue) -> Result<Self, Self::Error> {
        Ok(match wire {
            WireValue::NullValue(_) => Self::Null,
            WireValue::BooleanValue(b) => Self::Boolean(b),
            WireValue::IntegerValue(WireInteger::Number(i)) => Self::Integer(i),
            WireValue::IntegerValue(WireInteger::Text(text)) => {
                Self::Integer(text.parse().map_err(|e| {
                    CoreError::invalid_value(format!("integerValue {text:?}: {e}"))
                })?)
            }
            WireValue::DoubleValue(WireDouble::Number(d)) => Self::Double(d),
            WireValue::DoubleValue(WireDouble::Text(text)) => {
                Self::Double(text.parse().map_err(|e| {
                    CoreError::invalid_value(format!("doubleValue {text:?}: {e}"))
                })?)
            }
            WireValue::TimestampValue(ts) => Self::Timestamp(ts),
            WireValue::StringValue(s) => Self::String(s),
            WireValue::BytesValue(encoded) => Self::Bytes(
                STANDARD
                    .decode(encoded.as_bytes())
                    .map_err(|e| CoreError::invalid_value(format!("bytesValue: {e}")))?,
            ),
            WireValue::ReferenceValue(name) => Self::Reference(name),
            WireValue::GeoPointValue(point) => Self::GeoPoint(point),
            WireValue::ArrayValue(array) => Self::Array(array.values),
            WireValue::MapValue(map) => Self::Map(map.fields),
        })
    }
}

impl From<Value> for WireValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::NullValue(Some("NULL_VALUE".to_string())),
            Value::Boolean(b) => Self::BooleanValue(b),
            Value::Integer(i) => Self::IntegerValue(WireInteger::Text(i.to_string())),
            Value::Double(d) if d.is_finite() => Self::DoubleValue(WireDouble::Number(d)),
            Value::Double(d) => Self::DoubleValue(WireDouble::Text(non_finite_name(d).to_string())),
            Value::Timestamp(ts) => Self::TimestampValue(ts),
            Value::String(s) => Self::StringValue(s),
            Value::Bytes(b) => Self::BytesValue(STANDARD.encode(b)),
            Value::Reference(name) => Self::ReferenceValue(name),
            Value::GeoPoint(point) => Self::GeoPointValue(point),
            Value::Array(values) => Self::ArrayValue(WireArray { values }),
            Value::Map(fields) => Self::MapValue(WireMap { fields }),
        }
    }
}

fn non_finite_name(d: f64) -> &'static str {
    if d.is_nan() {
        "NaN"
    } else if d.is_sign_positive() {
        "Infinity"
    } else {
        "-Infinity"
    }
}
