//! Record value tree.
//!
//! A record is a tree of maps, lists and scalars. Maps keep the insertion
//! order of their keys so that a typecast record serializes back in the same
//! shape it arrived in.

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered map node of a record.
pub type Map = IndexMap<String, Value>;

/// A node of a record tree.
///
/// `Timestamp` and `Binary` are opaque scalars: the typecaster never
/// converts them and never looks inside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
    Timestamp(DateTime<FixedOffset>),
    Binary(Vec<u8>),
}

impl Value {
    /// Short name of the variant, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Timestamp(_) => "timestamp",
            Value::Binary(_) => "binary",
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Text form of a scalar as seen by the classifier.
    ///
    /// Floats always carry a `.` so that they classify back to a float,
    /// and null renders as the empty string, which matches nothing.
    /// Containers and opaque scalars have no text form.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Value::Null => Some(String::new()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(format_float(*f)),
            Value::String(s) => Some(s.clone()),
            Value::List(_) | Value::Map(_) | Value::Timestamp(_) | Value::Binary(_) => None,
        }
    }
}

/// Formats a float so the text keeps a decimal point.
///
/// `Display` for `f64` never uses exponent notation, so appending `.0` to
/// an integral rendering is enough. Non-finite values render as `NaN`,
/// `inf` or `-inf`, none of which the classifier accepts.
pub fn format_float(f: f64) -> String {
    let text = f.to_string();
    if f.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", format_float(*fl)),
            Value::String(s) => write!(f, "{}", s),
            Value::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            Value::List(_) | Value::Map(_) | Value::Binary(_) => {
                write!(f, "{}", serde_json::Value::from(self.clone()))
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::Null
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::List(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Map(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::Number(i.into()),
            // JSON has no representation for NaN or infinities
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
            Value::Timestamp(ts) => serde_json::Value::String(ts.to_rfc3339()),
            Value::Binary(bytes) => serde_json::Value::Array(
                bytes
                    .into_iter()
                    .map(|b| serde_json::Value::Number(b.into()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_key_order() {
        let value: Value = serde_json::from_str(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
        let keys: Vec<&str> = value.as_map().unwrap().keys().map(|k| k.as_str()).collect();

        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"b":1,"a":2,"c":3}"#);
    }

    #[test]
    fn test_from_json_numbers() {
        assert_eq!(Value::from(json!(1)), Value::Int(1));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(json!(u64::MAX)), Value::Float(u64::MAX as f64));
    }

    #[test]
    fn test_to_json_non_finite_float() {
        assert_eq!(serde_json::Value::from(Value::Float(f64::NAN)), json!(null));
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(Value::Float(1.0).scalar_text(), Some("1.0".to_string()));
        assert_eq!(Value::Float(1.0e18).scalar_text(), Some("1000000000000000000.0".to_string()));
        assert_eq!(Value::Float(0.1).scalar_text(), Some("0.1".to_string()));
        assert_eq!(Value::Int(-7).scalar_text(), Some("-7".to_string()));
        assert_eq!(Value::Null.scalar_text(), Some(String::new()));
        assert_eq!(Value::List(vec![]).scalar_text(), None);
        assert_eq!(Value::Binary(b"12".to_vec()).scalar_text(), None);
    }

    #[test]
    fn test_serde_round_trip_through_json_text() {
        let value: Value = serde_json::from_str(r#"{"k":[1,"x",null,true,2.5]}"#).unwrap();
        let text = serde_json::to_string(&value).unwrap();

        assert_eq!(text, r#"{"k":[1,"x",null,true,2.5]}"#);
    }

    #[test]
    fn test_timestamp_serializes_as_rfc3339() {
        let ts = DateTime::parse_from_rfc3339("2024-05-01T12:00:00+02:00").unwrap();
        let json = serde_json::Value::from(Value::Timestamp(ts));

        assert_eq!(json, json!("2024-05-01T12:00:00+02:00"));
    }
}
