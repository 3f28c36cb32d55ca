//! The value tree templates operate on.
//!
//! Data reaches templates as [`gtmpl::Value`]. A JSON object becomes a
//! `Value::Object`, so reading a key it does not have fails the render
//! instead of printing a placeholder. Every JSON number becomes a float.

use std::collections::HashMap;

pub use gtmpl::Value;

/// Converts a parsed JSON document into a template value.
///
/// ```
/// use gt::value::{from_json, kind};
///
/// let value = from_json(serde_json::json!({"tags": ["a", "b"]}));
/// assert_eq!(kind(&value), "map");
/// ```
pub fn from_json(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Nil,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::from(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::Array(items.into_iter().map(from_json).collect())
        }
        serde_json::Value::Object(map) => {
            let fields: HashMap<String, Value> =
                map.into_iter().map(|(key, value)| (key, from_json(value))).collect();
            Value::Object(fields)
        }
    }
}

/// Short name of the value's shape, used in logs and error messages.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::NoValue | Value::Nil => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) | Value::Map(_) => "map",
        _ => "function",
    }
}

pub fn as_str(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Returns the number as an integer if it has no fractional part. Integer
/// literals and integral floats bound from JSON both qualify.
pub fn as_i64(value: &Value) -> Option<i64> {
    as_f64(value).filter(|n| n.fract() == 0.0 && n.is_finite()).map(|n| n as i64)
}
