//! Row normalization for nested JSON.
//!
//! An object becomes one record whose nested objects are flattened into
//! `parent.child` keys; an array of objects becomes one record per element.
//! Arrays nested inside a record are kept as values, not exploded. A nested
//! object with no keys contributes no columns, so its key disappears.

use serde_json::{Map, Value};

use crate::error::NormalizeError;

pub const DEFAULT_SEPARATOR: &str = ".";

/// Flatten `value` into records.
pub fn json_normalize(value: &Value, sep: &str) -> Result<Vec<Map<String, Value>>, NormalizeError> {
    match value {
        Value::Object(obj) => Ok(vec![flatten_record(obj, sep)]),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(obj) => Ok(flatten_record(obj, sep)),
                other => Err(NormalizeError::NotARecord { kind: kind_of(other) }),
            })
            .collect(),
        other => Err(NormalizeError::NotARecord { kind: kind_of(other) }),
    }
}

/// Flatten one object into a single-level map.
pub fn flatten_record(obj: &Map<String, Value>, sep: &str) -> Map<String, Value> {
    let mut out = Map::new();
    flatten_into(&mut out, None, obj, sep);
    out
}

fn flatten_into(out: &mut Map<String, Value>, prefix: Option<&str>, obj: &Map<String, Value>, sep: &str) {
    for (key, value) in obj {
        let path = match prefix {
            Some(p) => format!("{}{}{}", p, sep, key),
            None => key.clone(),
        };
        match value {
            Value::Object(inner) => flatten_into(out, Some(&path), inner, sep),
            _ => {
                out.insert(path, value.clone());
            }
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
