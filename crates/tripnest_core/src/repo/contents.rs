//! Packing-unit contents normalization.
//!
//! Stores hold contents as a list, a free-text string or a key/value map.
//! Everything past the repository boundary only sees an ordered item list.

use serde_json::Value;

/// Normalizes raw stored contents into ordered items.
///
/// - list: one item per element, strings verbatim, other values as JSON text
/// - string: the trimmed text, or nothing when blank
/// - map: its keys
/// - anything else: nothing
pub fn normalize_contents(raw: &Value) -> Vec<String> {
    match raw {
        Value::Array(values) => values.iter().map(item_text).collect(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_string()]
            }
        }
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Null | Value::Bool(_) | Value::Number(_) => Vec::new(),
    }
}

/// Reads raw contents stored as JSON text.
///
/// Text that is not JSON is kept as a free-text string.
pub fn parse_raw_contents(raw: &str) -> Value {
    serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn item_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
