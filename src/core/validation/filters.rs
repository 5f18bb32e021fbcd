//! Field filters applied before validation

use serde_json::Value;

/// Trim leading/trailing whitespace from string values; everything else passes
/// through unchanged.
pub fn trim(value: &Value) -> Value {
    match value.as_str() {
        Some(s) => Value::String(s.trim().to_string()),
        None => value.clone(),
    }
}
