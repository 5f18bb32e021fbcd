//! Per-type field checks
//!
//! Each check takes the field name, the (already sanitized) raw value and the
//! field's schema, and returns `None` when valid or a descriptive error string.
//! Error wording distinguishes required from optional fields but the effect is
//! identical: out-of-contract values are rejected.

use crate::core::schema::{FieldSchema, FieldType};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

/// Values accepted unparsed by the time check (legacy "no time set" sentinel)
const NO_TIME_SENTINEL: &str = "1900-01-01T";

/// Dispatch a value to the check matching the schema's declared type
pub fn check(field: &str, value: &Value, schema: &FieldSchema) -> Option<String> {
    match schema.field_type {
        FieldType::String => string_check(field, value, schema),
        FieldType::Enum => enum_check(field, value, schema),
        FieldType::Boolean => boolean_check(field, value),
        FieldType::Integer => integer_check(field, value, schema),
        FieldType::Float => float_check(field, value, schema),
        FieldType::Date => date_check(value),
        FieldType::DateTime => datetime_check(value),
        FieldType::Time => time_check(value),
        FieldType::Array => array_check(field, value, schema),
    }
}

/// Render a raw value for an error message: strings without quotes, everything
/// else as its JSON form.
fn display_value(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

fn string_check(field: &str, value: &Value, schema: &FieldSchema) -> Option<String> {
    let Some(s) = value.as_str() else {
        return Some(format!(
            "Invalid data type for {}. It's value {} is not a string",
            field,
            display_value(value)
        ));
    };
    let length = s.chars().count();
    if length < schema.min_length || length > schema.max_length {
        if !schema.required {
            Some(format!(
                "{}'s value is not required, but if supplied, then it must be min {} and max {} chars long",
                field, schema.min_length, schema.max_length
            ))
        } else {
            Some(format!(
                "{} should be between {} and {} characters",
                field, schema.min_length, schema.max_length
            ))
        }
    } else {
        None
    }
}

fn enum_check(field: &str, value: &Value, schema: &FieldSchema) -> Option<String> {
    let is_member = value
        .as_str()
        .map(|s| schema.options.iter().any(|option| *option == s))
        .unwrap_or(false);
    if is_member {
        None
    } else if !schema.required {
        Some(format!(
            "{} is not required, but if supplied then it must be one of these {:?}",
            field, schema.options
        ))
    } else {
        Some(format!(
            "{} must be one of these {:?}",
            field, schema.options
        ))
    }
}

fn boolean_check(field: &str, value: &Value) -> Option<String> {
    if value.is_boolean() {
        None
    } else {
        Some(format!(
            "{} must be of data type boolean (true/false)",
            field
        ))
    }
}

fn integer_check(field: &str, value: &Value, schema: &FieldSchema) -> Option<String> {
    let Some(number) = value.as_i64() else {
        return Some(format!(
            "Invalid data type for {}. Supplied data is not an integer",
            field
        ));
    };
    if (number as f64) < schema.min_value || (number as f64) > schema.max_value {
        if !schema.required {
            Some(format!(
                "{}'s value is not required, but if supplied then, it's value must be min {} and max {}",
                field, schema.min_value, schema.max_value
            ))
        } else {
            Some(format!(
                "{} must be between {} to {} characters long",
                field, schema.min_value, schema.max_value
            ))
        }
    } else {
        None
    }
}

fn float_check(field: &str, value: &Value, schema: &FieldSchema) -> Option<String> {
    let Some(number) = value.as_f64() else {
        return Some(format!(
            "Invalid data type for {}. Supplied value is not a float",
            field
        ));
    };
    if number < schema.min_value || number > schema.max_value {
        if !schema.required {
            Some(format!(
                "{}'s value is not required, but if supplied then it's value i.e. {} must be min {} and max {}",
                field, number, schema.min_value, schema.max_value
            ))
        } else {
            Some(format!(
                "{} must be between {} to {} characters long",
                field, schema.min_value, schema.max_value
            ))
        }
    } else {
        None
    }
}

// The date/datetime/time checks require an exact round-trip: chrono accepts
// unpadded components ("2023-2-1") which the canonical formats do not. Any
// failure, including a non-string value, collapses to the same format error.

fn date_check(value: &Value) -> Option<String> {
    let valid = value.as_str().is_some_and(|s| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(|d| d.format("%Y-%m-%d").to_string() == s)
            .unwrap_or(false)
    });
    if valid {
        None
    } else {
        Some(format!(
            "{} value is of incorrect data format, should be YYYY-MM-DD",
            display_value(value)
        ))
    }
}

fn datetime_check(value: &Value) -> Option<String> {
    let valid = value.as_str().is_some_and(|s| {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string() == s)
            .unwrap_or(false)
    });
    if valid {
        None
    } else {
        Some(format!(
            "{} value is of incorrect datetime format, should be YYYY-MM-DD HH:MM:SS",
            display_value(value)
        ))
    }
}

fn time_check(value: &Value) -> Option<String> {
    let valid = value.as_str().is_some_and(|s| {
        s.contains(NO_TIME_SENTINEL)
            || NaiveTime::parse_from_str(s, "%H:%M:%S")
                .map(|t| t.format("%H:%M:%S").to_string() == s)
                .unwrap_or(false)
    });
    if valid {
        None
    } else {
        Some(format!(
            "{} value is of incorrect time format, should be HH:MM:SS",
            display_value(value)
        ))
    }
}

fn array_check(field: &str, value: &Value, schema: &FieldSchema) -> Option<String> {
    let Some(items) = value.as_array() else {
        return Some(format!(
            "Invalid data type for {}. Supplied data is not a list",
            field
        ));
    };
    if items.len() < schema.min_length || items.len() > schema.max_length {
        if !schema.required {
            return Some(format!(
                "{}'s value is not required, but if supplied then, it's length must be min {} and max {}",
                field, schema.min_length, schema.max_length
            ));
        }
        return Some(format!(
            "{}'s length must be min {} and max {}",
            field, schema.min_length, schema.max_length
        ));
    }
    if !schema.options.is_empty() {
        let all_members = items.iter().all(|item| {
            item.as_str()
                .map(|s| schema.options.iter().any(|option| *option == s))
                .unwrap_or(false)
        });
        if !all_members {
            if !schema.required {
                return Some(format!(
                    "{} is not required, but if supplied then it must be one of these {:?}",
                    field, schema.options
                ));
            }
            return Some(format!(
                "{} must be one of these {:?}",
                field, schema.options
            ));
        }
    }
    None
}
