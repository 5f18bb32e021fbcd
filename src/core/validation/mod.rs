//! Schema-driven input validation
//!
//! [`validate`] checks an untrusted JSON object against an entity's declared
//! [`EntitySchema`](crate::core::schema::EntitySchema) and returns the sanitized
//! values alongside every error found. Nothing here touches storage: the access
//! layer decides what to do with the report.

pub mod filters;
pub mod validators;

use crate::core::schema::EntitySchema;
use serde_json::{Map, Value};

/// Error returned when no field of the input matched any schema
pub const NO_INPUT_SUPPLIED: &str = "No valid input data supplied";

/// Outcome of validating one input mapping
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// One message per failed field, plus at most one aggregate
    /// missing-required-fields message
    pub errors: Vec<String>,

    /// Sanitized echo of the input: every supplied key, strings trimmed when
    /// sanitization was requested, carried regardless of error status
    pub data: Map<String, Value>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All errors as a single comma-joined string
    pub fn joined_errors(&self) -> String {
        self.errors.join(", ")
    }
}

/// Validate `record` against `schema`.
///
/// Fields named in `skip` are excluded from both the required check and
/// per-field validation; they still echo through `data`. When `sanitize` is
/// true, string values are whitespace-trimmed before validation.
///
/// Two aggregate policies apply on top of the per-field checks:
/// - every required, non-skipped schema field must actually be validated from
///   `record`, otherwise one error lists all missing names;
/// - if not a single key of `record` matched a non-skipped schema, the whole
///   call collapses to the single [`NO_INPUT_SUPPLIED`] error.
pub fn validate(
    record: &Map<String, Value>,
    schema: &EntitySchema,
    skip: &[&str],
    sanitize: bool,
) -> ValidationReport {
    let mut errors = Vec::new();
    let mut data = Map::new();

    // Declaration order, so the aggregate error message is deterministic
    let mut missing: Vec<&str> = schema
        .iter()
        .filter(|(name, field)| field.required && !skip.contains(*name))
        .map(|(name, _)| *name)
        .collect();

    let mut any_field_matched = false;

    for (key, raw) in record {
        let value = if sanitize { filters::trim(raw) } else { raw.clone() };
        data.insert(key.clone(), value.clone());

        if skip.contains(&key.as_str()) {
            continue;
        }
        let Some(field_schema) = schema.get(key.as_str()) else {
            continue;
        };
        any_field_matched = true;

        if let Some(message) = validators::check(key, &value, field_schema) {
            errors.push(message);
        }
        missing.retain(|name| *name != key.as_str());
    }

    if !any_field_matched {
        return ValidationReport {
            errors: vec![NO_INPUT_SUPPLIED.to_string()],
            data,
        };
    }

    if !missing.is_empty() {
        errors.push(format!("Missing required fields: {}", missing.join(", ")));
    }

    ValidationReport { errors, data }
}
