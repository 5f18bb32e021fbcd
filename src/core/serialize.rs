//! Entity to transport-safe representation
//!
//! Renders a typed record as a JSON object ready for encoding: declared fields
//! in declaration order, unset fields omitted entirely, dates and timestamps as
//! canonical strings.

use crate::core::entity::Entity;
use crate::core::field::FieldValue;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Number, Value};

/// Canonical date-only rendering: `YYYY-MM-DD`
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Canonical timestamp rendering: `YYYY-MM-DDTHH:MM:SSZ` (UTC, whole seconds)
pub fn format_datetime(datetime: &DateTime<Utc>) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Serialize a record to a JSON object.
///
/// Fields render in declaration order. Null values and fields named in
/// `hide_fields` are dropped, not emitted as JSON null. A value that cannot be
/// represented (a non-finite float) is rendered as absent rather than failing
/// the whole serialization.
pub fn serialize_entity<T: Entity>(record: &T, hide_fields: &[&str]) -> Map<String, Value> {
    let mut out = Map::new();
    for field in T::declared_fields() {
        if hide_fields.contains(field) {
            continue;
        }
        let Some(value) = record.field_value(field) else {
            continue;
        };
        if let Some(json) = field_to_json(&value) {
            out.insert((*field).to_string(), json);
        }
    }
    out
}

fn field_to_json(value: &FieldValue) -> Option<Value> {
    match value {
        FieldValue::String(s) => Some(Value::String(s.clone())),
        FieldValue::Integer(i) => Some(Value::Number(Number::from(*i))),
        FieldValue::Float(f) => Number::from_f64(*f).map(Value::Number),
        FieldValue::Boolean(b) => Some(Value::Bool(*b)),
        FieldValue::Date(d) => Some(Value::String(format_date(d))),
        FieldValue::DateTime(dt) => Some(Value::String(format_datetime(dt))),
        FieldValue::Null => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Book;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_book() -> Book {
        let created = Utc.with_ymd_and_hms(2023, 2, 1, 10, 30, 0).unwrap();
        let mut book = Book::new_record("a".repeat(32), created);
        book.isbn = "9783161484100".to_string();
        book.title = "Some Title".to_string();
        book.author = "Some Author".to_string();
        book
    }

    #[test]
    fn test_declaration_order_preserved() {
        let book = sample_book();
        let out = serialize_entity(&book, &[]);
        let keys: Vec<_> = out.keys().cloned().collect();
        assert_eq!(
            keys,
            vec!["book_id", "ISBN", "title", "author", "created_at"]
        );
    }

    #[test]
    fn test_null_fields_omitted_not_nulled() {
        let book = sample_book();
        let out = serialize_entity(&book, &[]);
        // updated_at is unset on a fresh record
        assert!(!out.contains_key("updated_at"));
    }

    #[test]
    fn test_datetime_rendered_canonically() {
        let book = sample_book();
        let out = serialize_entity(&book, &[]);
        assert_eq!(out["created_at"], json!("2023-02-01T10:30:00Z"));
    }

    #[test]
    fn test_updated_at_appears_after_touch() {
        let mut book = sample_book();
        let touched = Utc.with_ymd_and_hms(2023, 2, 2, 8, 0, 0).unwrap();
        book.touch(touched);
        let out = serialize_entity(&book, &[]);
        assert_eq!(out["updated_at"], json!("2023-02-02T08:00:00Z"));
    }

    #[test]
    fn test_hide_fields_excluded() {
        let book = sample_book();
        let out = serialize_entity(&book, &["ISBN", "created_at"]);
        assert!(!out.contains_key("ISBN"));
        assert!(!out.contains_key("created_at"));
        assert_eq!(out["title"], json!("Some Title"));
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
        assert_eq!(format_date(&date), "2023-02-01");
    }

    #[test]
    fn test_non_finite_float_rendered_absent() {
        assert_eq!(field_to_json(&FieldValue::Float(f64::NAN)), None);
        assert_eq!(
            field_to_json(&FieldValue::Float(2.5)),
            Some(json!(2.5))
        );
    }
}
