//! Per-book, per-list rating

use crate::core::entity::{expect_integer, expect_string, not_settable, Entity};
use crate::core::field::FieldValue;
use crate::core::schema::{EntitySchema, FieldSchema};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::OnceLock;

/// A rating attached to one book on one reading-list entry. The
/// `(book_id, list_id)` pair is unique: at most one rating per book per entry.
/// Both references are frozen after creation; only `rating` and `notes` may
/// change via update.
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub rating_id: String,
    pub book_id: String,
    pub list_id: String,
    pub rating: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

static SCHEMA: OnceLock<EntitySchema> = OnceLock::new();

impl Entity for Rating {
    fn resource_name() -> &'static str {
        "rating"
    }

    fn resource_name_plural() -> &'static str {
        "ratings"
    }

    fn id_field() -> &'static str {
        "rating_id"
    }

    fn default_sort_field() -> &'static str {
        "created_at"
    }

    fn declared_fields() -> &'static [&'static str] {
        &[
            "rating_id",
            "book_id",
            "list_id",
            "rating",
            "notes",
            "created_at",
            "updated_at",
        ]
    }

    fn schema() -> &'static EntitySchema {
        SCHEMA.get_or_init(|| {
            let mut schema = EntitySchema::new();
            schema.insert("book_id", FieldSchema::string(true, 32, 32));
            schema.insert("list_id", FieldSchema::string(true, 32, 32));
            schema.insert("rating", FieldSchema::integer(true, 0, 5));
            schema.insert("notes", FieldSchema::string(false, 0, 500));
            schema
        })
    }

    fn restricted_on_create() -> &'static [&'static str] {
        &["rating_id", "created_at", "updated_at"]
    }

    fn restricted_on_update() -> &'static [&'static str] {
        &["rating_id", "created_at", "updated_at", "book_id", "list_id"]
    }

    fn new_record(id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            rating_id: id,
            book_id: String::new(),
            list_id: String::new(),
            rating: 0,
            notes: None,
            created_at,
            updated_at: None,
        }
    }

    fn id(&self) -> &str {
        &self.rating_id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "rating_id" => Some(FieldValue::from(self.rating_id.as_str())),
            "book_id" => Some(FieldValue::from(self.book_id.as_str())),
            "list_id" => Some(FieldValue::from(self.list_id.as_str())),
            "rating" => Some(FieldValue::Integer(self.rating)),
            "notes" => Some(FieldValue::from(self.notes.clone())),
            "created_at" => Some(FieldValue::DateTime(self.created_at)),
            "updated_at" => Some(FieldValue::from(self.updated_at)),
            _ => None,
        }
    }

    fn apply_field(&mut self, field: &str, value: &Value) -> Result<(), String> {
        match field {
            "book_id" => self.book_id = expect_string("rating", field, value)?,
            "list_id" => self.list_id = expect_string("rating", field, value)?,
            "rating" => self.rating = expect_integer("rating", field, value)?,
            "notes" => self.notes = Some(expect_string("rating", field, value)?),
            _ => return Err(not_settable("rating", field)),
        }
        Ok(())
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_bounds() {
        let schema = Rating::schema();
        assert_eq!(schema["rating"].min_value, 0.0);
        assert_eq!(schema["rating"].max_value, 5.0);
        assert_eq!(schema["book_id"].min_length, 32);
        assert_eq!(schema["book_id"].max_length, 32);
        assert!(!schema["notes"].required);
    }

    #[test]
    fn test_references_frozen_on_update() {
        let restricted = Rating::restricted_on_update();
        assert!(restricted.contains(&"book_id"));
        assert!(restricted.contains(&"list_id"));
        // but settable at creation
        assert!(!Rating::restricted_on_create().contains(&"book_id"));
    }

    #[test]
    fn test_apply_field_integer_rating() {
        let mut rating = Rating::new_record("x".repeat(32), Utc::now());
        rating.apply_field("rating", &json!(4)).unwrap();
        assert_eq!(rating.rating, 4);
        assert!(rating.apply_field("rating", &json!("4")).is_err());
    }

    #[test]
    fn test_notes_optional_and_unset_serializes_null() {
        let rating = Rating::new_record("x".repeat(32), Utc::now());
        assert!(rating.field_value("notes").unwrap().is_null());
    }
}
