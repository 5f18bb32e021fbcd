//! Book catalog entry

use crate::core::entity::{expect_string, not_settable, Entity};
use crate::core::field::FieldValue;
use crate::core::schema::{EntitySchema, FieldSchema};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::OnceLock;

/// A book in the catalog. The ISBN is globally unique; the serialized field
/// name keeps its historical uppercase spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub book_id: String,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

static SCHEMA: OnceLock<EntitySchema> = OnceLock::new();

impl Entity for Book {
    fn resource_name() -> &'static str {
        "book"
    }

    fn resource_name_plural() -> &'static str {
        "books"
    }

    fn id_field() -> &'static str {
        "book_id"
    }

    fn default_sort_field() -> &'static str {
        "title"
    }

    fn declared_fields() -> &'static [&'static str] {
        &["book_id", "ISBN", "title", "author", "created_at", "updated_at"]
    }

    fn schema() -> &'static EntitySchema {
        SCHEMA.get_or_init(|| {
            let mut schema = EntitySchema::new();
            schema.insert("ISBN", FieldSchema::string(true, 10, 20));
            schema.insert("title", FieldSchema::string(true, 1, 100));
            schema.insert("author", FieldSchema::string(true, 1, 100));
            schema
        })
    }

    fn restricted_on_create() -> &'static [&'static str] {
        &["book_id", "created_at", "updated_at"]
    }

    fn restricted_on_update() -> &'static [&'static str] {
        &["book_id", "created_at", "updated_at"]
    }

    fn new_record(id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            book_id: id,
            isbn: String::new(),
            title: String::new(),
            author: String::new(),
            created_at,
            updated_at: None,
        }
    }

    fn id(&self) -> &str {
        &self.book_id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "book_id" => Some(FieldValue::from(self.book_id.as_str())),
            "ISBN" => Some(FieldValue::from(self.isbn.as_str())),
            "title" => Some(FieldValue::from(self.title.as_str())),
            "author" => Some(FieldValue::from(self.author.as_str())),
            "created_at" => Some(FieldValue::DateTime(self.created_at)),
            "updated_at" => Some(FieldValue::from(self.updated_at)),
            _ => None,
        }
    }

    fn apply_field(&mut self, field: &str, value: &Value) -> Result<(), String> {
        match field {
            "ISBN" => self.isbn = expect_string("book", field, value)?,
            "title" => self.title = expect_string("book", field, value)?,
            "author" => self.author = expect_string("book", field, value)?,
            _ => return Err(not_settable("book", field)),
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
    fn test_schema_declares_required_fields() {
        let schema = Book::schema();
        assert!(schema["ISBN"].required);
        assert!(schema["title"].required);
        assert!(schema["author"].required);
        assert_eq!(schema["ISBN"].min_length, 10);
        assert_eq!(schema["ISBN"].max_length, 20);
    }

    #[test]
    fn test_apply_field_sets_columns() {
        let mut book = Book::new_record("x".repeat(32), Utc::now());
        book.apply_field("ISBN", &json!("9783161484100")).unwrap();
        book.apply_field("title", &json!("T")).unwrap();
        assert_eq!(book.isbn, "9783161484100");
        assert_eq!(book.title, "T");
    }

    #[test]
    fn test_apply_field_rejects_identity_and_unknown() {
        let mut book = Book::new_record("x".repeat(32), Utc::now());
        assert!(book.apply_field("book_id", &json!("y")).is_err());
        assert!(book.apply_field("publisher", &json!("z")).is_err());
    }

    #[test]
    fn test_apply_field_rejects_wrong_type() {
        let mut book = Book::new_record("x".repeat(32), Utc::now());
        let err = book.apply_field("title", &json!(42)).unwrap_err();
        assert_eq!(err, "book.title expects a string value");
    }

    #[test]
    fn test_field_value_unknown_is_none() {
        let book = Book::new_record("x".repeat(32), Utc::now());
        assert!(book.field_value("publisher").is_none());
    }

    #[test]
    fn test_touch_sets_updated_at() {
        let mut book = Book::new_record("x".repeat(32), Utc::now());
        assert!(book.updated_at.is_none());
        let now = Utc::now();
        book.touch(now);
        assert_eq!(book.updated_at, Some(now));
    }
}
