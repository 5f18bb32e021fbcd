//! Per-book reading-list entry

use crate::core::entity::{expect_string, not_settable, Entity};
use crate::core::field::FieldValue;
use crate::core::schema::{EntitySchema, FieldSchema};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::OnceLock;

/// Reading statuses a list entry may hold
pub const STATUS_OPTIONS: [&str; 3] = ["unread", "in_progress", "finished"];

/// A reading-list entry. Each book has at most one active entry; the book
/// reference must exist and deleting the book deletes the entry with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingList {
    pub list_id: String,
    pub book_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

static SCHEMA: OnceLock<EntitySchema> = OnceLock::new();

impl Entity for ReadingList {
    fn resource_name() -> &'static str {
        "reading_list"
    }

    fn resource_name_plural() -> &'static str {
        "reading_lists"
    }

    fn id_field() -> &'static str {
        "list_id"
    }

    fn default_sort_field() -> &'static str {
        "created_at"
    }

    fn declared_fields() -> &'static [&'static str] {
        &["list_id", "book_id", "status", "created_at", "updated_at"]
    }

    fn schema() -> &'static EntitySchema {
        SCHEMA.get_or_init(|| {
            let mut schema = EntitySchema::new();
            schema.insert("book_id", FieldSchema::string(true, 1, 50));
            schema.insert("status", FieldSchema::enumeration(true, &STATUS_OPTIONS));
            schema
        })
    }

    fn restricted_on_create() -> &'static [&'static str] {
        &["list_id", "created_at", "updated_at"]
    }

    fn restricted_on_update() -> &'static [&'static str] {
        &["list_id", "created_at", "updated_at"]
    }

    fn new_record(id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            list_id: id,
            book_id: String::new(),
            status: "unread".to_string(),
            created_at,
            updated_at: None,
        }
    }

    fn id(&self) -> &str {
        &self.list_id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "list_id" => Some(FieldValue::from(self.list_id.as_str())),
            "book_id" => Some(FieldValue::from(self.book_id.as_str())),
            "status" => Some(FieldValue::from(self.status.as_str())),
            "created_at" => Some(FieldValue::DateTime(self.created_at)),
            "updated_at" => Some(FieldValue::from(self.updated_at)),
            _ => None,
        }
    }

    fn apply_field(&mut self, field: &str, value: &Value) -> Result<(), String> {
        match field {
            "book_id" => self.book_id = expect_string("reading_list", field, value)?,
            "status" => self.status = expect_string("reading_list", field, value)?,
            _ => return Err(not_settable("reading_list", field)),
        }
        Ok(())
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}
