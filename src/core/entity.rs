//! Entity trait defining the core abstraction for all catalog record types
//!
//! Column enumeration is static and explicit: every entity declares its field
//! list, schema and restricted sets once, and maps field names to values with
//! a plain match. No runtime reflection.

use crate::core::field::FieldValue;
use crate::core::schema::EntitySchema;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Base trait for all entities in the system.
///
/// All entities have a server-generated 32-hex identity, a creation timestamp
/// set once, and a mutation timestamp set on every update. Everything else is
/// entity-specific and surfaced through the declarative metadata below.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The singular resource name (e.g. "book")
    fn resource_name() -> &'static str;

    /// The plural resource name used as the rows key in list responses
    fn resource_name_plural() -> &'static str;

    /// Name of the identity field (e.g. "book_id")
    fn id_field() -> &'static str;

    /// Column used to sort list results when the caller supplies none
    fn default_sort_field() -> &'static str;

    /// Every storage-mapped field, in declaration order
    fn declared_fields() -> &'static [&'static str];

    /// The entity's validation schema
    fn schema() -> &'static EntitySchema;

    /// Fields the client may never set at creation (identity, timestamps)
    fn restricted_on_create() -> &'static [&'static str];

    /// Fields the client may never change via update
    fn restricted_on_update() -> &'static [&'static str];

    /// Blank record with server-assigned identity and creation timestamp
    fn new_record(id: String, created_at: DateTime<Utc>) -> Self;

    /// This record's identity value
    fn id(&self) -> &str;

    /// Value of a declared field, or `None` for an unknown name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Assign one settable field from a raw JSON value.
    ///
    /// Unknown names and fields the entity does not allow clients to write are
    /// rejected with a message; so are values of the wrong JSON type.
    fn apply_field(&mut self, field: &str, value: &Value) -> Result<(), String>;

    /// Record a mutation: set `updated_at`
    fn touch(&mut self, now: DateTime<Utc>);

    /// Generate a fresh 32-hex-character identity
    fn generate_id() -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Reject helper shared by `apply_field` implementations
pub fn not_settable(entity: &str, field: &str) -> String {
    format!("{} is not a settable field of {}", field, entity)
}

/// Extract a JSON string for assignment, with a consistent mismatch message
pub fn expect_string(entity: &str, field: &str, value: &Value) -> Result<String, String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| format!("{}.{} expects a string value", entity, field))
}

/// Extract a JSON integer for assignment, with a consistent mismatch message
pub fn expect_integer(entity: &str, field: &str, value: &Value) -> Result<i64, String> {
    value
        .as_i64()
        .ok_or_else(|| format!("{}.{} expects an integer value", entity, field))
}
