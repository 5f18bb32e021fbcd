//! Core module containing the validation, serialization and access machinery

pub mod access;
pub mod entity;
pub mod error;
pub mod field;
pub mod query;
pub mod schema;
pub mod serialize;
pub mod service;
pub mod validation;

pub use access::EntityAccess;
pub use entity::Entity;
pub use error::{ConstraintKind, ConstraintViolation, ShelfError, StoreError};
pub use field::FieldValue;
pub use query::{ListQuery, SortOrder, SortSpec};
pub use schema::{EntitySchema, FieldSchema, FieldType};
pub use serialize::serialize_entity;
pub use service::EntityStore;
pub use validation::{validate, ValidationReport};
