//! Typed error handling for the access-layer boundary
//!
//! Every failure an operation can surface is converted to one of these types
//! before it leaves the access layer; no panic or raw storage error crosses
//! into the caller. Constraint violations are structured signals (constraint
//! name plus conflicting fields) built by the storage adapter, never parsed out
//! of a driver-specific diagnostic string, so the detail stays portable across
//! backends.

use serde_json::{json, Value};
use std::fmt;

// =============================================================================
// Constraint violations (produced by storage adapters)
// =============================================================================

/// Whether a constraint is a uniqueness rule or a reference to another table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
}

/// Structured description of a rejected write
#[derive(Debug, Clone)]
pub struct ConstraintViolation {
    /// Constraint name, e.g. `uq_books_isbn`
    pub constraint: &'static str,
    pub kind: ConstraintKind,
    /// Columns covered by the constraint
    pub fields: Vec<&'static str>,
    /// Conflicting values, matching `fields` positionally
    pub values: Vec<String>,
}

impl ConstraintViolation {
    pub fn unique(constraint: &'static str, fields: &[&'static str], values: &[&str]) -> Self {
        Self {
            constraint,
            kind: ConstraintKind::Unique,
            fields: fields.to_vec(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn foreign_key(constraint: &'static str, field: &'static str, value: &str) -> Self {
        Self {
            constraint,
            kind: ConstraintKind::ForeignKey,
            fields: vec![field],
            values: vec![value.to_string()],
        }
    }

    /// Human-readable detail naming the columns and conflicting values
    pub fn detail(&self) -> String {
        let fields = self.fields.join(", ");
        let values = self.values.join(", ");
        match self.kind {
            ConstraintKind::Unique => {
                format!("Key ({})=({}) already exists", fields, values)
            }
            ConstraintKind::ForeignKey => {
                format!("Key ({})=({}) is not present in referenced table", fields, values)
            }
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.detail())
    }
}

// =============================================================================
// Storage errors
// =============================================================================

/// Errors surfaced by a storage backend
#[derive(Debug, Clone)]
pub enum StoreError {
    /// A uniqueness or foreign-key rule rejected the write
    Constraint(ConstraintViolation),

    /// The row addressed by an update does not exist
    Missing { entity: &'static str, id: String },

    /// Any other backend failure (lock poisoning, connection loss, ...)
    Backend { message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Constraint(violation) => write!(f, "{}", violation),
            StoreError::Missing { entity, id } => {
                write!(f, "{} with id '{}' does not exist", entity, id)
            }
            StoreError::Backend { message } => write!(f, "Storage backend error: {}", message),
        }
    }
}

impl std::error::Error for StoreError {}

// =============================================================================
// Access-layer errors
// =============================================================================

/// The error type every access-layer operation returns
#[derive(Debug, Clone)]
pub enum ShelfError {
    /// Schema violations, one message per field (HTTP 400)
    Validation(Vec<String>),

    /// Identity lookup miss (HTTP 404)
    NotFound { entity: &'static str, id: String },

    /// Uniqueness or foreign-key violation at write time (HTTP 400)
    Constraint(ConstraintViolation),

    /// Any other persistence failure; full detail is logged, the caller gets a
    /// generic message (HTTP 400)
    Storage { message: String },
}

impl fmt::Display for ShelfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShelfError::Validation(errors) => write!(f, "{}", errors.join(", ")),
            ShelfError::NotFound { entity, id } => {
                write!(f, "No such {} found: {}", entity, id)
            }
            ShelfError::Constraint(violation) => write!(f, "{}", violation),
            ShelfError::Storage { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ShelfError {}

impl ShelfError {
    /// HTTP status the transport layer should map this error to
    pub fn status_code(&self) -> u16 {
        match self {
            ShelfError::Validation(_) => 400,
            ShelfError::NotFound { .. } => 404,
            ShelfError::Constraint(_) => 400,
            ShelfError::Storage { .. } => 400,
        }
    }

    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ShelfError::Validation(_) => "VALIDATION_ERROR",
            ShelfError::NotFound { .. } => "NOT_FOUND",
            ShelfError::Constraint(_) => "CONSTRAINT_VIOLATION",
            ShelfError::Storage { .. } => "STORAGE_ERROR",
        }
    }

    /// `{"error": ...}` body ready for JSON encoding
    pub fn to_response(&self) -> Value {
        match self {
            ShelfError::Validation(errors) => json!({ "error": errors }),
            other => json!({ "error": other.to_string() }),
        }
    }
}

impl From<StoreError> for ShelfError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Constraint(violation) => ShelfError::Constraint(violation),
            StoreError::Missing { entity, id } => ShelfError::NotFound { entity, id },
            StoreError::Backend { message } => ShelfError::Storage { message },
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
