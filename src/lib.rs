//! # Readshelf
//!
//! The storage-agnostic core of a book catalog and reading-list service.
//!
//! ## Features
//!
//! - **Schema-Driven Validation**: Per-field assertions with aggregated,
//!   human-readable error messages
//! - **Deterministic Serialization**: Records render in declared field order,
//!   with null fields dropped and timestamps in a fixed UTC format
//! - **Generic Access Layer**: One `EntityAccess` implementation drives
//!   create/get/list/update/delete for every entity
//! - **Structured Constraint Signals**: Uniqueness and foreign-key violations
//!   surface as typed values, never as parsed driver diagnostics
//! - **Pluggable Storage**: Backends implement a single async `EntityStore`
//!   trait; an in-memory backend ships for tests and development
//! - **Automatic Timestamps**: created_at and updated_at managed by the
//!   access layer, never settable by callers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use readshelf::prelude::*;
//!
//! let ctx = AppContext::new(ServiceConfig::default());
//! let backend = MemoryBackend::new();
//! let books: EntityAccess<Book, _> = EntityAccess::new(backend.clone(), ctx.clone());
//!
//! let input = json!({
//!     "ISBN": "9783161484100",
//!     "title": "The Rust Programming Language",
//!     "author": "Klabnik & Nichols",
//! });
//! let created = books.create(input.as_object().unwrap()).await?;
//! let book_id = created["book_id"].as_str().unwrap();
//!
//! let fetched = books.get(book_id).await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        access::EntityAccess,
        entity::Entity,
        error::{ConstraintKind, ConstraintViolation, ShelfError, StoreError},
        field::FieldValue,
        query::{ListQuery, SortOrder, SortSpec},
        schema::{EntitySchema, FieldSchema, FieldType},
        serialize::serialize_entity,
        service::EntityStore,
        validation::{validate, ValidationReport},
    };

    // === Entities ===
    pub use crate::entities::{Book, Rating, ReadingList, STATUS_OPTIONS};

    // === Configuration ===
    pub use crate::config::{init_tracing, AppContext, ServiceConfig};

    // === Storage ===
    pub use crate::storage::MemoryBackend;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde_json::{json, Map, Value};
    pub use uuid::Uuid;
}
