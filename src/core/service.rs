//! Storage seam for entity persistence
//!
//! The access layer talks to storage only through this trait. Uniqueness and
//! foreign-key invariants are enforced by the implementation at write time;
//! the access layer never pre-checks, it attempts the write and interprets a
//! [`StoreError::Constraint`] as the error signal. Every write is
//! all-or-nothing: a rejected write leaves no partial row visible.

use crate::core::entity::Entity;
use crate::core::error::StoreError;
use crate::core::query::ListQuery;
use async_trait::async_trait;

/// CRUD operations a backend provides for one entity type
#[async_trait]
pub trait EntityStore<T: Entity>: Send + Sync {
    /// Insert a new record; a violated constraint rejects the whole write
    async fn insert(&self, record: T) -> Result<T, StoreError>;

    /// Fetch a record by identity
    async fn fetch(&self, id: &str) -> Result<Option<T>, StoreError>;

    /// List records: filter, sort, paginate.
    ///
    /// Returns the page of rows plus the total row count after filtering but
    /// before pagination.
    async fn list(&self, query: &ListQuery, default_offset: u32)
        -> Result<(Vec<T>, usize), StoreError>;

    /// Replace an existing record; `Missing` if the identity is unknown
    async fn update(&self, record: T) -> Result<T, StoreError>;

    /// Remove a record permanently. Returns whether a record existed.
    /// Cascading deletes (a book's reading-list entries, a list's ratings)
    /// happen inside the same write.
    async fn remove(&self, id: &str) -> Result<bool, StoreError>;
}
