//! In-memory implementation of the entity stores for testing and development
//!
//! One backend owns the three tables behind a single `RwLock`, so every write
//! (including its constraint checks and cascades) happens under one guard and
//! is all-or-nothing. Constraint names mirror the relational schema the
//! service was designed against.

use crate::core::entity::Entity;
use crate::core::error::{ConstraintViolation, StoreError};
use crate::core::field::FieldValue;
use crate::core::query::{ListQuery, SortOrder};
use crate::core::service::EntityStore;
use crate::entities::{Book, Rating, ReadingList};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct CatalogTables {
    books: IndexMap<String, Book>,
    reading_lists: IndexMap<String, ReadingList>,
    ratings: IndexMap<String, Rating>,
}

/// In-memory catalog backend. Cloning shares the underlying tables.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    tables: Arc<RwLock<CatalogTables>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, CatalogTables>, StoreError> {
        self.tables.read().map_err(|e| StoreError::Backend {
            message: format!("failed to acquire read lock: {}", e),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, CatalogTables>, StoreError> {
        self.tables.write().map_err(|e| StoreError::Backend {
            message: format!("failed to acquire write lock: {}", e),
        })
    }
}

/// Filter, sort and paginate rows; returns the page plus the post-filter total
fn page_rows<T: Entity>(rows: Vec<T>, query: &ListQuery, default_offset: u32) -> (Vec<T>, usize) {
    let filtered: Vec<T> = match &query.filter {
        Some((field, wanted)) => rows
            .into_iter()
            .filter(|row| {
                row.field_value(field)
                    .and_then(|value| value.as_str().map(|s| s == wanted))
                    .unwrap_or(false)
            })
            .collect(),
        None => rows,
    };
    let total = filtered.len();

    let (sort_field, order) = match &query.sort {
        Some(spec) => (spec.field.clone(), spec.order),
        None => (T::default_sort_field().to_string(), SortOrder::Asc),
    };
    let mut sorted = filtered;
    sorted.sort_by(|a, b| {
        let ordering = a
            .field_value(&sort_field)
            .unwrap_or(FieldValue::Null)
            .compare(&b.field_value(&sort_field).unwrap_or(FieldValue::Null));
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    let page = sorted
        .into_iter()
        .skip(query.skip(default_offset))
        .take(query.resolved_offset(default_offset) as usize)
        .collect();
    (page, total)
}

// =============================================================================
// Books
// =============================================================================

#[async_trait]
impl EntityStore<Book> for MemoryBackend {
    async fn insert(&self, record: Book) -> Result<Book, StoreError> {
        let mut tables = self.write()?;
        if tables.books.values().any(|b| b.isbn == record.isbn) {
            return Err(StoreError::Constraint(ConstraintViolation::unique(
                "uq_books_isbn",
                &["ISBN"],
                &[&record.isbn],
            )));
        }
        tables.books.insert(record.book_id.clone(), record.clone());
        Ok(record)
    }

    async fn fetch(&self, id: &str) -> Result<Option<Book>, StoreError> {
        Ok(self.read()?.books.get(id).cloned())
    }

    async fn list(
        &self,
        query: &ListQuery,
        default_offset: u32,
    ) -> Result<(Vec<Book>, usize), StoreError> {
        let rows: Vec<Book> = self.read()?.books.values().cloned().collect();
        Ok(page_rows(rows, query, default_offset))
    }

    async fn update(&self, record: Book) -> Result<Book, StoreError> {
        let mut tables = self.write()?;
        if !tables.books.contains_key(&record.book_id) {
            return Err(StoreError::Missing {
                entity: "book",
                id: record.book_id,
            });
        }
        if tables
            .books
            .values()
            .any(|b| b.isbn == record.isbn && b.book_id != record.book_id)
        {
            return Err(StoreError::Constraint(ConstraintViolation::unique(
                "uq_books_isbn",
                &["ISBN"],
                &[&record.isbn],
            )));
        }
        tables.books.insert(record.book_id.clone(), record.clone());
        Ok(record)
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.write()?;
        if tables.books.shift_remove(id).is_none() {
            return Ok(false);
        }
        // Cascade: the book's reading-list entries go, and with them (or via
        // the direct book reference) its ratings.
        tables.reading_lists.retain(|_, entry| entry.book_id != id);
        tables.ratings.retain(|_, rating| rating.book_id != id);
        Ok(true)
    }
}

// =============================================================================
// Reading lists
// =============================================================================

fn check_reading_list_writes(
    tables: &CatalogTables,
    record: &ReadingList,
) -> Result<(), StoreError> {
    if !tables.books.contains_key(&record.book_id) {
        return Err(StoreError::Constraint(ConstraintViolation::foreign_key(
            "fk_reading_lists_book_id",
            "book_id",
            &record.book_id,
        )));
    }
    if tables
        .reading_lists
        .values()
        .any(|entry| entry.book_id == record.book_id && entry.list_id != record.list_id)
    {
        return Err(StoreError::Constraint(ConstraintViolation::unique(
            "uq_reading_lists_book_id",
            &["book_id"],
            &[&record.book_id],
        )));
    }
    Ok(())
}

#[async_trait]
impl EntityStore<ReadingList> for MemoryBackend {
    async fn insert(&self, record: ReadingList) -> Result<ReadingList, StoreError> {
        let mut tables = self.write()?;
        check_reading_list_writes(&tables, &record)?;
        tables
            .reading_lists
            .insert(record.list_id.clone(), record.clone());
        Ok(record)
    }

    async fn fetch(&self, id: &str) -> Result<Option<ReadingList>, StoreError> {
        Ok(self.read()?.reading_lists.get(id).cloned())
    }

    async fn list(
        &self,
        query: &ListQuery,
        default_offset: u32,
    ) -> Result<(Vec<ReadingList>, usize), StoreError> {
        let rows: Vec<ReadingList> = self.read()?.reading_lists.values().cloned().collect();
        Ok(page_rows(rows, query, default_offset))
    }

    async fn update(&self, record: ReadingList) -> Result<ReadingList, StoreError> {
        let mut tables = self.write()?;
        if !tables.reading_lists.contains_key(&record.list_id) {
            return Err(StoreError::Missing {
                entity: "reading_list",
                id: record.list_id,
            });
        }
        check_reading_list_writes(&tables, &record)?;
        tables
            .reading_lists
            .insert(record.list_id.clone(), record.clone());
        Ok(record)
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut tables = self.write()?;
        if tables.reading_lists.shift_remove(id).is_none() {
            return Ok(false);
        }
        tables.ratings.retain(|_, rating| rating.list_id != id);
        Ok(true)
    }
}

// =============================================================================
// Ratings
// =============================================================================

fn check_rating_writes(tables: &CatalogTables, record: &Rating) -> Result<(), StoreError> {
    if !tables.books.contains_key(&record.book_id) {
        return Err(StoreError::Constraint(ConstraintViolation::foreign_key(
            "fk_book_ratings_book_id",
            "book_id",
            &record.book_id,
        )));
    }
    if !tables.reading_lists.contains_key(&record.list_id) {
        return Err(StoreError::Constraint(ConstraintViolation::foreign_key(
            "fk_book_ratings_list_id",
            "list_id",
            &record.list_id,
        )));
    }
    if tables.ratings.values().any(|rating| {
        rating.book_id == record.book_id
            && rating.list_id == record.list_id
            && rating.rating_id != record.rating_id
    }) {
        return Err(StoreError::Constraint(ConstraintViolation::unique(
            "uq_book_list",
            &["book_id", "list_id"],
            &[&record.book_id, &record.list_id],
        )));
    }
    Ok(())
}

#[async_trait]
impl EntityStore<Rating> for MemoryBackend {
    async fn insert(&self, record: Rating) -> Result<Rating, StoreError> {
        let mut tables = self.write()?;
        check_rating_writes(&tables, &record)?;
        tables
            .ratings
            .insert(record.rating_id.clone(), record.clone());
        Ok(record)
    }

    async fn fetch(&self, id: &str) -> Result<Option<Rating>, StoreError> {
        Ok(self.read()?.ratings.get(id).cloned())
    }

    async fn list(
        &self,
        query: &ListQuery,
        default_offset: u32,
    ) -> Result<(Vec<Rating>, usize), StoreError> {
        let rows: Vec<Rating> = self.read()?.ratings.values().cloned().collect();
        Ok(page_rows(rows, query, default_offset))
    }

    async fn update(&self, record: Rating) -> Result<Rating, StoreError> {
        let mut tables = self.write()?;
        if !tables.ratings.contains_key(&record.rating_id) {
            return Err(StoreError::Missing {
                entity: "rating",
                id: record.rating_id,
            });
        }
        check_rating_writes(&tables, &record)?;
        tables
            .ratings
            .insert(record.rating_id.clone(), record.clone());
        Ok(record)
    }

    async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.write()?.ratings.shift_remove(id).is_some())
    }
}

// =============================================================================
// Tests
// =============================================================================
