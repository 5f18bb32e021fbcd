//! Entity access layer
//!
//! One generic component composes the validator, the serializer and a storage
//! handle into the create/get/list/update/delete operations every entity
//! exposes. Identity and timestamps are always server-assigned; clients can
//! never set them. All failures come back as [`ShelfError`]; nothing panics
//! across this boundary.

use crate::config::AppContext;
use crate::core::entity::Entity;
use crate::core::error::{ShelfError, StoreError};
use crate::core::query::ListQuery;
use crate::core::serialize::serialize_entity;
use crate::core::service::EntityStore;
use crate::core::validation::{filters, validate};
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::marker::PhantomData;

/// Access layer for one entity type over one storage backend
pub struct EntityAccess<T: Entity, S: EntityStore<T>> {
    store: S,
    ctx: AppContext,
    _entity: PhantomData<T>,
}

impl<T: Entity, S: EntityStore<T>> EntityAccess<T, S> {
    pub fn new(store: S, ctx: AppContext) -> Self {
        Self {
            store,
            ctx,
            _entity: PhantomData,
        }
    }

    /// Create a new record from untrusted input.
    ///
    /// Input is validated against the entity schema with the
    /// creation-restricted fields skipped, then the sanitized values are
    /// copied onto a fresh record with a generated 32-hex identity and a
    /// creation timestamp. A storage constraint violation surfaces as a
    /// [`ShelfError::Constraint`] with nothing persisted.
    ///
    /// Returns `{"<entity>_id": "<generated id>"}`.
    pub async fn create(&self, input: &Map<String, Value>) -> Result<Map<String, Value>, ShelfError> {
        tracing::info!(
            service = %self.ctx.config.service_id,
            resource = T::resource_name(),
            "create request received"
        );

        let report = validate(input, T::schema(), T::restricted_on_create(), true);
        if !report.is_valid() {
            tracing::warn!(
                resource = T::resource_name(),
                errors = ?report.errors,
                "validation failed for create"
            );
            return Err(ShelfError::Validation(report.errors));
        }

        let mut record = T::new_record(T::generate_id(), Utc::now());
        for field in T::declared_fields() {
            if T::restricted_on_create().contains(field) {
                continue;
            }
            if let Some(value) = report.data.get(*field) {
                record
                    .apply_field(field, value)
                    .map_err(|message| ShelfError::Validation(vec![message]))?;
            }
        }

        let inserted = self
            .store
            .insert(record)
            .await
            .map_err(|err| self.store_failure("create", err))?;

        tracing::info!(
            resource = T::resource_name(),
            id = %inserted.id(),
            "record created"
        );

        let mut payload = Map::new();
        payload.insert(
            T::id_field().to_string(),
            Value::String(inserted.id().to_string()),
        );
        Ok(payload)
    }

    /// Fetch one record by identity as its transport representation.
    /// `Ok(None)` means not found; the caller maps it to 404.
    pub async fn get(&self, id: &str) -> Result<Option<Map<String, Value>>, ShelfError> {
        let record = self
            .store
            .fetch(id)
            .await
            .map_err(|err| self.store_failure("get", err))?;
        Ok(record.map(|record| serialize_entity(&record, &[])))
    }

    /// List records with filtering, sorting and pagination.
    ///
    /// Rows sort by the requested column, or the entity's default column
    /// ascending. The response carries the serialized rows under the plural
    /// key plus `<entity>_count` (post-filter, pre-pagination total),
    /// `page_number` and `page_offset`. No rows is an empty list, not an
    /// error.
    pub async fn list(&self, query: &ListQuery) -> Result<Map<String, Value>, ShelfError> {
        let default_offset = self.ctx.config.page_offset;
        let (rows, total) = self
            .store
            .list(query, default_offset)
            .await
            .map_err(|err| self.store_failure("list", err))?;

        tracing::info!(
            resource = T::resource_name(),
            count = total,
            page = query.resolved_page(),
            "list request served"
        );

        let serialized: Vec<Value> = rows
            .iter()
            .map(|record| Value::Object(serialize_entity(record, &[])))
            .collect();

        let mut payload = Map::new();
        payload.insert(T::resource_name_plural().to_string(), Value::Array(serialized));
        payload.insert(format!("{}_count", T::resource_name()), json!(total));
        payload.insert("page_number".to_string(), json!(query.resolved_page()));
        payload.insert(
            "page_offset".to_string(),
            json!(query.resolved_offset(default_offset)),
        );
        Ok(payload)
    }

    /// Partial update of an existing record.
    ///
    /// Unknown keys and update-restricted fields are rejected outright with a
    /// message naming them. Accepted values are applied and the merged record
    /// is then validated with the same schema create uses, so an update can
    /// never persist a value create would have refused. On success the
    /// mutation timestamp is set and the record persisted.
    ///
    /// Returns `{"message": "successfully updated <entity>_id=<id>"}`.
    pub async fn update(
        &self,
        id: &str,
        input: &Map<String, Value>,
    ) -> Result<Map<String, Value>, ShelfError> {
        let Some(mut record) = self
            .store
            .fetch(id)
            .await
            .map_err(|err| self.store_failure("update", err))?
        else {
            tracing::warn!(resource = T::resource_name(), id, "update target not found");
            return Err(ShelfError::NotFound {
                entity: T::resource_name(),
                id: id.to_string(),
            });
        };

        let mut rejected = Vec::new();
        for key in input.keys() {
            if !T::declared_fields().contains(&key.as_str()) {
                rejected.push(format!("{} is not a field of {}", key, T::resource_name()));
            } else if T::restricted_on_update().contains(&key.as_str()) {
                rejected.push(format!("{} cannot be changed via update", key));
            }
        }
        if !rejected.is_empty() {
            tracing::warn!(
                resource = T::resource_name(),
                id,
                errors = ?rejected,
                "update rejected restricted or unknown fields"
            );
            return Err(ShelfError::Validation(rejected));
        }

        for (key, raw) in input {
            let value = filters::trim(raw);
            record
                .apply_field(key, &value)
                .map_err(|message| ShelfError::Validation(vec![message]))?;
        }

        // Input strings were already trimmed above, so the merged record is
        // validated without re-sanitizing.
        let merged = serialize_entity(&record, &[]);
        let report = validate(&merged, T::schema(), T::restricted_on_update(), false);
        if !report.is_valid() {
            tracing::warn!(
                resource = T::resource_name(),
                id,
                errors = ?report.errors,
                "validation failed for update"
            );
            return Err(ShelfError::Validation(report.errors));
        }

        record.touch(Utc::now());
        self.store
            .update(record)
            .await
            .map_err(|err| self.store_failure("update", err))?;

        tracing::info!(resource = T::resource_name(), id, "record updated");

        let mut payload = Map::new();
        payload.insert(
            "message".to_string(),
            Value::String(format!("successfully updated {}={}", T::id_field(), id)),
        );
        Ok(payload)
    }

    /// Permanently delete a record.
    ///
    /// `Ok(None)` when the identity is unknown. Dependent rows (a book's
    /// reading-list entries, a list's ratings) are removed in the same write
    /// by the storage backend.
    pub async fn delete(&self, id: &str) -> Result<Option<Map<String, Value>>, ShelfError> {
        let existed = self
            .store
            .remove(id)
            .await
            .map_err(|err| self.store_failure("delete", err))?;
        if !existed {
            tracing::warn!(resource = T::resource_name(), id, "delete target not found");
            return Ok(None);
        }

        tracing::info!(resource = T::resource_name(), id, "record deleted");

        let mut payload = Map::new();
        payload.insert(
            "message".to_string(),
            Value::String(format!("successfully deleted {}={}", T::id_field(), id)),
        );
        payload.insert(
            "action".to_string(),
            Value::String("deleted successfully".to_string()),
        );
        Ok(Some(payload))
    }

    /// Log a storage failure and convert it for the caller. Backend failures
    /// keep their detail in the log only; the caller sees a generic message.
    fn store_failure(&self, operation: &str, err: StoreError) -> ShelfError {
        match &err {
            StoreError::Constraint(violation) => {
                tracing::warn!(
                    resource = T::resource_name(),
                    operation,
                    constraint = violation.constraint,
                    detail = %violation,
                    "constraint violation"
                );
                err.into()
            }
            StoreError::Missing { .. } => err.into(),
            StoreError::Backend { message } => {
                tracing::error!(
                    resource = T::resource_name(),
                    operation,
                    error = %message,
                    "storage failure"
                );
                ShelfError::Storage {
                    message: format!("failed to {} {}", operation, T::resource_name()),
                }
            }
        }
    }
}
