//! End-to-end tests for the entity access layer
//!
//! These drive create/get/list/update/delete through `EntityAccess` over the
//! in-memory backend and check the exact payloads a transport layer would
//! forward to clients.

use readshelf::prelude::*;
use serde_json::{json, Map, Value};

fn object(value: Value) -> Map<String, Value> {
    value.as_object().unwrap().clone()
}

fn book_access() -> EntityAccess<Book, MemoryBackend> {
    EntityAccess::new(MemoryBackend::new(), AppContext::default())
}

fn valid_book() -> Map<String, Value> {
    object(json!({
        "ISBN": "9783161484100",
        "title": "The Left Hand of Darkness",
        "author": "Ursula K. Le Guin"
    }))
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_returns_generated_id() {
    let books = book_access();
    let payload = books.create(&valid_book()).await.unwrap();

    let id = payload["book_id"].as_str().unwrap();
    assert_eq!(id.len(), 32);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(payload.len(), 1);
}

#[tokio::test]
async fn test_create_missing_required_fields() {
    let books = book_access();
    let input = object(json!({ "title": "T" }));
    let err = books.create(&input).await.unwrap_err();

    match &err {
        ShelfError::Validation(errors) => {
            assert_eq!(errors, &vec!["Missing required fields: ISBN, author".to_string()]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
    assert_eq!(
        err.to_response(),
        json!({ "error": ["Missing required fields: ISBN, author"] })
    );
}

#[tokio::test]
async fn test_create_with_no_recognized_fields() {
    let books = book_access();
    let input = object(json!({ "publisher": "X" }));
    let err = books.create(&input).await.unwrap_err();
    match err {
        ShelfError::Validation(errors) => {
            assert_eq!(errors, vec!["No valid input data supplied".to_string()]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_ignores_client_supplied_identity() {
    let books = book_access();
    let mut input = valid_book();
    input.insert("book_id".to_string(), json!("forged-id"));
    input.insert("created_at".to_string(), json!("2000-01-01T00:00:00Z"));

    let payload = books.create(&input).await.unwrap();
    let id = payload["book_id"].as_str().unwrap();
    assert_ne!(id, "forged-id");

    let fetched = books.get(id).await.unwrap().unwrap();
    assert_ne!(fetched["created_at"], json!("2000-01-01T00:00:00Z"));
}

#[tokio::test]
async fn test_create_trims_string_input() {
    let books = book_access();
    let input = object(json!({
        "ISBN": "  9783161484100  ",
        "title": "  Padded  ",
        "author": "A"
    }));
    let payload = books.create(&input).await.unwrap();
    let fetched = books
        .get(payload["book_id"].as_str().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched["ISBN"], json!("9783161484100"));
    assert_eq!(fetched["title"], json!("Padded"));
}

// =============================================================================
// Get
// =============================================================================

#[tokio::test]
async fn test_get_serializes_in_declared_order_without_nulls() {
    let books = book_access();
    let payload = books.create(&valid_book()).await.unwrap();
    let id = payload["book_id"].as_str().unwrap();

    let fetched = books.get(id).await.unwrap().unwrap();
    let keys: Vec<&str> = fetched.keys().map(|k| k.as_str()).collect();
    // updated_at is unset on a fresh record and therefore absent
    assert_eq!(keys, vec!["book_id", "ISBN", "title", "author", "created_at"]);

    let created_at = fetched["created_at"].as_str().unwrap();
    assert!(created_at.ends_with('Z'));
    assert_eq!(created_at.len(), "2023-01-01T00:00:00Z".len());
}

#[tokio::test]
async fn test_get_unknown_id_is_none() {
    let books = book_access();
    assert!(books.get("does-not-exist").await.unwrap().is_none());
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_changes_field_and_sets_updated_at() {
    let books = book_access();
    let payload = books.create(&valid_book()).await.unwrap();
    let id = payload["book_id"].as_str().unwrap();

    let message = books
        .update(id, &object(json!({ "title": "Renamed" })))
        .await
        .unwrap();
    assert_eq!(
        message["message"],
        json!(format!("successfully updated book_id={}", id))
    );

    let fetched = books.get(id).await.unwrap().unwrap();
    assert_eq!(fetched["title"], json!("Renamed"));
    assert!(fetched.contains_key("updated_at"));
    // Untouched fields survive the merge
    assert_eq!(fetched["author"], json!("Ursula K. Le Guin"));
}

#[tokio::test]
async fn test_update_rejects_restricted_fields() {
    let books = book_access();
    let payload = books.create(&valid_book()).await.unwrap();
    let id = payload["book_id"].as_str().unwrap();

    let err = books
        .update(id, &object(json!({ "book_id": "other" })))
        .await
        .unwrap_err();
    match err {
        ShelfError::Validation(errors) => {
            assert_eq!(errors, vec!["book_id cannot be changed via update".to_string()]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_rejects_unknown_fields() {
    let books = book_access();
    let payload = books.create(&valid_book()).await.unwrap();
    let id = payload["book_id"].as_str().unwrap();

    let err = books
        .update(id, &object(json!({ "publisher": "X" })))
        .await
        .unwrap_err();
    match err {
        ShelfError::Validation(errors) => {
            assert_eq!(errors, vec!["publisher is not a field of book".to_string()]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_validates_the_merged_record() {
    let books = book_access();
    let payload = books.create(&valid_book()).await.unwrap();
    let id = payload["book_id"].as_str().unwrap();

    // An out-of-bounds ISBN is refused even though the field was supplied alone
    let err = books
        .update(id, &object(json!({ "ISBN": "123" })))
        .await
        .unwrap_err();
    match err {
        ShelfError::Validation(errors) => {
            assert_eq!(errors, vec!["ISBN should be between 10 and 20 characters".to_string()]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    // Nothing was persisted
    let fetched = books.get(id).await.unwrap().unwrap();
    assert_eq!(fetched["ISBN"], json!("9783161484100"));
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let books = book_access();
    let err = books
        .update("missing", &object(json!({ "title": "T" })))
        .await
        .unwrap_err();
    assert!(matches!(err, ShelfError::NotFound { entity: "book", .. }));
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.to_response(), json!({ "error": "No such book found: missing" }));
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_returns_confirmation() {
    let books = book_access();
    let payload = books.create(&valid_book()).await.unwrap();
    let id = payload["book_id"].as_str().unwrap();

    let confirmation = books.delete(id).await.unwrap().unwrap();
    assert_eq!(
        confirmation["message"],
        json!(format!("successfully deleted book_id={}", id))
    );
    assert_eq!(confirmation["action"], json!("deleted successfully"));

    assert!(books.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_unknown_id_is_none() {
    let books = book_access();
    assert!(books.delete("missing").await.unwrap().is_none());
}

// =============================================================================
// Reading lists and ratings through the same layer
// =============================================================================

#[tokio::test]
async fn test_reading_list_requires_status_on_create() {
    let backend = MemoryBackend::new();
    let ctx = AppContext::default();
    let books: EntityAccess<Book, _> = EntityAccess::new(backend.clone(), ctx.clone());
    let lists: EntityAccess<ReadingList, _> = EntityAccess::new(backend, ctx);

    let book = books.create(&valid_book()).await.unwrap();
    let book_id = book["book_id"].as_str().unwrap();

    let err = lists
        .create(&object(json!({ "book_id": book_id })))
        .await
        .unwrap_err();
    match err {
        ShelfError::Validation(errors) => {
            assert_eq!(errors, vec!["Missing required fields: status".to_string()]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    let entry = lists
        .create(&object(json!({ "book_id": book_id, "status": "in_progress" })))
        .await
        .unwrap();
    let fetched = lists
        .get(entry["list_id"].as_str().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched["status"], json!("in_progress"));
    assert_eq!(fetched["book_id"], json!(book_id));
}

#[tokio::test]
async fn test_reading_list_rejects_unknown_status() {
    let backend = MemoryBackend::new();
    let ctx = AppContext::default();
    let books: EntityAccess<Book, _> = EntityAccess::new(backend.clone(), ctx.clone());
    let lists: EntityAccess<ReadingList, _> = EntityAccess::new(backend, ctx);

    let book = books.create(&valid_book()).await.unwrap();
    let book_id = book["book_id"].as_str().unwrap();

    let err = lists
        .create(&object(json!({ "book_id": book_id, "status": "abandoned" })))
        .await
        .unwrap_err();
    match err {
        ShelfError::Validation(errors) => {
            assert_eq!(
                errors,
                vec![format!("status must be one of these {:?}", STATUS_OPTIONS)]
            );
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rating_bounds_enforced() {
    let backend = MemoryBackend::new();
    let ctx = AppContext::default();
    let books: EntityAccess<Book, _> = EntityAccess::new(backend.clone(), ctx.clone());
    let lists: EntityAccess<ReadingList, _> = EntityAccess::new(backend.clone(), ctx.clone());
    let ratings: EntityAccess<Rating, _> = EntityAccess::new(backend, ctx);

    let book = books.create(&valid_book()).await.unwrap();
    let book_id = book["book_id"].as_str().unwrap();
    let entry = lists
        .create(&object(json!({ "book_id": book_id, "status": "unread" })))
        .await
        .unwrap();
    let list_id = entry["list_id"].as_str().unwrap();

    let err = ratings
        .create(&object(json!({ "book_id": book_id, "list_id": list_id, "rating": 6 })))
        .await
        .unwrap_err();
    match err {
        ShelfError::Validation(errors) => {
            assert_eq!(errors, vec!["rating must be between 0 to 5 characters long".to_string()]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    let created = ratings
        .create(&object(json!({
            "book_id": book_id,
            "list_id": list_id,
            "rating": 5,
            "notes": "A classic"
        })))
        .await
        .unwrap();
    let fetched = ratings
        .get(created["rating_id"].as_str().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched["rating"], json!(5));
    assert_eq!(fetched["notes"], json!("A classic"));
}

#[tokio::test]
async fn test_rating_references_cannot_be_repointed() {
    let backend = MemoryBackend::new();
    let ctx = AppContext::default();
    let books: EntityAccess<Book, _> = EntityAccess::new(backend.clone(), ctx.clone());
    let lists: EntityAccess<ReadingList, _> = EntityAccess::new(backend.clone(), ctx.clone());
    let ratings: EntityAccess<Rating, _> = EntityAccess::new(backend, ctx);

    let book = books.create(&valid_book()).await.unwrap();
    let book_id = book["book_id"].as_str().unwrap();
    let entry = lists
        .create(&object(json!({ "book_id": book_id, "status": "unread" })))
        .await
        .unwrap();
    let list_id = entry["list_id"].as_str().unwrap();
    let created = ratings
        .create(&object(json!({ "book_id": book_id, "list_id": list_id, "rating": 3 })))
        .await
        .unwrap();

    let err = ratings
        .update(
            created["rating_id"].as_str().unwrap(),
            &object(json!({ "book_id": "0".repeat(32) })),
        )
        .await
        .unwrap_err();
    match err {
        ShelfError::Validation(errors) => {
            assert_eq!(errors, vec!["book_id cannot be changed via update".to_string()]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}
