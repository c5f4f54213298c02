/**
 * Document Database Operations
 *
 * Document bodies are stored as JSON text. Listing returns documents in
 * insertion order.
 */

use chrono::Utc;
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::shared::document::{Document, Fields};

#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: String,
    data: String,
}

impl DocumentRow {
    fn into_document(self) -> Result<Document, BackendError> {
        let data: Fields = serde_json::from_str(&self.data)?;
        Ok(Document::new(self.id, data))
    }
}

pub async fn list_documents(pool: &SqlitePool, collection: &str) -> Result<Vec<Document>, BackendError> {
    let rows = sqlx::query_as::<_, DocumentRow>(
        r#"
        SELECT id, data
        FROM documents
        WHERE collection = ?1
        ORDER BY rowid
        "#,
    )
    .bind(collection)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(DocumentRow::into_document).collect()
}

pub async fn get_document(
    pool: &SqlitePool,
    collection: &str,
    id: &str,
) -> Result<Option<Document>, BackendError> {
    let row = sqlx::query_as::<_, DocumentRow>(
        "SELECT id, data FROM documents WHERE collection = ?1 AND id = ?2",
    )
    .bind(collection)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(DocumentRow::into_document).transpose()
}

/// Create the document, or replace the body of an existing one
pub async fn upsert_document(
    pool: &SqlitePool,
    collection: &str,
    id: &str,
    data: &Fields,
) -> Result<(), BackendError> {
    let body = serde_json::to_string(data)?;
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO documents (collection, id, data, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?4)
        ON CONFLICT (collection, id) DO UPDATE
        SET data = excluded.data, updated_at = excluded.updated_at
        "#,
    )
    .bind(collection)
    .bind(id)
    .bind(body)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a document; returns whether it existed
pub async fn delete_document(pool: &SqlitePool, collection: &str, id: &str) -> Result<bool, BackendError> {
    let result = sqlx::query("DELETE FROM documents WHERE collection = ?1 AND id = ?2")
        .bind(collection)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::load_database;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order_after_upsert() {
        let pool = load_database("sqlite::memory:").await.unwrap();
        upsert_document(&pool, "events", "b", &fields(json!({"n": 1}))).await.unwrap();
        upsert_document(&pool, "events", "a", &fields(json!({"n": 2}))).await.unwrap();
        upsert_document(&pool, "events", "b", &fields(json!({"n": 3}))).await.unwrap();

        let docs = list_documents(&pool, "events").await.unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(docs[0].data["n"], json!(3));
    }

    #[tokio::test]
    async fn test_collections_are_separate() {
        let pool = load_database("sqlite::memory:").await.unwrap();
        upsert_document(&pool, "users", "u1", &fields(json!({"name": "Ann"}))).await.unwrap();

        assert!(get_document(&pool, "events", "u1").await.unwrap().is_none());
        assert!(get_document(&pool, "users", "u1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let pool = load_database("sqlite::memory:").await.unwrap();
        upsert_document(&pool, "events", "e1", &Fields::new()).await.unwrap();
        assert!(delete_document(&pool, "events", "e1").await.unwrap());
        assert!(!delete_document(&pool, "events", "e1").await.unwrap());
    }
}
