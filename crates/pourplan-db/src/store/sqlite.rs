//! # SQLite Document Store
//!
//! Documents live in the `kv_store` table, one row per (key, scope).
//!
//! ```text
//! kv_store
//! ┌────────────┬──────────┬──────────────────────────┬─────────────────────┐
//! │ key        │ scope    │ value (JSON text)        │ updated_at          │
//! ├────────────┼──────────┼──────────────────────────┼─────────────────────┤
//! │ settings   │ ''       │ {"guests": 80, ...}      │ 2026-10-19T18:02:11Z│
//! │ catalog    │ ''       │ {"ingredients": ...}     │ 2026-10-19T18:02:11Z│
//! │ settings   │ user-42  │ {"guests": 25, ...}      │ 2026-10-19T18:05:40Z│
//! └────────────┴──────────┴──────────────────────────┴─────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::{check_scope, DocumentKey, DocumentStore};

/// Scope column value for unscoped documents.
const SHARED_SCOPE: &str = "";

/// [`DocumentStore`] over the SQLite `kv_store` table.
#[derive(Debug, Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    /// Creates a store on an already migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteDocumentStore { pool }
    }

    /// Number of stored documents across all scopes.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    fn scope_column(scope: Option<&str>) -> DbResult<&str> {
        match scope {
            Some(scope) => {
                check_scope(scope)?;
                Ok(scope)
            }
            None => Ok(SHARED_SCOPE),
        }
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn read(&self, key: DocumentKey, scope: Option<&str>) -> DbResult<Option<Value>> {
        let scope = Self::scope_column(scope)?;

        let row: Option<String> =
            sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1 AND scope = ?2")
                .bind(key.as_str())
                .bind(scope)
                .fetch_optional(&self.pool)
                .await?;

        debug!(key = %key, scope = %scope, found = row.is_some(), "Read document");

        row.map(|text| {
            serde_json::from_str(&text).map_err(|e| DbError::invalid_document(key.as_str(), e.to_string()))
        })
        .transpose()
    }

    async fn write(&self, key: DocumentKey, document: &Value, scope: Option<&str>) -> DbResult<()> {
        let scope = Self::scope_column(scope)?;
        let text = serde_json::to_string(document).map_err(|e| DbError::Internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, scope, value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (key, scope) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key.as_str())
        .bind(scope)
        .bind(text)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        debug!(key = %key, scope = %scope, "Wrote document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use serde_json::json;

    async fn store() -> SqliteDocumentStore {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.documents()
    }

    #[tokio::test]
    async fn test_missing_document_reads_none() {
        let store = store().await;
        assert!(store.read(DocumentKey::Settings, None).await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let store = store().await;
        let doc = json!({ "guests": 80, "menu": {} });

        store.write(DocumentKey::Settings, &doc, None).await.unwrap();
        let read = store.read(DocumentKey::Settings, None).await.unwrap();
        assert_eq!(read, Some(doc));
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = store().await;
        store
            .write(DocumentKey::Catalog, &json!({ "v": 1 }), None)
            .await
            .unwrap();
        store
            .write(DocumentKey::Catalog, &json!({ "v": 2 }), None)
            .await
            .unwrap();

        assert_eq!(
            store.read(DocumentKey::Catalog, None).await.unwrap(),
            Some(json!({ "v": 2 }))
        );
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_scopes_are_isolated() {
        let store = store().await;
        store
            .write(DocumentKey::Settings, &json!({ "guests": 10 }), Some("alice"))
            .await
            .unwrap();

        assert!(store.read(DocumentKey::Settings, None).await.unwrap().is_none());
        assert!(store
            .read(DocumentKey::Settings, Some("bob"))
            .await
            .unwrap()
            .is_none());
        assert_eq!(
            store.read(DocumentKey::Settings, Some("alice")).await.unwrap(),
            Some(json!({ "guests": 10 }))
        );
    }

    #[tokio::test]
    async fn test_rejects_bad_scope() {
        let store = store().await;
        let result = store
            .write(DocumentKey::Settings, &json!({}), Some("a b"))
            .await;
        assert!(matches!(result, Err(DbError::InvalidScope(_))));
    }

    #[tokio::test]
    async fn test_corrupt_row_is_invalid_document() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query("INSERT INTO kv_store (key, scope, value, updated_at) VALUES ('catalog', '', '{oops', '')")
            .execute(db.pool())
            .await
            .unwrap();

        let result = db.documents().read(DocumentKey::Catalog, None).await;
        assert!(matches!(result, Err(DbError::InvalidDocument { .. })));
    }
}
