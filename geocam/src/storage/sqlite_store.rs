//! SQLite-backed local store
//!
//! Keeps each key in a row of `kv_store`. Writes are upserts, so the
//! store always returns what was last written.

use super::LocalStore;
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List stored keys (for diagnostics)
    pub async fn keys(&self) -> Result<Vec<String>> {
        let keys: Vec<String> = sqlx::query_scalar("SELECT key FROM kv_store ORDER BY key ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }
}

#[async_trait]
impl LocalStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        tracing::debug!("Read key: {} (present: {})", key, value.is_some());
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        tracing::debug!("Wrote key: {} ({} bytes)", key, value.len());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let rows = sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::debug!("Removed key: {} (rows: {})", key, rows);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::initialize_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_store() -> SqliteStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        SqliteStore::new(pool)
    }

    #[tokio::test]
    async fn test_missing_key() {
        let store = create_test_store().await;
        assert_eq!(store.get("photos").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = create_test_store().await;

        store.set("denro:token", "first").await.unwrap();
        store.set("denro:token", "second").await.unwrap();

        assert_eq!(
            store.get("denro:token").await.unwrap(),
            Some("second".to_string())
        );
        assert_eq!(store.keys().await.unwrap(), vec!["denro:token".to_string()]);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = create_test_store().await;

        store.set("denro:user", "{}").await.unwrap();
        store.remove("denro:user").await.unwrap();
        store.remove("denro:user").await.unwrap();

        assert_eq!(store.get("denro:user").await.unwrap(), None);
        assert!(store.keys().await.unwrap().is_empty());
    }
}
