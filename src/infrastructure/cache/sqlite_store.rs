//! SQLite cache store
//!
//! One row per key. Expiry is stored as epoch milliseconds and checked on
//! every read; expired rows are deleted when read.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::memory_store::expiry;
use crate::application::dto::CacheKey;
use crate::application::ports::outbound::{CacheError, CacheStorePort, ClockPort};

#[derive(Clone)]
pub struct SqliteCacheStore {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqliteCacheStore {
    pub async fn new(pool: SqlitePool, clock: Arc<dyn ClockPort>) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cache_entries (
                key TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                expires_at INTEGER NOT NULL
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool, clock })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Delete every expired row, returning how many were removed
    pub async fn purge_expired(&self) -> Result<u64, CacheError> {
        let now = self.clock.now_utc().timestamp_millis();
        let result = sqlx::query("DELETE FROM cache_entries WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| CacheError::Storage(e.to_string()))?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl CacheStorePort for SqliteCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        let storage_key = key.storage_key();
        let row: Option<(String, i64)> =
            sqlx::query_as("SELECT payload, expires_at FROM cache_entries WHERE key = ?")
                .bind(&storage_key)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| CacheError::Storage(e.to_string()))?;

        let Some((payload, expires_at)) = row else {
            return Ok(None);
        };

        let now = self.clock.now_utc().timestamp_millis();
        if now >= expires_at {
            sqlx::query("DELETE FROM cache_entries WHERE key = ? AND expires_at <= ?")
                .bind(&storage_key)
                .bind(now)
                .execute(&self.pool)
                .await
                .map_err(|e| CacheError::Storage(e.to_string()))?;
            return Ok(None);
        }

        Ok(Some(payload))
    }

    async fn set(&self, key: &CacheKey, payload: String, ttl: Duration) -> Result<(), CacheError> {
        let expires_at = expiry(self.clock.now_utc(), ttl)?.timestamp_millis();
        sqlx::query("INSERT OR REPLACE INTO cache_entries (key, payload, expires_at) VALUES (?, ?, ?)")
            .bind(key.storage_key())
            .bind(payload)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| CacheError::Storage(e.to_string()))?;
        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> Result<(), CacheError> {
        sqlx::query("DELETE FROM cache_entries WHERE key = ?")
            .bind(key.storage_key())
            .execute(&self.pool)
            .await
            .map_err(|e| CacheError::Storage(e.to_string()))?;
        Ok(())
    }
}
