//! Cache factory - Creates the cache store selected by configuration

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;

use crate::application::dto::CacheKey;
use crate::application::ports::outbound::{CacheError, CacheStorePort, ClockPort};
use crate::infrastructure::cache::{InMemoryCacheStore, SqliteCacheStore};
use crate::infrastructure::config::{CacheBackend, CacheConfig};

/// Enum wrapper for cache backends to enable runtime selection
#[derive(Clone)]
pub enum CacheBackendEnum {
    Memory(InMemoryCacheStore),
    Sqlite(SqliteCacheStore),
}

#[async_trait]
impl CacheStorePort for CacheBackendEnum {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        match self {
            CacheBackendEnum::Memory(s) => s.get(key).await,
            CacheBackendEnum::Sqlite(s) => s.get(key).await,
        }
    }

    async fn set(&self, key: &CacheKey, payload: String, ttl: Duration) -> Result<(), CacheError> {
        match self {
            CacheBackendEnum::Memory(s) => s.set(key, payload, ttl).await,
            CacheBackendEnum::Sqlite(s) => s.set(key, payload, ttl).await,
        }
    }

    async fn remove(&self, key: &CacheKey) -> Result<(), CacheError> {
        match self {
            CacheBackendEnum::Memory(s) => s.remove(key).await,
            CacheBackendEnum::Sqlite(s) => s.remove(key).await,
        }
    }
}

/// Build the configured cache store
pub async fn create_cache_store(
    config: &CacheConfig,
    clock: Arc<dyn ClockPort>,
) -> Result<Arc<CacheBackendEnum>> {
    match config.backend {
        CacheBackend::Memory => {
            tracing::info!("Using in-memory result cache");
            Ok(Arc::new(CacheBackendEnum::Memory(InMemoryCacheStore::new(clock))))
        }
        CacheBackend::Sqlite => {
            // Every connection to an in-memory URL opens its own empty database
            let max_connections = if config.sqlite_url.contains(":memory:") { 1 } else { 5 };
            let pool = SqlitePoolOptions::new()
                .max_connections(max_connections)
                .connect(&config.sqlite_url)
                .await
                .context("Failed to connect to SQLite cache database")?;
            tracing::info!("Connected to SQLite cache database: {}", config.sqlite_url);
            let store = SqliteCacheStore::new(pool, clock)
                .await
                .context("Failed to prepare cache table")?;
            Ok(Arc::new(CacheBackendEnum::Sqlite(store)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::SubjectId;
    use crate::infrastructure::clock::SystemClock;

    fn cache_config(backend: CacheBackend) -> CacheConfig {
        CacheConfig {
            backend,
            sqlite_url: "sqlite::memory:".to_string(),
            ttl_hours: 24,
        }
    }

    #[tokio::test]
    async fn test_memory_backend_selected() {
        let store = create_cache_store(&cache_config(CacheBackend::Memory), Arc::new(SystemClock))
            .await
            .unwrap();
        assert!(matches!(*store, CacheBackendEnum::Memory(_)));
    }

    #[tokio::test]
    async fn test_sqlite_backend_round_trips_through_enum() {
        let store = create_cache_store(&cache_config(CacheBackend::Sqlite), Arc::new(SystemClock))
            .await
            .unwrap();
        assert!(matches!(*store, CacheBackendEnum::Sqlite(_)));

        let key = CacheKey::analysis(SubjectId::new());
        store
            .set(&key, "payload".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(store.get(&key).await.unwrap().as_deref(), Some("payload"));
    }
}
