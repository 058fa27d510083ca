use std::time::Duration;

use async_trait::async_trait;

use crate::application::dto::CacheKey;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Corrupted cache entry: {0}")]
    Corruption(String),
}

/// Key-value store with per-entry time to live
///
/// Expired entries must never be returned from `get`; stores evict them
/// lazily when they are read.
#[async_trait]
pub trait CacheStorePort: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError>;
    async fn set(&self, key: &CacheKey, payload: String, ttl: Duration) -> Result<(), CacheError>;
    async fn remove(&self, key: &CacheKey) -> Result<(), CacheError>;
}
