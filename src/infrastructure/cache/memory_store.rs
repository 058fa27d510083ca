//! In-memory cache store
//!
//! Entries live in a map guarded by an async lock. Expired entries are evicted
//! when a read finds them, or in bulk through `purge_expired`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::application::dto::CacheKey;
use crate::application::ports::outbound::{CacheError, CacheStorePort, ClockPort};

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: String,
    expires_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Clone)]
pub struct InMemoryCacheStore {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    clock: Arc<dyn ClockPort>,
}

impl InMemoryCacheStore {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Number of entries held, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now_utc();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }
}

pub(super) fn expiry(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, CacheError> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| CacheError::Storage(format!("TTL out of range: {:?}", ttl)))
}

#[async_trait]
impl CacheStorePort for InMemoryCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        let storage_key = key.storage_key();
        let now = self.clock.now_utc();

        {
            let entries = self.entries.read().await;
            match entries.get(&storage_key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.payload.clone())),
                Some(_) => {}
            }
        }

        // Re-check under the write lock: a concurrent set may have refreshed it
        let mut entries = self.entries.write().await;
        if entries.get(&storage_key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(&storage_key);
            return Ok(None);
        }
        Ok(entries.get(&storage_key).map(|e| e.payload.clone()))
    }

    async fn set(&self, key: &CacheKey, payload: String, ttl: Duration) -> Result<(), CacheError> {
        let expires_at = expiry(self.clock.now_utc(), ttl)?;
        self.entries
            .write()
            .await
            .insert(key.storage_key(), CacheEntry { payload, expires_at });
        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> Result<(), CacheError> {
        self.entries.write().await.remove(&key.storage_key());
        Ok(())
    }
}
