//! Result cache - TTL memoization in front of the chart engines
//!
//! Payloads are stored as JSON. A payload that no longer deserializes into the
//! requested type is treated as a miss and overwritten; store failures never
//! reach the caller either, the value is simply recomputed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::application::dto::CacheKey;
use crate::application::ports::outbound::{CacheError, CacheStorePort};

/// Default time to live of cached results
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Cache statistics for monitoring
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries that failed to deserialize and were recomputed
    pub corrupted: u64,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}

pub struct ResultCache {
    store: Arc<dyn CacheStorePort>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    corrupted: AtomicU64,
}

impl ResultCache {
    pub fn new(store: Arc<dyn CacheStorePort>) -> Self {
        Self::with_ttl(store, DEFAULT_TTL)
    }

    pub fn with_ttl(store: Arc<dyn CacheStorePort>, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            corrupted: AtomicU64::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached value for `key`, or compute, store and return it
    ///
    /// `compute` runs only on a miss. Its error is returned as-is and nothing
    /// is stored.
    pub async fn get_or_compute<T, E, F>(&self, key: &CacheKey, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T, E>,
    {
        match self.lookup::<T>(key).await {
            Ok(Some(value)) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "Result cache hit");
                return Ok(value);
            }
            Ok(None) => {}
            Err(CacheError::Corruption(reason)) => {
                self.corrupted.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, reason = %reason, "Discarding corrupted cache entry");
            }
            Err(CacheError::Storage(reason)) => {
                warn!(key = %key, reason = %reason, "Cache store read failed, recomputing");
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, "Result cache miss");
        let value = compute()?;
        self.put(key, &value).await;
        Ok(value)
    }

    /// Store a value under `key`, replacing any previous entry
    ///
    /// Store failures are logged and swallowed like on the read path.
    pub async fn put<T: Serialize>(&self, key: &CacheKey, value: &T) {
        match serde_json::to_string(value) {
            Ok(payload) => {
                if let Err(e) = self.store.set(key, payload, self.ttl).await {
                    warn!(key = %key, error = %e, "Failed to store computed result");
                }
            }
            Err(e) => warn!(key = %key, error = %e, "Failed to serialize computed result"),
        }
    }

    async fn lookup<T: DeserializeOwned>(&self, key: &CacheKey) -> Result<Option<T>, CacheError> {
        let Some(payload) = self.store.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&payload)
            .map(Some)
            .map_err(|e| CacheError::Corruption(e.to_string()))
    }

    /// Drop a cached entry so the next read recomputes it
    pub async fn invalidate(&self, key: &CacheKey) -> Result<(), CacheError> {
        self.store.remove(key).await?;
        debug!(key = %key, "Invalidated cache entry");
        Ok(())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            corrupted: self.corrupted.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use chrono::NaiveDate;
    use serde::Deserialize;

    use crate::domain::errors::BaziError;
    use crate::domain::value_objects::SubjectId;
    use crate::infrastructure::cache::InMemoryCacheStore;
    use crate::infrastructure::clock::SystemClock;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Payload {
        score: u8,
        label: String,
    }

    fn memory_cache() -> (Arc<InMemoryCacheStore>, ResultCache) {
        let store = Arc::new(InMemoryCacheStore::new(Arc::new(SystemClock)));
        let cache = ResultCache::new(store.clone());
        (store, cache)
    }

    fn payload() -> Payload {
        Payload {
            score: 88,
            label: "steady".to_string(),
        }
    }

    #[tokio::test]
    async fn test_compute_runs_once_within_ttl() {
        let (_, cache) = memory_cache();
        let key = CacheKey::compatibility(SubjectId::new());
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let value: Result<Payload, BaziError> = cache
                .get_or_compute(&key, || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(payload())
                })
                .await;
            assert_eq!(value.unwrap(), payload());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_keys_with_different_dates_do_not_share_entries() {
        let (_, cache) = memory_cache();
        let subject = SubjectId::new();
        let calls = AtomicUsize::new(0);

        for day in [1, 2] {
            let key = CacheKey::daily_fortune(subject, NaiveDate::from_ymd_opt(2024, 5, day).unwrap());
            let _: Result<Payload, BaziError> = cache
                .get_or_compute(&key, || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(payload())
                })
                .await;
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_corrupted_payload_is_recomputed_and_overwritten() {
        let (store, cache) = memory_cache();
        let key = CacheKey::analysis(SubjectId::new());
        store
            .set(&key, "{\"unexpected\": true}".to_string(), DEFAULT_TTL)
            .await
            .unwrap();

        let value: Result<Payload, BaziError> = cache.get_or_compute(&key, || Ok(payload())).await;
        assert_eq!(value.unwrap(), payload());
        assert_eq!(cache.stats().corrupted, 1);

        let stored = store.get(&key).await.unwrap().unwrap();
        let decoded: Payload = serde_json::from_str(&stored).unwrap();
        assert_eq!(decoded, payload());
    }

    #[tokio::test]
    async fn test_compute_error_is_returned_and_not_cached() {
        let (store, cache) = memory_cache();
        let key = CacheKey::analysis(SubjectId::new());

        let value: Result<Payload, BaziError> = cache
            .get_or_compute(&key, || Err(BaziError::InvalidInput("hour 25".to_string())))
            .await;
        assert!(matches!(value, Err(BaziError::InvalidInput(_))));
        assert!(store.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalidate_forces_recompute() {
        let (_, cache) = memory_cache();
        let key = CacheKey::compatibility(SubjectId::new());
        let calls = AtomicUsize::new(0);
        let compute = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, BaziError>(payload())
        };

        cache.get_or_compute(&key, compute).await.unwrap();
        cache.invalidate(&key).await.unwrap();
        cache.get_or_compute(&key, compute).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
