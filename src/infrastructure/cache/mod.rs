//! Cache store implementations - Infrastructure adapters for the cache port

mod factory;
mod memory_store;
mod sqlite_store;

pub use factory::{create_cache_store, CacheBackendEnum};
pub use memory_store::InMemoryCacheStore;
pub use sqlite_store::SqliteCacheStore;
