//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::outbound::{ClockPort, GuideCatalogPort, RandomSource};
use crate::application::services::{BaziService, ResultCache};
use crate::infrastructure::cache::create_cache_store;
use crate::infrastructure::catalog::{BuiltinCatalog, JsonGuideCatalog};
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::random::{SeededRandom, ThreadRandom};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub bazi_service: Arc<BaziService>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);

        let catalog: Arc<dyn GuideCatalogPort> = match &config.catalog_path {
            Some(path) => Arc::new(JsonGuideCatalog::load(path).await?),
            None => Arc::new(BuiltinCatalog::new()),
        };

        let random: Arc<dyn RandomSource> = match config.random_seed {
            Some(seed) => {
                tracing::info!("Using seeded randomness: {}", seed);
                Arc::new(SeededRandom::new(seed))
            }
            None => Arc::new(ThreadRandom),
        };

        let store = create_cache_store(&config.cache, clock.clone()).await?;
        let cache = ResultCache::with_ttl(store, config.cache.ttl());

        let bazi_service = Arc::new(BaziService::new(catalog, cache, clock, random));

        Ok(Self {
            config,
            bazi_service,
        })
    }
}
