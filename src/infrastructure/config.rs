//! Application configuration

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

const SECS_PER_HOUR: u64 = 60 * 60;

/// Storage behind the result cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Memory,
    Sqlite,
}

impl FromStr for CacheBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => anyhow::bail!("Unsupported cache backend: {}", other),
        }
    }
}

/// Result cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    /// SQLite connection URL, used by the sqlite backend only
    pub sqlite_url: String,
    pub ttl_hours: u64,
}

impl CacheConfig {
    /// Saturates for hand-built configs; `from_lookup` rejects overflowing hours
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours.saturating_mul(SECS_PER_HOUR))
    }
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub cache: CacheConfig,
    /// JSON guide catalog replacing the built-in one
    pub catalog_path: Option<PathBuf>,
    /// Seed for reproducible daily luck; thread randomness when unset
    pub random_seed: Option<u64>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let ttl_hours: u64 = lookup("BAZI_CACHE_TTL_HOURS")
            .unwrap_or_else(|| "24".to_string())
            .parse()
            .context("BAZI_CACHE_TTL_HOURS must be a whole number of hours")?;
        ttl_hours.checked_mul(SECS_PER_HOUR).with_context(|| {
            format!("BAZI_CACHE_TTL_HOURS {} overflows the TTL in seconds", ttl_hours)
        })?;

        Ok(Self {
            cache: CacheConfig {
                backend: lookup("BAZI_CACHE_BACKEND")
                    .unwrap_or_else(|| "memory".to_string())
                    .parse()
                    .context("BAZI_CACHE_BACKEND must be 'memory' or 'sqlite'")?,
                sqlite_url: lookup("BAZI_SQLITE_URL")
                    .unwrap_or_else(|| "sqlite://bazi_cache.db?mode=rwc".to_string()),
                ttl_hours,
            },
            catalog_path: lookup("BAZI_CATALOG_PATH").map(PathBuf::from),
            random_seed: lookup("BAZI_RANDOM_SEED")
                .map(|seed| seed.parse::<u64>())
                .transpose()
                .context("BAZI_RANDOM_SEED must be an unsigned integer")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.cache.ttl(), Duration::from_secs(24 * 60 * 60));
        assert!(config.catalog_path.is_none());
        assert!(config.random_seed.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("BAZI_CACHE_BACKEND", "SQLite"),
            ("BAZI_CACHE_TTL_HOURS", "6"),
            ("BAZI_CATALOG_PATH", "guides.json"),
            ("BAZI_RANDOM_SEED", "42"),
        ])
        .unwrap();
        assert_eq!(config.cache.backend, CacheBackend::Sqlite);
        assert_eq!(config.cache.ttl_hours, 6);
        assert_eq!(config.catalog_path, Some(PathBuf::from("guides.json")));
        assert_eq!(config.random_seed, Some(42));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config(&[("BAZI_CACHE_BACKEND", "redis")]).is_err());
        assert!(config(&[("BAZI_CACHE_TTL_HOURS", "a day")]).is_err());
        assert!(config(&[("BAZI_RANDOM_SEED", "-1")]).is_err());
    }

    #[test]
    fn test_ttl_hours_overflowing_seconds_are_rejected() {
        let max = u64::MAX.to_string();
        let err = config(&[("BAZI_CACHE_TTL_HOURS", max.as_str())]).unwrap_err();
        assert!(err.to_string().contains("BAZI_CACHE_TTL_HOURS"));

        let largest = (u64::MAX / SECS_PER_HOUR).to_string();
        let config = config(&[("BAZI_CACHE_TTL_HOURS", largest.as_str())]).unwrap();
        assert_eq!(
            config.cache.ttl().as_secs(),
            u64::MAX / SECS_PER_HOUR * SECS_PER_HOUR
        );
    }

    #[test]
    fn test_ttl_saturates_for_hand_built_config() {
        let cache = CacheConfig {
            backend: CacheBackend::Memory,
            sqlite_url: String::new(),
            ttl_hours: u64::MAX,
        };
        assert_eq!(cache.ttl(), Duration::from_secs(u64::MAX));
    }
}
