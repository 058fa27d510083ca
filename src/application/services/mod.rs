//! Application services - Use case implementations
//!
//! The services accept port implementations and return domain value objects.

pub mod bazi_service;
pub mod result_cache;

pub use bazi_service::BaziService;
pub use result_cache::{CacheStats, ResultCache, DEFAULT_TTL};
