//! Outbound ports - Interfaces that the application requires from external systems

mod cache_port;
mod catalog_port;
mod clock_port;

pub use cache_port::{CacheError, CacheStorePort};
pub use catalog_port::GuideCatalogPort;
pub use clock_port::ClockPort;
pub use crate::domain::services::RandomSource;
