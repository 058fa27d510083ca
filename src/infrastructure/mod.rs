//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Cache: In-memory and SQLite result stores
//! - Catalog: Built-in and JSON guide catalogs
//! - Clock and Random: Time and randomness sources
//! - Config: Application configuration
//! - State: Shared application state

pub mod cache;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod random;
pub mod state;
