//! Application layer - Use cases over the chart engines
//!
//! This layer contains:
//! - DTOs: Cache keys shared with the storage adapters
//! - Ports: Interfaces to the clock, randomness, catalog and cache store
//! - Services: The cached facade used by the binary

pub mod dto;
pub mod ports;
pub mod services;
