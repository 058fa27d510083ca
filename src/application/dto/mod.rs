//! Data Transfer Objects - For port boundaries
//!
//! DTOs live in the application layer so infrastructure adapters can key and
//! serialize results without knowing how the engines compute them.

pub mod cache_key;

pub use cache_key::*;
