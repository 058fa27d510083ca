//! Domain layer - Core chart logic with no I/O
//!
//! This layer contains:
//! - Entities: guide profiles from the catalog
//! - Value Objects: birth moments, pillars, charts, balances, fortunes
//! - Domain Services: the pure engines that turn a birth moment into an
//!   analysis, compatibility scores and a daily fortune
//! - Errors: input validation and catalog lookup failures

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
