//! Bazi Engine - Four-pillars chart analysis
//!
//! The engine:
//! - Derives the four pillars of a birth moment
//! - Aggregates the five-element balance and infers personality traits
//! - Scores compatibility against a catalog of spiritual guides
//! - Computes a day-scoped fortune with auspicious time windows
//! - Caches every result per subject with a time to live

pub mod application;
pub mod domain;
pub mod infrastructure;
