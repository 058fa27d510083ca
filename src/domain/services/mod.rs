//! Domain services - Pure chart engines
//!
//! Data flows one way: pillar calculation feeds the element balance, which
//! feeds trait inference, which feeds compatibility scoring. The daily fortune
//! engine reads the chart independently.

pub mod compatibility_scorer;
pub mod daily_fortune;
pub mod element_balance;
pub mod pillar_calculator;
pub mod random_source;
pub mod trait_inference;

pub use random_source::{NoPerturbation, RandomSource};
