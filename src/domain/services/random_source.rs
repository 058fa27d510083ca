//! Random source for the daily luck perturbation

/// Supplies the random term of the overall daily luck
///
/// Implementations must return a value within `min..=max`.
pub trait RandomSource: Send + Sync {
    fn perturbation(&self, min: i32, max: i32) -> i32;
}

/// Disables the perturbation entirely
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPerturbation;

impl RandomSource for NoPerturbation {
    fn perturbation(&self, min: i32, max: i32) -> i32 {
        0.clamp(min, max)
    }
}
