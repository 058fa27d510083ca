//! Compatibility results

use serde::{Deserialize, Serialize};

/// Score of one guide against one subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityMatch {
    pub guide_id: String,
    /// Always within 0..=100
    pub score: u8,
    pub reasons: Vec<String>,
    pub blessings: Vec<String>,
    pub guidance: Vec<String>,
}

/// A ranked match list with its explanation and the seasonal pick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideRecommendation {
    pub matches: Vec<CompatibilityMatch>,
    pub explanation: String,
    pub seasonal_guide_id: Option<String>,
}
