//! Trait inference output and the full chart analysis

use serde::{Deserialize, Serialize};

use super::{Chart, Element, ElementBalance};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityTraits {
    pub main_traits: Vec<String>,
    pub temperament: String,
    pub social_tendency: String,
    pub decision_making: String,
    pub stress_handling: String,
}

/// Advice phrases grouped by life domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainAdvice {
    pub career: Vec<String>,
    pub health: Vec<String>,
    pub relationship: Vec<String>,
    pub wealth: Vec<String>,
    pub education: Vec<String>,
    pub spiritual: Vec<String>,
}

/// Everything inferred from a day master and element balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitInference {
    pub traits: PersonalityTraits,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub domains: DomainAdvice,
}

/// A chart with its balance and inferred traits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaziAnalysis {
    pub chart: Chart,
    pub balance: ElementBalance,
    pub traits: PersonalityTraits,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub domains: DomainAdvice,
}

impl BaziAnalysis {
    pub fn new(chart: Chart, balance: ElementBalance, inference: TraitInference) -> Self {
        Self {
            chart,
            balance,
            traits: inference.traits,
            strengths: inference.strengths,
            weaknesses: inference.weaknesses,
            suggestions: inference.suggestions,
            domains: inference.domains,
        }
    }

    /// The slice of the analysis that compatibility scoring reads
    pub fn subject_profile(&self) -> SubjectProfile {
        SubjectProfile {
            day_master: self.chart.day_master,
            balance: self.balance.clone(),
            traits: self.traits.clone(),
        }
    }
}

/// Subject side of a compatibility comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectProfile {
    pub day_master: Element,
    pub balance: ElementBalance,
    pub traits: PersonalityTraits,
}
