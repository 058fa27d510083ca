//! Guide entity - A deity, buddha, bodhisattva or taisui general from the catalog
//!
//! Guides are read-only configuration. Each one classifies the five elements
//! into four compatibility tiers and carries personality and domain tags that
//! the compatibility scorer matches against a subject's analysis.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideKind {
    Deity,
    Buddha,
    Bodhisattva,
    Taisui,
}

/// Life areas a guide looks after
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideDomain {
    Career,
    Health,
    Wisdom,
    Relationship,
    Wealth,
    Protection,
}

impl GuideDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Career => "career",
            Self::Health => "health",
            Self::Wisdom => "wisdom",
            Self::Relationship => "relationship",
            Self::Wealth => "wealth",
            Self::Protection => "protection",
        }
    }
}

/// A catalog entry scored for compatibility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideProfile {
    pub id: String,
    pub name: String,
    pub kind: GuideKind,
    pub element: Element,
    #[serde(default)]
    pub best_elements: Vec<Element>,
    #[serde(default)]
    pub good_elements: Vec<Element>,
    #[serde(default)]
    pub neutral_elements: Vec<Element>,
    #[serde(default)]
    pub poor_elements: Vec<Element>,
    #[serde(default)]
    pub personality: Vec<String>,
    #[serde(default)]
    pub domain: Vec<GuideDomain>,
    #[serde(default)]
    pub blessings: Vec<String>,
}

impl GuideProfile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: GuideKind,
        element: Element,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            element,
            best_elements: Vec::new(),
            good_elements: Vec::new(),
            neutral_elements: Vec::new(),
            poor_elements: Vec::new(),
            personality: Vec::new(),
            domain: Vec::new(),
            blessings: Vec::new(),
        }
    }

    /// Set the four compatibility tiers in one call
    pub fn with_tiers(
        mut self,
        best: &[Element],
        good: &[Element],
        neutral: &[Element],
        poor: &[Element],
    ) -> Self {
        self.best_elements = best.to_vec();
        self.good_elements = good.to_vec();
        self.neutral_elements = neutral.to_vec();
        self.poor_elements = poor.to_vec();
        self
    }

    pub fn with_personality(mut self, personality: &[&str]) -> Self {
        self.personality = personality.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_domains(mut self, domain: &[GuideDomain]) -> Self {
        self.domain = domain.to_vec();
        self
    }

    pub fn with_blessings(mut self, blessings: &[&str]) -> Self {
        self.blessings = blessings.iter().map(|b| b.to_string()).collect();
        self
    }

    pub fn covers(&self, domain: GuideDomain) -> bool {
        self.domain.contains(&domain)
    }
}
