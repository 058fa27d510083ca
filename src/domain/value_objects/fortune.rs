//! Daily fortune value objects

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EarthlyBranch, Element};

/// Strength of each element on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementWeights {
    pub wood: i32,
    pub fire: i32,
    pub earth: i32,
    pub metal: i32,
    pub water: i32,
}

impl ElementWeights {
    pub fn uniform(weight: i32) -> Self {
        Self {
            wood: weight,
            fire: weight,
            earth: weight,
            metal: weight,
            water: weight,
        }
    }

    pub fn get(&self, element: Element) -> i32 {
        match element {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }

    pub fn add(&mut self, element: Element, delta: i32) {
        let slot = match element {
            Element::Wood => &mut self.wood,
            Element::Fire => &mut self.fire,
            Element::Earth => &mut self.earth,
            Element::Metal => &mut self.metal,
            Element::Water => &mut self.water,
        };
        *slot += delta;
    }

    pub fn max(&self) -> i32 {
        Element::ALL.iter().map(|e| self.get(*e)).max().unwrap_or_default()
    }

    pub fn min(&self) -> i32 {
        Element::ALL.iter().map(|e| self.get(*e)).min().unwrap_or_default()
    }

    /// Difference between the strongest and weakest element
    pub fn spread(&self) -> i32 {
        self.max() - self.min()
    }

    /// Heaviest element; the earliest in canonical order wins ties
    pub fn dominant(&self) -> Element {
        Element::ALL
            .iter()
            .copied()
            .fold(Element::Wood, |best, e| {
                if self.get(e) > self.get(best) {
                    e
                } else {
                    best
                }
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FortuneCategory {
    Career,
    Wealth,
    Love,
    Health,
    Study,
    Travel,
}

impl FortuneCategory {
    pub const ALL: [FortuneCategory; 6] = [
        FortuneCategory::Career,
        FortuneCategory::Wealth,
        FortuneCategory::Love,
        FortuneCategory::Health,
        FortuneCategory::Study,
        FortuneCategory::Travel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Career => "career",
            Self::Wealth => "wealth",
            Self::Love => "love",
            Self::Health => "health",
            Self::Study => "study",
            Self::Travel => "travel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Stable,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFortune {
    pub category: FortuneCategory,
    pub score: u8,
    pub trend: Trend,
    pub description: String,
    pub suggestion: String,
    pub lucky_color: String,
    pub lucky_numbers: Vec<u8>,
}

/// The six category fortunes of a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFortunes {
    pub career: CategoryFortune,
    pub wealth: CategoryFortune,
    pub love: CategoryFortune,
    pub health: CategoryFortune,
    pub study: CategoryFortune,
    pub travel: CategoryFortune,
}

impl CategoryFortunes {
    pub fn get(&self, category: FortuneCategory) -> &CategoryFortune {
        match category {
            FortuneCategory::Career => &self.career,
            FortuneCategory::Wealth => &self.wealth,
            FortuneCategory::Love => &self.love,
            FortuneCategory::Health => &self.health,
            FortuneCategory::Study => &self.study,
            FortuneCategory::Travel => &self.travel,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckyItems {
    pub colors: Vec<String>,
    pub numbers: Vec<u8>,
    pub direction: String,
    pub element: Element,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAdvice {
    pub dos: Vec<String>,
    pub donts: Vec<String>,
}

/// A two-hour window ranked by luck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub branch: EarthlyBranch,
    pub start_hour: u32,
    pub end_hour: u32,
    pub element: Element,
    pub luck: u8,
    pub activity: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortuneWarning {
    pub severity: Severity,
    pub message: String,
    /// What to postpone while the warning applies
    pub deferral: String,
}

/// Fortune of one subject for one local day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyFortune {
    /// The day the fortune covers, from local midnight
    pub date: NaiveDate,
    pub overall_luck: u8,
    pub element_weights: ElementWeights,
    pub categories: CategoryFortunes,
    pub lucky_items: LuckyItems,
    pub advice: DailyAdvice,
    pub guide_guidance: Vec<String>,
    pub auspicious_windows: Vec<TimeWindow>,
    pub warnings: Vec<FortuneWarning>,
}
