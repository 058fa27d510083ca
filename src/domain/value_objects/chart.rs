//! Pillars and the four-pillar chart

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BirthMoment, EarthlyBranch, Element, HeavenlyStem};

/// A stem and branch pair; the element is the stem's element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: HeavenlyStem,
    pub branch: EarthlyBranch,
    pub element: Element,
}

impl Pillar {
    pub fn new(stem: HeavenlyStem, branch: EarthlyBranch) -> Self {
        Self {
            stem,
            branch,
            element: stem.element(),
        }
    }

    /// Stem and branch indices resolved against the fixed cycles
    pub fn from_indices(stem_index: i64, branch_index: i64) -> Self {
        Self::new(
            HeavenlyStem::from_index(stem_index),
            EarthlyBranch::from_index(branch_index),
        )
    }
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem.symbol(), self.branch.symbol())
    }
}

/// The four pillars computed from a birth moment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    pub year_pillar: Pillar,
    pub month_pillar: Pillar,
    pub day_pillar: Pillar,
    pub hour_pillar: Pillar,
    /// Element of the day pillar's stem
    pub day_master: Element,
    pub birth_info: BirthMoment,
    pub calculated_at: DateTime<Utc>,
}

impl Chart {
    pub fn pillars(&self) -> [&Pillar; 4] {
        [
            &self.year_pillar,
            &self.month_pillar,
            &self.day_pillar,
            &self.hour_pillar,
        ]
    }

    /// Zodiac animal of the year branch
    pub fn zodiac(&self) -> &'static str {
        self.year_pillar.branch.zodiac()
    }

    /// Chart in the usual notation, e.g. `己巳 丙子 丙寅 甲午`
    pub fn display(&self) -> String {
        self.pillars()
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
