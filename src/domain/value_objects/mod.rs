//! Value objects - Immutable objects defined by their attributes

mod analysis;
mod balance;
mod birth_moment;
mod chart;
mod compatibility;
mod element;
mod fortune;
mod ids;

pub use analysis::{BaziAnalysis, DomainAdvice, PersonalityTraits, SubjectProfile, TraitInference};
pub use balance::{ElementBalance, EXCESSIVE_THRESHOLD};
pub use birth_moment::{BirthMoment, Gender, MAX_NAME_LENGTH, MAX_YEAR, MIN_YEAR};
pub use chart::{Chart, Pillar};
pub use compatibility::{CompatibilityMatch, GuideRecommendation};
pub use element::{EarthlyBranch, Element, HeavenlyStem, Polarity};
pub use fortune::{
    CategoryFortune, CategoryFortunes, DailyAdvice, DailyFortune, ElementWeights,
    FortuneCategory, FortuneWarning, LuckyItems, Severity, TimeWindow, Trend,
};
pub use ids::*;
