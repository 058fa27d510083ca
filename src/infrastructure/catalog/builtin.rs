//! Built-in guide catalog
//!
//! Order matters: ranking ties fall back to this declaration order.

use crate::application::ports::outbound::GuideCatalogPort;
use crate::domain::entities::{GuideDomain, GuideKind, GuideProfile};
use crate::domain::value_objects::Element::{Earth, Fire, Metal, Water, Wood};

pub fn builtin_guides() -> Vec<GuideProfile> {
    vec![
        GuideProfile::new("guanyin", "Guanyin", GuideKind::Bodhisattva, Water)
            .with_tiers(&[Water, Wood], &[Metal], &[Earth], &[Fire])
            .with_personality(&["wise", "nurturing", "patient", "adaptable"])
            .with_domains(&[GuideDomain::Health, GuideDomain::Relationship, GuideDomain::Protection])
            .with_blessings(&[
                "Compassion that softens hardship",
                "Calm in times of illness",
                "Harmony within the family",
                "Safe passage through danger",
            ]),
        GuideProfile::new("wenchang", "Wenchang Dijun", GuideKind::Deity, Wood)
            .with_tiers(&[Wood, Fire], &[Water], &[Earth], &[Metal])
            .with_personality(&["wise", "perceptive", "disciplined", "growth-oriented"])
            .with_domains(&[GuideDomain::Wisdom, GuideDomain::Career])
            .with_blessings(&[
                "Clarity in study and examinations",
                "Recognition for written work",
                "Steady progress in learning",
            ]),
        GuideProfile::new("guan-yu", "Guan Yu", GuideKind::Deity, Fire)
            .with_tiers(&[Fire, Earth], &[Wood], &[Metal], &[Water])
            .with_personality(&["righteous", "decisive", "upright", "principled"])
            .with_domains(&[GuideDomain::Career, GuideDomain::Protection, GuideDomain::Wealth])
            .with_blessings(&[
                "Loyalty from partners and colleagues",
                "Courage to face rivals",
                "Protection of business ventures",
            ]),
        GuideProfile::new("cai-shen", "Cai Shen", GuideKind::Deity, Metal)
            .with_tiers(&[Metal, Earth], &[Water], &[Fire], &[Wood])
            .with_personality(&["resourceful", "ambitious", "energetic", "expressive"])
            .with_domains(&[GuideDomain::Wealth, GuideDomain::Career])
            .with_blessings(&[
                "Abundant and steady income",
                "Good timing in trade",
                "Openings for new ventures",
            ]),
        GuideProfile::new("medicine-buddha", "Medicine Buddha", GuideKind::Buddha, Water)
            .with_tiers(&[Water, Metal], &[Wood], &[Earth], &[Fire])
            .with_personality(&["patient", "nurturing", "honest", "perceptive"])
            .with_domains(&[GuideDomain::Health, GuideDomain::Protection])
            .with_blessings(&[
                "Recovery from illness",
                "Vitality of body and mind",
                "Relief from lingering pain",
            ]),
        GuideProfile::new("manjushri", "Manjushri", GuideKind::Bodhisattva, Metal)
            .with_tiers(&[Metal, Water], &[Earth], &[Wood], &[Fire])
            .with_personality(&["wise", "decisive", "perceptive", "principled"])
            .with_domains(&[GuideDomain::Wisdom])
            .with_blessings(&[
                "Sharp discernment",
                "Insight that cuts through confusion",
                "Eloquence in speech",
            ]),
        GuideProfile::new("ksitigarbha", "Ksitigarbha", GuideKind::Bodhisattva, Earth)
            .with_tiers(&[Earth, Fire], &[Metal], &[Water], &[Wood])
            .with_personality(&["reliable", "patient", "honest", "benevolent"])
            .with_domains(&[GuideDomain::Protection, GuideDomain::Health])
            .with_blessings(&[
                "Steadfast protection of the household",
                "Peace for departed ancestors",
                "Endurance through long trials",
            ]),
        GuideProfile::new("yue-lao", "Yue Lao", GuideKind::Deity, Fire)
            .with_tiers(&[Fire, Wood], &[Earth], &[Water], &[Metal])
            .with_personality(&["courteous", "passionate", "benevolent", "adaptable"])
            .with_domains(&[GuideDomain::Relationship])
            .with_blessings(&[
                "A fated meeting",
                "Warmth in an existing bond",
                "Reconciliation after quarrels",
            ]),
        GuideProfile::new("taisui", "Taisui General", GuideKind::Taisui, Earth)
            .with_tiers(&[Earth, Metal], &[Fire], &[Wood], &[Water])
            .with_personality(&["disciplined", "upright", "reliable", "resourceful"])
            .with_domains(&[GuideDomain::Protection, GuideDomain::Career])
            .with_blessings(&[
                "Smooth passage through the year",
                "Misfortune turned aside",
                "Stability in plans",
            ]),
    ]
}

/// Catalog compiled into the binary
#[derive(Debug, Clone)]
pub struct BuiltinCatalog {
    guides: Vec<GuideProfile>,
}

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self {
            guides: builtin_guides(),
        }
    }
}

impl Default for BuiltinCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl GuideCatalogPort for BuiltinCatalog {
    fn guides(&self) -> &[GuideProfile] {
        &self.guides
    }
}
