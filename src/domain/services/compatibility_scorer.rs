//! Compatibility scorer - Subject analysis against catalog guides
//!
//! A score starts at 50 and is built additively:
//! - element tier of the day master in the guide's classification (+30/+20/+10/-10)
//! - +25 when the guide's element is missing from the subject's chart
//! - up to +15 for overlap between the subject's traits and the guide's personality
//! - +10 for every need of the subject that the guide's domains cover
//!
//! The total is rounded and clamped to 0..=100.

use crate::domain::entities::{GuideDomain, GuideProfile};
use crate::domain::errors::BaziError;
use crate::domain::value_objects::{CompatibilityMatch, Element, SubjectProfile};

pub const BASE_SCORE: f64 = 50.0;
pub const BEST_TIER_BONUS: f64 = 30.0;
pub const GOOD_TIER_BONUS: f64 = 20.0;
pub const NEUTRAL_TIER_BONUS: f64 = 10.0;
pub const POOR_TIER_PENALTY: f64 = 10.0;
pub const MISSING_ELEMENT_BONUS: f64 = 25.0;
pub const PERSONALITY_WEIGHT: f64 = 15.0;
pub const NEED_BONUS: f64 = 10.0;
const MAX_BLESSINGS: usize = 3;

/// Needs a subject can have that a guide may look after
pub const NEED_CATEGORIES: [GuideDomain; 4] = [
    GuideDomain::Career,
    GuideDomain::Health,
    GuideDomain::Wisdom,
    GuideDomain::Relationship,
];

/// Month ranges mapped to the guide favoured in that season
const SEASONAL_GUIDES: [(u32, u32, &str); 4] = [
    (2, 4, "wenchang"),
    (5, 7, "guan-yu"),
    (8, 10, "cai-shen"),
    (11, 1, "guanyin"),
];

/// Whether the subject's chart signals a need in the given category
pub fn has_need(subject: &SubjectProfile, need: GuideDomain) -> bool {
    let balance = &subject.balance;
    match need {
        GuideDomain::Career => {
            balance.is_missing(Element::Metal)
                || balance.is_missing(Element::Fire)
                || balance.count(subject.day_master) <= 2
        }
        GuideDomain::Health => !balance.excessive.is_empty() || balance.missing.len() >= 2,
        GuideDomain::Wisdom => {
            balance.is_missing(Element::Water)
                || balance.is_missing(Element::Wood)
                || balance.weakest == Element::Water
        }
        GuideDomain::Relationship => {
            balance.count(Element::Fire) <= 1 || balance.is_excessive(Element::Water)
        }
        GuideDomain::Wealth | GuideDomain::Protection => false,
    }
}

/// Ratio of matching (trait, tag) pairs to the combined list sizes
pub fn personality_overlap(subject_traits: &[String], guide_personality: &[String]) -> f64 {
    let total = subject_traits.len() + guide_personality.len();
    if total == 0 {
        return 0.0;
    }

    let matched = subject_traits
        .iter()
        .map(|t| t.to_lowercase())
        .map(|trait_name| {
            guide_personality
                .iter()
                .map(|p| p.to_lowercase())
                .filter(|tag| tag.contains(&trait_name) || trait_name.contains(tag.as_str()))
                .count()
        })
        .sum::<usize>();

    matched as f64 / total as f64
}

/// Score one guide against one subject
pub fn score(subject: &SubjectProfile, guide: &GuideProfile) -> CompatibilityMatch {
    let day_master = subject.day_master;
    let mut total = BASE_SCORE;
    let mut reasons = Vec::new();

    if guide.best_elements.contains(&day_master) {
        total += BEST_TIER_BONUS;
        reasons.push(format!(
            "Your {} day master is among {}'s most harmonious elements",
            day_master, guide.name
        ));
    } else if guide.good_elements.contains(&day_master) {
        total += GOOD_TIER_BONUS;
        reasons.push(format!(
            "Your {} day master works well with {}",
            day_master, guide.name
        ));
    } else if guide.neutral_elements.contains(&day_master) {
        total += NEUTRAL_TIER_BONUS;
        reasons.push(format!(
            "Your {} day master is neutral towards {}",
            day_master, guide.name
        ));
    } else if guide.poor_elements.contains(&day_master) {
        total -= POOR_TIER_PENALTY;
        reasons.push(format!(
            "Your {} day master sits uneasily with {}'s {} energy",
            day_master, guide.name, guide.element
        ));
    }

    if subject.balance.is_missing(guide.element) {
        total += MISSING_ELEMENT_BONUS;
        reasons.push(format!(
            "{} brings the {} energy your chart lacks",
            guide.name, guide.element
        ));
    }

    let overlap = personality_overlap(&subject.traits.main_traits, &guide.personality);
    if overlap > 0.0 {
        total += PERSONALITY_WEIGHT * overlap;
        reasons.push(format!("Your character resonates with {}'s nature", guide.name));
    }

    let matched_needs: Vec<GuideDomain> = NEED_CATEGORIES
        .iter()
        .copied()
        .filter(|need| guide.covers(*need) && has_need(subject, *need))
        .collect();
    total += NEED_BONUS * matched_needs.len() as f64;
    for need in &matched_needs {
        reasons.push(format!(
            "{} looks after {}, an area your chart calls for",
            guide.name,
            need.as_str()
        ));
    }

    let mut guidance = vec![element_guidance(day_master, guide)];
    guidance.extend(matched_needs.iter().map(|need| need_guidance(*need, guide)));

    CompatibilityMatch {
        guide_id: guide.id.clone(),
        score: clamp_score(total),
        reasons,
        blessings: guide.blessings.iter().take(MAX_BLESSINGS).cloned().collect(),
        guidance,
    }
}

/// Round a raw total and clamp it to 0..=100
fn clamp_score(total: f64) -> u8 {
    total.round().clamp(0.0, 100.0) as u8
}

fn element_guidance(day_master: Element, guide: &GuideProfile) -> String {
    let relation = if guide.element == day_master {
        "shares your element and strengthens your core"
    } else if guide.element.generates() == day_master {
        "nourishes your day master like a steady source"
    } else if day_master.generates() == guide.element {
        "gives your talents a channel to flow outward"
    } else if guide.element.controls() == day_master {
        "tempers your excesses and sharpens discipline"
    } else {
        "offers a domain for your own effort to shape"
    };
    format!("{} {}", guide.name, relation)
}

fn need_guidance(need: GuideDomain, guide: &GuideProfile) -> String {
    let practice = match need {
        GuideDomain::Career => "before important work decisions",
        GuideDomain::Health => "when resting and recovering",
        GuideDomain::Wisdom => "before study or reflection",
        GuideDomain::Relationship => "when mending or deepening bonds",
        GuideDomain::Wealth => "when planning finances",
        GuideDomain::Protection => "when setting out on journeys",
    };
    format!("Seek {}'s guidance {}", guide.name, practice)
}

/// Score every guide and order by score descending
///
/// The sort is stable, so equal scores keep catalog declaration order.
pub fn rank(subject: &SubjectProfile, catalog: &[GuideProfile]) -> Vec<CompatibilityMatch> {
    let mut matches: Vec<CompatibilityMatch> = catalog.iter().map(|g| score(subject, g)).collect();
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

/// Guide id favoured for a calendar month, regardless of score
pub fn seasonal_guide_id(month: u32) -> Option<&'static str> {
    if !(1..=12).contains(&month) {
        return None;
    }
    SEASONAL_GUIDES.iter().find_map(|(start, end, id)| {
        let in_range = if start <= end {
            (*start..=*end).contains(&month)
        } else {
            month >= *start || month <= *end
        };
        in_range.then_some(*id)
    })
}

/// Resolve the seasonal guide in a catalog
pub fn seasonal_guide(month: u32, catalog: &[GuideProfile]) -> Result<&GuideProfile, BaziError> {
    let id = seasonal_guide_id(month)
        .ok_or_else(|| BaziError::InvalidInput(format!("month {} outside 1..=12", month)))?;
    catalog
        .iter()
        .find(|g| g.id == id)
        .ok_or_else(|| BaziError::UnknownCatalogEntry(id.to_string()))
}

/// One-paragraph explanation of a ranked match list
pub fn explain(matches: &[CompatibilityMatch], catalog: &[GuideProfile]) -> String {
    let Some(top) = matches.first() else {
        return "No guides are available to compare with this chart.".to_string();
    };
    let name = catalog
        .iter()
        .find(|g| g.id == top.guide_id)
        .map(|g| g.name.as_str())
        .unwrap_or(top.guide_id.as_str());

    match top.reasons.first() {
        Some(reason) => format!(
            "{} is your closest guide with a compatibility of {}/100. {}.",
            name, top.score, reason
        ),
        None => format!(
            "{} is your closest guide with a compatibility of {}/100.",
            name, top.score
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::GuideKind;
    use crate::domain::value_objects::{ElementBalance, PersonalityTraits};

    fn traits(main: &[&str]) -> PersonalityTraits {
        PersonalityTraits {
            main_traits: main.iter().map(|t| t.to_string()).collect(),
            temperament: String::new(),
            social_tendency: String::new(),
            decision_making: String::new(),
            stress_handling: String::new(),
        }
    }

    fn subject(day_master: Element, counts: [u8; 5]) -> SubjectProfile {
        SubjectProfile {
            day_master,
            balance: ElementBalance::from_counts(counts),
            traits: traits(&["wise", "adaptable"]),
        }
    }

    fn wood_guide() -> GuideProfile {
        GuideProfile::new("wood-guide", "Wood Guide", GuideKind::Deity, Element::Wood).with_tiers(
            &[Element::Fire],
            &[Element::Water],
            &[Element::Wood],
            &[Element::Metal],
        )
    }

    #[test]
    fn test_missing_element_bonus() {
        let lacking = subject(Element::Earth, [0, 3, 3, 3, 3]);
        let having = subject(Element::Earth, [3, 2, 3, 2, 2]);
        let guide = wood_guide();

        let lacking_score = score(&lacking, &guide).score as i32;
        let having_score = score(&having, &guide).score as i32;
        assert!(lacking_score - having_score >= 25);
    }

    #[test]
    fn test_tier_chain_applies_first_match_only() {
        let guide = wood_guide()
            .with_tiers(&[Element::Fire], &[Element::Fire], &[], &[Element::Fire]);
        let fire = SubjectProfile {
            traits: traits(&[]),
            ..subject(Element::Fire, [3, 3, 2, 2, 2])
        };
        assert_eq!(score(&fire, &guide).score, 80);
    }

    #[test]
    fn test_poor_tier_penalty() {
        let metal = SubjectProfile {
            traits: traits(&[]),
            ..subject(Element::Metal, [3, 3, 2, 2, 2])
        };
        let result = score(&metal, &wood_guide());
        assert_eq!(result.score, 40);
        assert_eq!(result.reasons.len(), 1);
    }

    #[test]
    fn test_personality_overlap_ratio() {
        let subject_traits = vec!["Wise".to_string(), "adaptable".to_string()];
        let guide_tags = vec!["wise".to_string(), "compassionate".to_string()];
        assert!((personality_overlap(&subject_traits, &guide_tags) - 0.25).abs() < 1e-9);
        assert_eq!(personality_overlap(&[], &[]), 0.0);
    }

    #[test]
    fn test_score_clamped_to_hundred() {
        let guide = wood_guide()
            .with_tiers(&[Element::Earth], &[], &[], &[])
            .with_personality(&["wise", "adaptable"])
            .with_domains(&NEED_CATEGORIES);
        // metal and water missing, a single fire: every need fires
        let needy = subject(Element::Earth, [5, 1, 6, 0, 0]);
        let result = score(&needy, &guide);
        assert_eq!(result.score, 100);
        assert_eq!(result.guidance.len(), 1 + 4);
    }

    #[test]
    fn test_score_floor_is_poor_tier_without_bonuses() {
        let poor_only = wood_guide().with_tiers(&[], &[], &[], &Element::ALL);
        let balances = [
            [12, 0, 0, 0, 0],
            [0, 0, 0, 0, 12],
            [2, 2, 2, 3, 3],
            [0, 4, 4, 4, 0],
        ];
        let mut lowest = u8::MAX;
        for dm in Element::ALL {
            for counts in balances {
                let s = score(&subject(dm, counts), &poor_only).score;
                assert!(s >= 40, "{} {:?}: {}", dm, counts, s);
                lowest = lowest.min(s);
            }
        }

        // wood present, no shared traits, no covered needs: 50 - 10
        let plain = SubjectProfile {
            traits: traits(&["stoic"]),
            ..subject(Element::Fire, [3, 3, 2, 2, 2])
        };
        assert_eq!(score(&plain, &poor_only).score, 40);
        assert_eq!(lowest, 40);
    }

    #[test]
    fn test_raw_total_is_rounded_and_clamped() {
        assert_eq!(clamp_score(-12.0), 0);
        assert_eq!(clamp_score(-0.4), 0);
        assert_eq!(clamp_score(62.5), 63);
        assert_eq!(clamp_score(130.4), 100);
    }

    #[test]
    fn test_ranking_keeps_catalog_order_on_ties() {
        let first = GuideProfile::new("first", "First", GuideKind::Buddha, Element::Earth);
        let second = GuideProfile::new("second", "Second", GuideKind::Buddha, Element::Earth);
        let better = GuideProfile::new("better", "Better", GuideKind::Deity, Element::Earth)
            .with_tiers(&[Element::Water], &[], &[], &[]);
        let catalog = vec![first, second, better];

        let ranked = rank(&subject(Element::Water, [3, 3, 2, 2, 2]), &catalog);
        let ids: Vec<&str> = ranked.iter().map(|m| m.guide_id.as_str()).collect();
        assert_eq!(ids, vec!["better", "first", "second"]);
        assert_eq!(ranked[1].score, ranked[2].score);
    }

    #[test]
    fn test_seasonal_guide_table_wraps_year_end() {
        assert_eq!(seasonal_guide_id(1), Some("guanyin"));
        assert_eq!(seasonal_guide_id(12), Some("guanyin"));
        assert_eq!(seasonal_guide_id(3), Some("wenchang"));
        assert_eq!(seasonal_guide_id(6), Some("guan-yu"));
        assert_eq!(seasonal_guide_id(9), Some("cai-shen"));
        assert_eq!(seasonal_guide_id(11), Some("guanyin"));
        assert_eq!(seasonal_guide_id(13), None);
        assert_eq!(seasonal_guide_id(0), None);
    }

    #[test]
    fn test_seasonal_guide_rejects_month_out_of_range() {
        let catalog = vec![wood_guide()];
        for month in [0, 13, 99] {
            assert!(matches!(
                seasonal_guide(month, &catalog),
                Err(BaziError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_seasonal_guide_absent_from_catalog() {
        let catalog = vec![wood_guide()];
        assert_eq!(
            seasonal_guide(3, &catalog).unwrap_err(),
            BaziError::UnknownCatalogEntry("wenchang".to_string())
        );
    }

    #[test]
    fn test_explain_mentions_top_guide() {
        let catalog = vec![wood_guide()];
        let ranked = rank(&subject(Element::Fire, [3, 3, 2, 2, 2]), &catalog);
        let text = explain(&ranked, &catalog);
        assert!(text.starts_with("Wood Guide is your closest guide"));
        assert!(explain(&[], &catalog).starts_with("No guides"));
    }
}
