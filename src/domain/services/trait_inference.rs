//! Trait inference - Day master and element balance to personality and advice
//!
//! The day master selects a baseline profile. Each excessive or missing
//! element then contributes at most one phrase per category on top of it, so
//! the output grows with the number of imbalanced elements, not with their
//! combinations.

use chrono::{DateTime, Utc};

use crate::domain::errors::BaziError;
use crate::domain::services::{element_balance, pillar_calculator};
use crate::domain::value_objects::{
    BaziAnalysis, BirthMoment, DomainAdvice, Element, ElementBalance, PersonalityTraits,
    TraitInference,
};

/// Baseline profile for a day master
struct Baseline {
    main_traits: &'static [&'static str],
    temperament: &'static str,
    social_tendency: &'static str,
    decision_making: &'static str,
    stress_handling: &'static str,
    strength: &'static str,
    weakness: &'static str,
    suggestion: &'static str,
    domains: DomainPhrases,
}

/// One phrase per category, contributed by an imbalanced element
struct ImbalancePhrases {
    strength: Option<&'static str>,
    weakness: &'static str,
    suggestion: &'static str,
    domains: DomainPhrases,
}

struct DomainPhrases {
    career: &'static str,
    health: &'static str,
    relationship: &'static str,
    wealth: &'static str,
    education: &'static str,
    spiritual: &'static str,
}

fn baseline(day_master: Element) -> Baseline {
    match day_master {
        Element::Wood => Baseline {
            main_traits: &["benevolent", "upright", "ambitious", "growth-oriented"],
            temperament: "gentle but persistent, bending without breaking",
            social_tendency: "warm and helpful, drawn to mentoring others",
            decision_making: "principled, weighs long-term growth over quick wins",
            stress_handling: "withdraws to regroup, then pushes forward steadily",
            strength: "Strong sense of justice and compassion",
            weakness: "Can be stubborn once a course is set",
            suggestion: "Leave room for other people's pace and methods",
            domains: DomainPhrases {
                career: "Suited to education, publishing, design and work that nurtures growth",
                health: "Look after the liver and keep tendons supple with stretching",
                relationship: "Offers steady support; say what you need as clearly as you give",
                wealth: "Wealth grows best through patient, long-horizon investment",
                education: "Learns deeply when a subject has a clear purpose",
                spiritual: "Walking in forests or tending plants restores your energy",
            },
        },
        Element::Fire => Baseline {
            main_traits: &["passionate", "expressive", "courteous", "energetic"],
            temperament: "bright and enthusiastic, quick to warm up",
            social_tendency: "outgoing and magnetic, energized by groups",
            decision_making: "fast and intuitive, guided by enthusiasm",
            stress_handling: "flares up quickly and cools down just as fast",
            strength: "Inspires and motivates the people around you",
            weakness: "Impatience can lead to rushed commitments",
            suggestion: "Pause before big promises and let the first spark settle",
            domains: DomainPhrases {
                career: "Shines in sales, media, performance and leadership roles",
                health: "Watch heart health and blood pressure; avoid overexertion",
                relationship: "Romantic and generous; keep the fire steady rather than intense",
                wealth: "Earns quickly; build a habit of saving before spending",
                education: "Learns best through discussion, presentation and practice",
                spiritual: "Candle meditation and sunrise practice calm a busy mind",
            },
        },
        Element::Earth => Baseline {
            main_traits: &["reliable", "honest", "patient", "nurturing"],
            temperament: "calm and grounded, slow to anger",
            social_tendency: "loyal and dependable, keeps a close circle",
            decision_making: "careful and practical, prefers proven paths",
            stress_handling: "absorbs pressure quietly and endures",
            strength: "Trustworthy and consistent under pressure",
            weakness: "Resistance to change can slow progress",
            suggestion: "Try one small new thing each week to stay flexible",
            domains: DomainPhrases {
                career: "Suited to real estate, agriculture, administration and mediation",
                health: "Care for the stomach and spleen with regular, warm meals",
                relationship: "A devoted partner; remember to voice feelings, not just act on them",
                wealth: "Accumulates wealth steadily through property and savings",
                education: "Builds knowledge methodically from firm foundations",
                spiritual: "Grounding practices such as walking barefoot or gardening help",
            },
        },
        Element::Metal => Baseline {
            main_traits: &["decisive", "righteous", "disciplined", "principled"],
            temperament: "firm and resolute, values order",
            social_tendency: "selective and direct, respects integrity",
            decision_making: "logical and decisive, cuts to the essentials",
            stress_handling: "tightens control and relies on structure",
            strength: "Clear judgment and strong execution",
            weakness: "Can come across as rigid or harsh",
            suggestion: "Soften delivery; the message lands better with warmth",
            domains: DomainPhrases {
                career: "Excels in finance, law, engineering and management",
                health: "Protect the lungs and skin; breathe deeply and stay hydrated",
                relationship: "Loyal and protective; show tenderness as well as reliability",
                wealth: "Disciplined budgeting turns steady income into lasting wealth",
                education: "Masters systems and rules quickly through structured study",
                spiritual: "Breathing exercises and bell or chime sounds clear the mind",
            },
        },
        Element::Water => Baseline {
            main_traits: &["wise", "adaptable", "perceptive", "resourceful"],
            temperament: "fluid and reflective, calm on the surface",
            social_tendency: "diplomatic and perceptive, reads a room well",
            decision_making: "strategic, keeps options open until the right moment",
            stress_handling: "adapts and flows around obstacles",
            strength: "Insightful and quick to adapt",
            weakness: "Can drift or avoid commitment",
            suggestion: "Anchor plans with concrete deadlines",
            domains: DomainPhrases {
                career: "Thrives in research, trade, logistics, consulting and communication",
                health: "Support the kidneys and keep warm; rest well at night",
                relationship: "Empathic and understanding; share your inner world more openly",
                wealth: "Finds opportunities in flow: trade, travel and information",
                education: "Absorbs ideas broadly and connects them across fields",
                spiritual: "Time near water and quiet reflection renew your clarity",
            },
        },
    }
}

/// Phrases for an element that appears four or more times
fn excess_phrases(element: Element) -> ImbalancePhrases {
    match element {
        Element::Wood => ImbalancePhrases {
            strength: Some("Abundant drive to grow and start new things"),
            weakness: "Too much wood: prone to stubbornness and overextension",
            suggestion: "Prune commitments and finish before starting anew",
            domains: DomainPhrases {
                career: "Channel surplus drive into one flagship project",
                health: "Excess wood strains the liver; limit alcohol and late nights",
                relationship: "Avoid pushing your plans onto a partner",
                wealth: "Resist spreading money across too many ventures",
                education: "Focus on depth before adding new subjects",
                spiritual: "Metal-toned practices, such as chanting with a bell, bring balance",
            },
        },
        Element::Fire => ImbalancePhrases {
            strength: Some("Strong charisma and momentum"),
            weakness: "Too much fire: restless, impulsive and easily agitated",
            suggestion: "Cool down with regular rest and unhurried routines",
            domains: DomainPhrases {
                career: "Guard against burnout from taking on every opportunity",
                health: "Excess fire stresses the heart; keep cool and sleep early",
                relationship: "Let arguments cool before resolving them",
                wealth: "Avoid impulsive purchases and speculative bets",
                education: "Pace study sessions instead of cramming",
                spiritual: "Water-centred meditation calms an overheated spirit",
            },
        },
        Element::Earth => ImbalancePhrases {
            strength: Some("Deep reserves of patience and stability"),
            weakness: "Too much earth: sluggish, overly cautious and set in habits",
            suggestion: "Introduce movement and variety into daily life",
            domains: DomainPhrases {
                career: "Seek roles that require initiative to avoid stagnation",
                health: "Excess earth burdens digestion; eat light and move daily",
                relationship: "Avoid smothering loved ones with worry",
                wealth: "Let some savings work rather than sit idle",
                education: "Stretch into unfamiliar topics to keep learning fresh",
                spiritual: "Wood-toned practices like forest walks lift heavy energy",
            },
        },
        Element::Metal => ImbalancePhrases {
            strength: Some("Exceptional resolve and precision"),
            weakness: "Too much metal: rigid, critical and hard on others",
            suggestion: "Practice flexibility and give others the benefit of the doubt",
            domains: DomainPhrases {
                career: "Temper perfectionism so teams can keep pace",
                health: "Excess metal tightens the lungs; avoid dry air and grief held in",
                relationship: "Speak gently; sharp words cut deeper than intended",
                wealth: "Do not let caution block sound opportunities",
                education: "Accept imperfect drafts as part of learning",
                spiritual: "Fire-toned practices such as candle meditation melt rigidity",
            },
        },
        Element::Water => ImbalancePhrases {
            strength: Some("Deep intuition and imagination"),
            weakness: "Too much water: indecisive, anxious and prone to overthinking",
            suggestion: "Set firm boundaries and decide with a time limit",
            domains: DomainPhrases {
                career: "Commit to a direction and measure progress",
                health: "Excess water chills the kidneys; keep warm and limit cold food",
                relationship: "Share worries early instead of letting them pool",
                wealth: "Plug leaks: track where money drifts away",
                education: "Turn broad curiosity into a structured syllabus",
                spiritual: "Earth-toned grounding practices steady a restless mind",
            },
        },
    }
}

/// Phrases for an element that does not appear at all
fn deficit_phrases(element: Element) -> ImbalancePhrases {
    match element {
        Element::Wood => ImbalancePhrases {
            strength: None,
            weakness: "Missing wood: growth and initiative can stall",
            suggestion: "Add greenery and morning exercise to build momentum",
            domains: DomainPhrases {
                career: "Seek mentors who help you plan long-term growth",
                health: "Support the liver with greens and regular stretching",
                relationship: "Cultivate patience and kindness in small daily acts",
                wealth: "Set growth goals and invest regularly",
                education: "Keep a learning plan with clear milestones",
                spiritual: "Wear green and spend time among trees",
            },
        },
        Element::Fire => ImbalancePhrases {
            strength: None,
            weakness: "Missing fire: enthusiasm and visibility may be low",
            suggestion: "Seek sunlight, warmth and lively company",
            domains: DomainPhrases {
                career: "Practice presenting your work to gain recognition",
                health: "Keep circulation strong with cardio and warm food",
                relationship: "Express affection openly and often",
                wealth: "Promote your skills; visibility brings opportunity",
                education: "Study in groups to borrow energy from others",
                spiritual: "Light a candle during reflection and wear red accents",
            },
        },
        Element::Earth => ImbalancePhrases {
            strength: None,
            weakness: "Missing earth: stability and follow-through may waver",
            suggestion: "Build routines and keep promises small and steady",
            domains: DomainPhrases {
                career: "Choose roles with clear structure and dependable teams",
                health: "Eat at regular times to support digestion",
                relationship: "Show reliability through consistent small gestures",
                wealth: "Automate savings to build a stable base",
                education: "Review fundamentals before advancing",
                spiritual: "Ground yourself with pottery, gardening or stones",
            },
        },
        Element::Metal => ImbalancePhrases {
            strength: None,
            weakness: "Missing metal: decisiveness and discipline may be lacking",
            suggestion: "Use checklists and deadlines to sharpen execution",
            domains: DomainPhrases {
                career: "Develop decisiveness; take ownership of clear outcomes",
                health: "Strengthen the lungs with breathing practice",
                relationship: "Set healthy boundaries and honour them",
                wealth: "Keep a strict budget and clear financial rules",
                education: "Study logic, systems and structured methods",
                spiritual: "Wear white or metal jewellery; chimes help focus",
            },
        },
        Element::Water => ImbalancePhrases {
            strength: None,
            weakness: "Missing water: flexibility and reflection may be scarce",
            suggestion: "Slow down, rest well and reflect before acting",
            domains: DomainPhrases {
                career: "Build networks and information sources to widen options",
                health: "Hydrate well and protect kidney energy with rest",
                relationship: "Listen more and adapt to your partner's rhythm",
                wealth: "Keep liquid reserves and diversify income streams",
                education: "Read widely and journal to deepen insight",
                spiritual: "Spend quiet time near water; wear black or blue",
            },
        },
    }
}

/// Infer traits and advice for a day master and balance
///
/// Fully deterministic: imbalanced elements are visited in canonical order,
/// excessive before missing for each element.
pub fn infer(day_master: Element, balance: &ElementBalance) -> TraitInference {
    let base = baseline(day_master);

    let traits = PersonalityTraits {
        main_traits: base.main_traits.iter().map(|t| t.to_string()).collect(),
        temperament: base.temperament.to_string(),
        social_tendency: base.social_tendency.to_string(),
        decision_making: base.decision_making.to_string(),
        stress_handling: base.stress_handling.to_string(),
    };

    let mut strengths = vec![base.strength.to_string()];
    let mut weaknesses = vec![base.weakness.to_string()];
    let mut suggestions = vec![base.suggestion.to_string()];
    let mut domains = DomainAdvice::default();
    push_domains(&mut domains, &base.domains);

    for element in Element::ALL {
        let phrases = if balance.is_excessive(element) {
            excess_phrases(element)
        } else if balance.is_missing(element) {
            deficit_phrases(element)
        } else {
            continue;
        };

        if let Some(strength) = phrases.strength {
            strengths.push(strength.to_string());
        }
        weaknesses.push(phrases.weakness.to_string());
        suggestions.push(phrases.suggestion.to_string());
        push_domains(&mut domains, &phrases.domains);
    }

    TraitInference {
        traits,
        strengths,
        weaknesses,
        suggestions,
        domains,
    }
}

fn push_domains(domains: &mut DomainAdvice, phrases: &DomainPhrases) {
    domains.career.push(phrases.career.to_string());
    domains.health.push(phrases.health.to_string());
    domains.relationship.push(phrases.relationship.to_string());
    domains.wealth.push(phrases.wealth.to_string());
    domains.education.push(phrases.education.to_string());
    domains.spiritual.push(phrases.spiritual.to_string());
}

/// Birth moment to full analysis: chart, balance and inferred traits
pub fn analyze(birth: &BirthMoment, calculated_at: DateTime<Utc>) -> Result<BaziAnalysis, BaziError> {
    let chart = pillar_calculator::calculate(birth, calculated_at)?;
    let balance = element_balance::aggregate(&chart);
    let inference = infer(chart.day_master, &balance);
    Ok(BaziAnalysis::new(chart, balance, inference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Gender;
    use chrono::TimeZone;

    #[test]
    fn test_balanced_chart_has_baseline_only() {
        let balance = ElementBalance::from_counts([3, 3, 2, 2, 2]);
        let inference = infer(Element::Earth, &balance);

        assert_eq!(inference.traits.main_traits[0], "reliable");
        assert_eq!(inference.strengths.len(), 1);
        assert_eq!(inference.weaknesses.len(), 1);
        assert_eq!(inference.suggestions.len(), 1);
        assert_eq!(inference.domains.career.len(), 1);
        assert_eq!(inference.domains.spiritual.len(), 1);
    }

    #[test]
    fn test_each_imbalance_adds_one_phrase_per_category() {
        // wood missing, fire and metal excessive
        let balance = ElementBalance::from_counts([0, 4, 2, 5, 1]);
        let inference = infer(Element::Metal, &balance);

        assert_eq!(inference.weaknesses.len(), 4);
        assert_eq!(inference.suggestions.len(), 4);
        assert_eq!(inference.domains.health.len(), 4);
        assert_eq!(inference.domains.education.len(), 4);
        // missing elements add no strength
        assert_eq!(inference.strengths.len(), 3);
        assert!(inference.weaknesses[1].starts_with("Missing wood"));
        assert!(inference.weaknesses[2].starts_with("Too much fire"));
        assert!(inference.weaknesses[3].starts_with("Too much metal"));
    }

    #[test]
    fn test_every_day_master_has_distinct_baseline() {
        let balance = ElementBalance::from_counts([3, 3, 2, 2, 2]);
        let temperaments: std::collections::HashSet<String> = Element::ALL
            .iter()
            .map(|e| infer(*e, &balance).traits.temperament)
            .collect();
        assert_eq!(temperaments.len(), 5);
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let birth = BirthMoment::new("Ana", Gender::Female, 1992, 11, 8, 17, 45);
        let at = Utc.with_ymd_and_hms(2024, 3, 3, 3, 3, 3).unwrap();

        let first = analyze(&birth, at).unwrap();
        let second = analyze(&birth, at).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.chart.day_master, first.chart.day_pillar.element);
    }

    #[test]
    fn test_analyze_rejects_invalid_birth() {
        let birth = BirthMoment::new("Ana", Gender::Female, 1992, 11, 31, 17, 45);
        let at = Utc.with_ymd_and_hms(2024, 3, 3, 3, 3, 3).unwrap();
        assert!(matches!(analyze(&birth, at), Err(BaziError::InvalidInput(_))));
    }
}
