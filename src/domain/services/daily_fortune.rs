//! Daily fortune engine - Chart and date to a day-scoped fortune
//!
//! The day is described by five element weights. Every element starts at 20;
//! the season, the current two-hour window and the day of the month then add
//! to it. Category scores, lucky windows and warnings are read off those
//! weights relative to the chart's day master.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::domain::entities::GuideProfile;
use crate::domain::services::random_source::RandomSource;
use crate::domain::value_objects::{
    CategoryFortune, CategoryFortunes, Chart, DailyAdvice, DailyFortune, EarthlyBranch, Element,
    ElementWeights, FortuneCategory, FortuneWarning, LuckyItems, Severity, TimeWindow, Trend,
};

pub const BASE_WEIGHT: i32 = 20;
pub const SEASON_BONUS: i32 = 30;
pub const SEASON_ADJUSTMENT: i32 = 10;
pub const HOUR_BONUS: i32 = 15;
pub const DAY_BONUS: i32 = 10;
pub const PERTURBATION_RANGE: i32 = 10;
pub const TOP_WINDOWS: usize = 6;
const MAX_GUIDE_LINES: usize = 3;

/// Element order indexed by `day_of_month % 5`
const DAY_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

/// Season ruler, its supported element and its weakened element
fn season(month: u32) -> (Element, Element, Element) {
    match month {
        2..=4 => (Element::Wood, Element::Fire, Element::Metal),
        5..=7 => (Element::Fire, Element::Earth, Element::Water),
        8..=10 => (Element::Metal, Element::Water, Element::Wood),
        _ => (Element::Water, Element::Wood, Element::Fire),
    }
}

/// Weights of the five elements for a date, read at `hour`
pub fn element_weights(date: NaiveDate, hour: u32) -> ElementWeights {
    let mut weights = ElementWeights::uniform(BASE_WEIGHT);

    let (ruler, supported, weakened) = season(date.month());
    weights.add(ruler, SEASON_BONUS);
    weights.add(supported, SEASON_ADJUSTMENT);
    weights.add(weakened, -SEASON_ADJUSTMENT);

    weights.add(EarthlyBranch::from_hour(hour).element(), HOUR_BONUS);
    weights.add(DAY_ELEMENTS[(date.day() % 5) as usize], DAY_BONUS);

    weights
}

/// Day master and day weights, with the relation helpers the rule tables read
struct FortuneContext {
    day_master: Element,
    weights: ElementWeights,
}

impl FortuneContext {
    fn weight(&self, element: Element) -> i32 {
        self.weights.get(element)
    }

    fn self_weight(&self) -> i32 {
        self.weight(self.day_master)
    }

    /// Element restraining the day master
    fn officer(&self) -> i32 {
        self.weight(self.day_master.controlled_by())
    }

    /// Element the day master restrains
    fn wealth_star(&self) -> i32 {
        self.weight(self.day_master.controls())
    }

    /// Element feeding the day master
    fn resource(&self) -> i32 {
        self.weight(self.day_master.generated_by())
    }

    /// Element the day master feeds
    fn output(&self) -> i32 {
        self.weight(self.day_master.generates())
    }
}

struct CategoryRule {
    delta: i32,
    applies: fn(&FortuneContext) -> bool,
}

fn rule(delta: i32, applies: fn(&FortuneContext) -> bool) -> CategoryRule {
    CategoryRule { delta, applies }
}

/// Additive rule table of a category; positive deltas are bonuses
fn rules(category: FortuneCategory) -> Vec<CategoryRule> {
    match category {
        FortuneCategory::Career => vec![
            rule(20, |c| c.officer() > 25 && c.officer() <= 45),
            rule(10, |c| c.self_weight() > 35),
            rule(-15, |c| c.officer() > 45),
            rule(-10, |c| c.self_weight() < 15),
        ],
        FortuneCategory::Wealth => vec![
            rule(20, |c| c.wealth_star() > 30),
            rule(-20, |c| c.wealth_star() < 15),
            rule(-10, |c| c.self_weight() < 15),
        ],
        FortuneCategory::Love => vec![
            rule(15, |c| c.weight(Element::Fire) > 30),
            rule(10, |c| c.output() > 30),
            rule(-15, |c| c.weight(Element::Metal) > 40),
            rule(-10, |c| c.weight(Element::Water) > 45),
        ],
        FortuneCategory::Health => vec![
            rule(15, |c| (20..=35).contains(&c.self_weight())),
            rule(-20, |c| c.officer() > 40),
            rule(-10, |c| c.weights.spread() > 40),
        ],
        FortuneCategory::Study => vec![
            rule(20, |c| c.resource() > 30),
            rule(10, |c| c.weight(Element::Wood) > 35),
            rule(-15, |c| c.resource() < 15),
        ],
        FortuneCategory::Travel => vec![
            rule(15, |c| c.weight(Element::Water) > 30),
            rule(10, |c| c.weight(Element::Wood) > 30),
            rule(-15, |c| c.weight(Element::Earth) > 40),
        ],
    }
}

fn lucky_element(category: FortuneCategory, day_master: Element) -> Element {
    match category {
        FortuneCategory::Career => day_master.controlled_by(),
        FortuneCategory::Wealth => day_master.controls(),
        FortuneCategory::Love => Element::Fire,
        FortuneCategory::Health => day_master,
        FortuneCategory::Study => day_master.generated_by(),
        FortuneCategory::Travel => Element::Water,
    }
}

fn category_text(category: FortuneCategory, trend: Trend) -> (&'static str, &'static str) {
    match (category, trend) {
        (FortuneCategory::Career, Trend::Rising) => (
            "Recognition comes easily; authority figures are receptive",
            "Pitch ideas and take the lead on visible work",
        ),
        (FortuneCategory::Career, Trend::Stable) => (
            "A steady working day without major swings",
            "Clear the backlog and prepare for the next push",
        ),
        (FortuneCategory::Career, Trend::Declining) => (
            "Pressure from above or friction with colleagues is likely",
            "Keep a low profile and double-check commitments",
        ),
        (FortuneCategory::Wealth, Trend::Rising) => (
            "Money flows in through effort and good timing",
            "Follow up on payments and consider measured opportunities",
        ),
        (FortuneCategory::Wealth, Trend::Stable) => (
            "Finances hold steady",
            "Stick to the budget and review recurring costs",
        ),
        (FortuneCategory::Wealth, Trend::Declining) => (
            "Unexpected expenses or losses are possible",
            "Avoid large purchases, loans and speculative bets",
        ),
        (FortuneCategory::Love, Trend::Rising) => (
            "Warmth and charm are heightened",
            "Plan time together or reach out to someone new",
        ),
        (FortuneCategory::Love, Trend::Stable) => (
            "Relationships are calm and comfortable",
            "Small gestures of care go a long way",
        ),
        (FortuneCategory::Love, Trend::Declining) => (
            "Misunderstandings can flare up",
            "Listen first and postpone difficult conversations",
        ),
        (FortuneCategory::Health, Trend::Rising) => (
            "Energy is balanced and recovery is quick",
            "A good day to start a new exercise routine",
        ),
        (FortuneCategory::Health, Trend::Stable) => (
            "Health is steady",
            "Keep regular meals and sleep",
        ),
        (FortuneCategory::Health, Trend::Declining) => (
            "Energy is strained and fatigue builds easily",
            "Rest, hydrate and avoid strenuous activity",
        ),
        (FortuneCategory::Study, Trend::Rising) => (
            "Concentration and memory are sharp",
            "Tackle difficult material or sit exams",
        ),
        (FortuneCategory::Study, Trend::Stable) => (
            "Learning progresses at an even pace",
            "Review notes and consolidate what you know",
        ),
        (FortuneCategory::Study, Trend::Declining) => (
            "Focus drifts and retention is weak",
            "Study in short sessions with breaks",
        ),
        (FortuneCategory::Travel, Trend::Rising) => (
            "Journeys go smoothly and bring opportunity",
            "Good for trips, moves and meeting people far away",
        ),
        (FortuneCategory::Travel, Trend::Stable) => (
            "Travel is uneventful",
            "Keep plans simple and leave extra time",
        ),
        (FortuneCategory::Travel, Trend::Declining) => (
            "Delays and mix-ups are likely on the road",
            "Postpone non-essential trips and confirm bookings",
        ),
    }
}

fn clamp_score(value: i32) -> u8 {
    value.clamp(0, 100) as u8
}

fn category_fortune(category: FortuneCategory, ctx: &FortuneContext) -> CategoryFortune {
    let mut score = 50;
    let mut bonus = false;
    let mut penalty = false;
    for rule in rules(category) {
        if (rule.applies)(ctx) {
            score += rule.delta;
            if rule.delta > 0 {
                bonus = true;
            } else {
                penalty = true;
            }
        }
    }

    let trend = if bonus {
        Trend::Rising
    } else if penalty {
        Trend::Declining
    } else {
        Trend::Stable
    };
    let (description, suggestion) = category_text(category, trend);
    let lucky = lucky_element(category, ctx.day_master);

    CategoryFortune {
        category,
        score: clamp_score(score),
        trend,
        description: description.to_string(),
        suggestion: suggestion.to_string(),
        lucky_color: lucky.colors()[0].to_string(),
        lucky_numbers: lucky.lucky_numbers().to_vec(),
    }
}

fn category_fortunes(ctx: &FortuneContext) -> CategoryFortunes {
    CategoryFortunes {
        career: category_fortune(FortuneCategory::Career, ctx),
        wealth: category_fortune(FortuneCategory::Wealth, ctx),
        love: category_fortune(FortuneCategory::Love, ctx),
        health: category_fortune(FortuneCategory::Health, ctx),
        study: category_fortune(FortuneCategory::Study, ctx),
        travel: category_fortune(FortuneCategory::Travel, ctx),
    }
}

fn overall_luck(ctx: &FortuneContext, random: &dyn RandomSource) -> u8 {
    let mut luck = 50;
    let own = ctx.self_weight();
    if own > 35 {
        luck += 25;
    } else if own < 15 {
        luck -= 15;
    }
    let spread = ctx.weights.spread();
    if spread < 20 {
        luck += 15;
    } else if spread > 40 {
        luck -= 10;
    }
    luck += random
        .perturbation(-PERTURBATION_RANGE, PERTURBATION_RANGE)
        .clamp(-PERTURBATION_RANGE, PERTURBATION_RANGE);
    clamp_score(luck)
}

fn activity(element: Element) -> &'static str {
    match element {
        Element::Wood => "Plan, learn and start new projects",
        Element::Fire => "Meet people, present and promote",
        Element::Earth => "Organize, negotiate and consolidate",
        Element::Metal => "Decide, sign and settle accounts",
        Element::Water => "Reflect, research and travel",
    }
}

/// The twelve two-hour windows ranked by luck, best six first
///
/// Windows are laid out chronologically from 子 (23:00); the sort is stable so
/// equal luck keeps that order.
pub fn auspicious_windows(day_master: Element, weights: &ElementWeights) -> Vec<TimeWindow> {
    let mut windows: Vec<TimeWindow> = EarthlyBranch::ALL
        .iter()
        .map(|branch| {
            let element = branch.element();
            let mut luck = 50;
            if element == day_master {
                luck += 20;
            }
            if weights.get(element) > 35 {
                luck += 15;
            }
            let start_hour = branch.start_hour();
            TimeWindow {
                branch: *branch,
                start_hour,
                end_hour: (start_hour + 2) % 24,
                element,
                luck: clamp_score(luck),
                activity: activity(element).to_string(),
            }
        })
        .collect();

    windows.sort_by(|a, b| b.luck.cmp(&a.luck));
    windows.truncate(TOP_WINDOWS);
    windows
}

fn advice(overall_luck: u8, dominant: Element) -> DailyAdvice {
    let (mut dos, donts): (Vec<String>, Vec<String>) = if overall_luck >= 70 {
        (
            vec![
                "Launch plans and make important requests".to_string(),
                "Reach out to people who can help you".to_string(),
            ],
            vec!["Do not let overconfidence skip the details".to_string()],
        )
    } else if overall_luck >= 40 {
        (
            vec![
                "Keep to routine and finish open tasks".to_string(),
                "Prepare groundwork for later moves".to_string(),
            ],
            vec!["Avoid forcing outcomes that are not ready".to_string()],
        )
    } else {
        (
            vec!["Rest, reflect and stay close to trusted people".to_string()],
            vec![
                "Postpone major decisions and signatures".to_string(),
                "Avoid confrontations and risky ventures".to_string(),
            ],
        )
    };
    dos.push(format!(
        "Today's {} energy favours: {}",
        dominant,
        activity(dominant).to_lowercase()
    ));
    DailyAdvice { dos, donts }
}

fn guide_guidance(guides: &[GuideProfile], weights: &ElementWeights) -> Vec<String> {
    guides
        .iter()
        .take(MAX_GUIDE_LINES)
        .map(|guide| {
            if weights.get(guide.element) > 35 {
                format!(
                    "{}'s {} energy is strong today; a good day to seek their blessing",
                    guide.name, guide.element
                )
            } else {
                format!(
                    "{} offers steady support today; keep up your regular practice",
                    guide.name
                )
            }
        })
        .collect()
}

fn warnings(categories: &CategoryFortunes, weights: &ElementWeights) -> Vec<FortuneWarning> {
    let mut warnings = Vec::new();
    if categories.health.score < 40 {
        warnings.push(FortuneWarning {
            severity: Severity::High,
            message: "Health energy is low today".to_string(),
            deferral: "Defer strenuous exercise, surgery and late nights".to_string(),
        });
    }
    if categories.wealth.score < 30 {
        warnings.push(FortuneWarning {
            severity: Severity::Medium,
            message: "Financial luck is weak today".to_string(),
            deferral: "Defer investments, large purchases and lending".to_string(),
        });
    }
    if categories.love.score < 35 {
        warnings.push(FortuneWarning {
            severity: Severity::Low,
            message: "Relationships are sensitive today".to_string(),
            deferral: "Defer serious relationship talks and commitments".to_string(),
        });
    }
    if weights.spread() > 45 {
        warnings.push(FortuneWarning {
            severity: Severity::Medium,
            message: "The day's elements are sharply unbalanced".to_string(),
            deferral: "Defer major decisions until the balance evens out".to_string(),
        });
    }
    warnings
}

/// Compute the fortune of a chart for a day
///
/// `now` is the caller's local clock reading; its hour selects the current
/// two-hour window. `target_date` defaults to `now`'s date.
pub fn calculate(
    chart: &Chart,
    now: NaiveDateTime,
    target_date: Option<NaiveDate>,
    guides: &[GuideProfile],
    random: &dyn RandomSource,
) -> DailyFortune {
    let date = target_date.unwrap_or_else(|| now.date());
    let ctx = FortuneContext {
        day_master: chart.day_master,
        weights: element_weights(date, now.hour()),
    };

    let categories = category_fortunes(&ctx);

    let overall_luck = overall_luck(&ctx, random);
    let resource = chart.day_master.generated_by();
    let lucky_items = LuckyItems {
        colors: vec![
            resource.colors()[0].to_string(),
            chart.day_master.colors()[0].to_string(),
        ],
        numbers: resource.lucky_numbers().to_vec(),
        direction: resource.direction().to_string(),
        element: resource,
    };

    DailyFortune {
        date,
        overall_luck,
        element_weights: ctx.weights,
        advice: advice(overall_luck, ctx.weights.dominant()),
        guide_guidance: guide_guidance(guides, &ctx.weights),
        auspicious_windows: auspicious_windows(chart.day_master, &ctx.weights),
        warnings: warnings(&categories, &ctx.weights),
        categories,
        lucky_items,
    }
}
