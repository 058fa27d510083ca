//! Pillar calculator - Birth moment to four pillars
//!
//! Uses the calendar-month approximation: the month pillar switches on the
//! first of each calendar month rather than at the solar terms, and the year
//! pillar switches on January 1st. Charts near a term boundary therefore differ
//! from an almanac, which is accepted so that reference outputs stay stable.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::errors::BaziError;
use crate::domain::value_objects::{BirthMoment, Chart, Pillar};

/// Day-count epoch of the day pillar formula
const DAY_EPOCH: (i32, u32, u32) = (1970, 1, 1);
const DAY_STEM_OFFSET: i64 = 15;
const DAY_BRANCH_OFFSET: i64 = 49;

/// Compute the chart for a birth moment
///
/// Every field of `birth` is validated before any arithmetic. `calculated_at`
/// is stamped on the chart as-is so callers control reproducibility.
pub fn calculate(birth: &BirthMoment, calculated_at: DateTime<Utc>) -> Result<Chart, BaziError> {
    birth.validate()?;
    let date = birth.date().ok_or_else(|| {
        BaziError::InvalidInput(format!(
            "{}-{}-{} is not a date",
            birth.year, birth.month, birth.day
        ))
    })?;

    let year_pillar = year_pillar(birth.year);
    let month_pillar = month_pillar(year_pillar.stem.index() as i64, birth.month);
    let day_pillar = day_pillar(day_count(date));
    let hour_pillar = hour_pillar(birth.hour);

    Ok(Chart {
        year_pillar,
        month_pillar,
        day_pillar,
        hour_pillar,
        day_master: day_pillar.element,
        birth_info: birth.clone(),
        calculated_at,
    })
}

pub fn year_pillar(year: i32) -> Pillar {
    let offset = year as i64 - 4;
    Pillar::from_indices(offset, offset)
}

pub fn month_pillar(year_stem_index: i64, month: u32) -> Pillar {
    let month = month as i64;
    Pillar::from_indices(year_stem_index * 2 + month, month + 1)
}

/// Days since the epoch; negative before 1970
pub fn day_count(date: NaiveDate) -> i64 {
    let (y, m, d) = DAY_EPOCH;
    match NaiveDate::from_ymd_opt(y, m, d) {
        Some(epoch) => date.signed_duration_since(epoch).num_days(),
        None => 0,
    }
}

pub fn day_pillar(day_count: i64) -> Pillar {
    Pillar::from_indices(day_count + DAY_STEM_OFFSET, day_count + DAY_BRANCH_OFFSET)
}

pub fn hour_pillar(hour: u32) -> Pillar {
    let hour = hour as i64;
    Pillar::from_indices(hour * 2 + 12, (hour + 1) / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{EarthlyBranch, Element, Gender, HeavenlyStem};
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
    }

    fn birth(year: i32, month: u32, day: u32, hour: u32) -> BirthMoment {
        BirthMoment::new("Chen Wei", Gender::Male, year, month, day, hour, 0)
    }

    #[test]
    fn test_pillars_for_new_year_1990_noon() {
        let chart = calculate(&birth(1990, 1, 1, 12), fixed_time()).unwrap();

        for pillar in chart.pillars() {
            assert!(HeavenlyStem::ALL.contains(&pillar.stem));
            assert!(EarthlyBranch::ALL.contains(&pillar.branch));
            assert_eq!(pillar.element, pillar.stem.element());
        }

        // (1990 - 4) = 1986: 1986 % 10 = 6 (庚), 1986 % 12 = 6 (午)
        assert_eq!(chart.year_pillar.stem, HeavenlyStem::Geng);
        assert_eq!(chart.year_pillar.branch, EarthlyBranch::Wu);
        // month stem (6 * 2 + 1) % 10 = 3 (丁), branch (1 + 1) % 12 = 2 (寅)
        assert_eq!(chart.month_pillar.stem, HeavenlyStem::Ding);
        assert_eq!(chart.month_pillar.branch, EarthlyBranch::Yin);
        // 7305 days after the epoch: (7305 + 15) % 10 = 0, (7305 + 49) % 12 = 10
        assert_eq!(chart.day_pillar.stem, HeavenlyStem::Jia);
        assert_eq!(chart.day_pillar.branch, EarthlyBranch::Xu);
        // hour stem (24 + 12) % 10 = 6 (庚), branch 13 / 2 = 6 (午)
        assert_eq!(chart.hour_pillar.stem, HeavenlyStem::Geng);
        assert_eq!(chart.hour_pillar.branch, EarthlyBranch::Wu);

        assert_eq!(chart.day_master, Element::Wood);
        assert_eq!(chart.zodiac(), "horse");
    }

    #[test]
    fn test_calculation_is_deterministic() {
        let moment = birth(1985, 7, 23, 6);
        let first = calculate(&moment, fixed_time()).unwrap();
        let second = calculate(&moment, fixed_time()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_day_count_before_epoch_wraps_non_negative() {
        let date = NaiveDate::from_ymd_opt(1969, 12, 31).unwrap();
        assert_eq!(day_count(date), -1);
        // (-1 + 15) % 10 = 4 (戊), (-1 + 49) % 12 = 0 (子)
        let pillar = day_pillar(-1);
        assert_eq!(pillar.stem, HeavenlyStem::Wu);
        assert_eq!(pillar.branch, EarthlyBranch::Zi);
    }

    #[test]
    fn test_late_night_hour_maps_to_zi() {
        let pillar = hour_pillar(23);
        assert_eq!(pillar.branch, EarthlyBranch::Zi);
        // (46 + 12) % 10 = 8 (壬)
        assert_eq!(pillar.stem, HeavenlyStem::Ren);
    }

    #[test]
    fn test_invalid_input_rejected_before_arithmetic() {
        let result = calculate(&birth(1990, 2, 30, 12), fixed_time());
        assert!(matches!(result, Err(BaziError::InvalidInput(_))));

        let result = calculate(&birth(1990, 1, 1, 24), fixed_time());
        assert!(matches!(result, Err(BaziError::InvalidInput(_))));
    }

    #[test]
    fn test_year_pillar_cycle_repeats_every_sixty_years() {
        assert_eq!(year_pillar(1924), year_pillar(1984));
        assert_eq!(year_pillar(1984).stem, HeavenlyStem::Jia);
        assert_eq!(year_pillar(1984).branch, EarthlyBranch::Zi);
    }
}
