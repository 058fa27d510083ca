//! Element balance aggregation

use crate::domain::value_objects::{Chart, ElementBalance};

pub const STEM_WEIGHT: u8 = 2;
pub const BRANCH_WEIGHT: u8 = 1;

/// Weighted element counts over the four pillars (always summing to 12)
pub fn aggregate(chart: &Chart) -> ElementBalance {
    let mut counts = [0u8; 5];
    for pillar in chart.pillars() {
        counts[pillar.stem.element().index()] += STEM_WEIGHT;
        counts[pillar.branch.element().index()] += BRANCH_WEIGHT;
    }
    ElementBalance::from_counts(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::pillar_calculator;
    use crate::domain::value_objects::{BirthMoment, Element, Gender};
    use chrono::{Datelike, NaiveDate, TimeZone, Utc};

    fn chart_for(year: i32, month: u32, day: u32, hour: u32) -> Chart {
        let birth = BirthMoment::new("Subject", Gender::Female, year, month, day, hour, 30);
        pillar_calculator::calculate(&birth, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
            .unwrap()
    }

    #[test]
    fn test_counts_always_sum_to_twelve_and_partition_holds() {
        let mut date = NaiveDate::from_ymd_opt(1950, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(1953, 1, 1).unwrap();
        let mut hour = 0;
        while date < end {
            let chart = chart_for(date.year(), date.month(), date.day(), hour);
            let balance = aggregate(&chart);
            assert_eq!(balance.total(), 12);

            for element in Element::ALL {
                let count = balance.count(element);
                assert_eq!(balance.is_missing(element), count == 0);
                assert_eq!(balance.is_excessive(element), count >= 4);
                assert!(!(balance.is_missing(element) && balance.is_excessive(element)));
            }

            hour = (hour + 7) % 24;
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_known_chart_balance() {
        // 庚午 丁寅 甲戌 庚午
        let balance = aggregate(&chart_for(1990, 1, 1, 12));
        assert_eq!(balance.wood, 3);
        assert_eq!(balance.fire, 4);
        assert_eq!(balance.earth, 1);
        assert_eq!(balance.metal, 4);
        assert_eq!(balance.water, 0);
        assert_eq!(balance.strongest, Element::Fire);
        assert_eq!(balance.weakest, Element::Water);
        assert_eq!(balance.missing, vec![Element::Water]);
        assert_eq!(balance.excessive, vec![Element::Fire, Element::Metal]);
    }
}
