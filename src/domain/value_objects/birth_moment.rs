//! Birth moment - the raw input a chart is computed from

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::errors::BaziError;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;
pub const MAX_NAME_LENGTH: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// Local birth date and time of a subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthMoment {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub name: String,
    pub gender: Gender,
}

impl BirthMoment {
    pub fn new(
        name: impl Into<String>,
        gender: Gender,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            name: name.into(),
            gender,
        }
    }

    /// Check every field, including the day-of-month bound for the given month
    pub fn validate(&self) -> Result<(), BaziError> {
        if self.name.trim().is_empty() {
            return Err(BaziError::InvalidInput("name cannot be empty".to_string()));
        }
        if self.name.len() > MAX_NAME_LENGTH {
            return Err(BaziError::InvalidInput(format!(
                "name cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(BaziError::InvalidInput(format!(
                "year {} outside {}..={}",
                self.year, MIN_YEAR, MAX_YEAR
            )));
        }
        if !(1..=12).contains(&self.month) {
            return Err(BaziError::InvalidInput(format!(
                "month {} outside 1..=12",
                self.month
            )));
        }
        if self.day == 0 || self.day > days_in_month(self.year, self.month) {
            return Err(BaziError::InvalidInput(format!(
                "day {} is not valid for {}-{:02}",
                self.day, self.year, self.month
            )));
        }
        if self.hour > 23 {
            return Err(BaziError::InvalidInput(format!(
                "hour {} outside 0..=23",
                self.hour
            )));
        }
        if self.minute > 59 {
            return Err(BaziError::InvalidInput(format!(
                "minute {} outside 0..=59",
                self.minute
            )));
        }
        Ok(())
    }

    /// Calendar date of birth; `None` until the moment has been validated
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
