//! Cache keys - Composite keys for cached analysis results
//!
//! Keys are structured rather than concatenated at call sites, so two cache
//! categories can never collide on the same storage key.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::SubjectId;

/// What kind of result a cache entry holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheKind {
    Analysis,
    Compatibility,
    DailyFortune,
}

impl CacheKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::Compatibility => "compatibility",
            Self::DailyFortune => "daily_fortune",
        }
    }
}

/// Key of a cached result: subject, optional day and kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    pub subject_id: SubjectId,
    /// Set only for date-scoped results
    pub date: Option<NaiveDate>,
    pub kind: CacheKind,
}

impl CacheKey {
    pub fn new(subject_id: SubjectId, kind: CacheKind) -> Self {
        Self {
            subject_id,
            date: None,
            kind,
        }
    }

    pub fn dated(subject_id: SubjectId, date: NaiveDate, kind: CacheKind) -> Self {
        Self {
            subject_id,
            date: Some(date),
            kind,
        }
    }

    pub fn analysis(subject_id: SubjectId) -> Self {
        Self::new(subject_id, CacheKind::Analysis)
    }

    pub fn compatibility(subject_id: SubjectId) -> Self {
        Self::new(subject_id, CacheKind::Compatibility)
    }

    pub fn daily_fortune(subject_id: SubjectId, date: NaiveDate) -> Self {
        Self::dated(subject_id, date, CacheKind::DailyFortune)
    }

    /// Canonical storage form, `kind/subject[/YYYY-MM-DD]`
    pub fn storage_key(&self) -> String {
        match self.date {
            Some(date) => format!(
                "{}/{}/{}",
                self.kind.as_str(),
                self.subject_id,
                date.format("%Y-%m-%d")
            ),
            None => format!("{}/{}", self.kind.as_str(), self.subject_id),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.storage_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_storage_keys_are_distinct_per_kind_and_date() {
        let subject = SubjectId::from_uuid(Uuid::nil());
        let day = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();

        assert_eq!(
            CacheKey::analysis(subject).storage_key(),
            "analysis/00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            CacheKey::daily_fortune(subject, day).storage_key(),
            "daily_fortune/00000000-0000-0000-0000-000000000000/2024-02-10"
        );
        assert_ne!(
            CacheKey::analysis(subject).storage_key(),
            CacheKey::compatibility(subject).storage_key()
        );
    }
}
