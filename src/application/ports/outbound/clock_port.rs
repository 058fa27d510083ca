use chrono::{DateTime, NaiveDateTime, Utc};

/// Source of the current time
pub trait ClockPort: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;

    /// Wall-clock time in the subject's local zone
    fn now_local(&self) -> NaiveDateTime;
}
