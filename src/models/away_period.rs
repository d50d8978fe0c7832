use chrono::NaiveDate;
use serde::Serialize;

/// A closed date interval `[start_date, end_date]` during which a resident
/// declared absence. Periods may overlap; a date is away if any period
/// covers it. Rows are never edited after creation — corrections happen by
/// recording a return or adding another period.
#[derive(Debug, Clone, Serialize)]
pub struct AwayPeriod {
    pub id: i64,
    pub resident_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: String, // ISO 8601 timestamp (UTC)
}

impl AwayPeriod {
    /// Inclusive on both ends.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Number of days in the interval.
    pub fn len_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
