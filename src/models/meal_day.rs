use chrono::NaiveDate;
use serde::Serialize;

/// One resident's meal intent for one calendar date.
///
/// Unique per (resident_id, date). A missing row is a valid state: it means
/// the resident has not answered yet, which is distinct from a row where
/// every flag is false ("confirmed absent").
#[derive(Debug, Clone, Serialize)]
pub struct MealDay {
    pub id: i64,
    pub resident_id: String,
    pub date: NaiveDate,
    pub breakfast: bool,
    pub early_breakfast: bool,
    pub supper: bool,
    pub away: bool,
    pub updated_at: String, // ISO 8601 timestamp
}

/// The mutable flag set of a meal record, as written by an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MealFlags {
    pub breakfast: bool,
    pub early_breakfast: bool,
    pub supper: bool,
    pub away: bool,
}

impl MealFlags {
    /// All flags cleared: the default state of a lazily created record.
    pub fn none() -> Self {
        MealFlags {
            breakfast: false,
            early_breakfast: false,
            supper: false,
            away: false,
        }
    }

    /// The forced state written by away-period reconciliation.
    pub fn forced_away() -> Self {
        MealFlags {
            breakfast: false,
            early_breakfast: false,
            supper: false,
            away: true,
        }
    }

    /// Apply the structural invariants before persisting:
    /// away forces every meal flag off, and early breakfast is a sub-option
    /// of breakfast, so requesting it implies breakfast itself.
    pub fn normalized(mut self) -> Self {
        if self.away {
            self.breakfast = false;
            self.early_breakfast = false;
            self.supper = false;
        } else if self.early_breakfast {
            self.breakfast = true;
        }
        self
    }
}

impl MealDay {
    pub fn flags(&self) -> MealFlags {
        MealFlags {
            breakfast: self.breakfast,
            early_breakfast: self.early_breakfast,
            supper: self.supper,
            away: self.away,
        }
    }
}
