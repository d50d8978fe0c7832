use chrono::NaiveDate;
use serde::Serialize;

/// A registered resident. The id is an opaque external identifier (owned by
/// the surrounding identity system); the registry exists so reporting can
/// tell "no record yet" apart from "not a resident at all".
#[derive(Debug, Clone, Serialize)]
pub struct Resident {
    pub id: String,
    pub name: String,
    pub room: String,
    /// Date of the last explicit "I'm back" action, if any. Periods created
    /// before that action no longer mark dates on/after it as away.
    pub returned_on: Option<NaiveDate>,
    pub created_at: String,
}
