//! Resident meal confirmation and the daily cutoff lock.
//!
//! The sole resident-facing write path. Ordered decision rule:
//! away check first (hard reject), then the cutoff lock (silently keeps the
//! stored breakfast-class values for today only), then the sub-option
//! invariant, then one idempotent upsert with `away = false`.

use crate::config::Config;
use crate::core::clock::Clock;
use crate::db::{away_periods, meal_days};
use crate::errors::{AppError, AppResult};
use crate::models::{MealDay, MealFlags};
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

/// What the resident asked for. `away` is not part of a confirmation:
/// only reconciliation may set it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConfirmRequest {
    pub breakfast: bool,
    pub early_breakfast: bool,
    pub supper: bool,
}

/// The persisted record plus whether the cutoff lock overrode part of the
/// request. The override is a warning, not an error: the write as a whole
/// still succeeded (supper is always applied).
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmOutcome {
    pub meal: MealDay,
    pub breakfast_locked: bool,
}

/// Apply one confirmation request for `(resident_id, date)`.
pub fn confirm(
    conn: &Connection,
    clock: &dyn Clock,
    cfg: &Config,
    resident_id: &str,
    date: NaiveDate,
    req: ConfirmRequest,
) -> AppResult<ConfirmOutcome> {
    // 1. Away coverage rejects the write entirely; never silently merged.
    if away_periods::covers(conn, resident_id, date)? {
        return Err(AppError::DateIsAway { date });
    }

    // 2. The lock applies to today only, strictly after the cutoff.
    //    Past and future dates are never locked.
    let cutoff = cfg.cutoff_time()?;
    let locked = date == clock.today() && clock.time_of_day() > cutoff;

    // 3. Post-cutoff, breakfast-class fields are read-only: the stored
    //    values win. Supper has a different deadline and stays writable.
    let (breakfast, early_breakfast) = if locked {
        let current = meal_days::get_or_create(conn, resident_id, date)?;
        (current.breakfast, current.early_breakfast)
    } else {
        (req.breakfast, req.early_breakfast)
    };

    // 4./5. Invariant normalization happens inside the upsert path.
    let meal = meal_days::upsert(
        conn,
        resident_id,
        date,
        MealFlags {
            breakfast,
            early_breakfast,
            supper: req.supper,
            away: false,
        },
    )?;

    // 6. Let the caller surface a non-fatal warning when the lock ignored
    //    part of the request.
    let breakfast_locked = locked
        && (meal.breakfast != req.breakfast || meal.early_breakfast != req.early_breakfast);

    Ok(ConfirmOutcome {
        meal,
        breakfast_locked,
    })
}
