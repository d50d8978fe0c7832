//! Away-period reconciliation.
//!
//! Creating a period forces every covered day's meal record to the away
//! state, one idempotent upsert per day. The loop is bounded and resumable:
//! a crash mid-range leaves already-forced days valid, and re-running the
//! same range is a no-op for them. Reconciliation is the only writer that
//! sets `away = true`; every other write path clears it.

use crate::core::clock::Clock;
use crate::db::{away_periods, meal_days, residents};
use crate::errors::{AppError, AppResult};
use crate::models::{AwayPeriod, MealDay, MealFlags};
use crate::utils::date::days_in_range;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Persist an away period and force every covered day to the away state.
///
/// Rejects `start > end` before any write. Each day's upsert is its own
/// atomic unit; no all-or-nothing transaction spans the range.
pub fn mark_away(
    conn: &Connection,
    resident_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<AwayPeriod> {
    if start > end {
        return Err(AppError::InvalidRange { start, end });
    }

    let period = away_periods::insert(conn, resident_id, start, end)?;

    for day in days_in_range(start, end) {
        meal_days::upsert(conn, resident_id, day, MealFlags::forced_away())?;
    }

    Ok(period)
}

/// True if the date falls inside any effective away period for the resident.
pub fn is_away(conn: &Connection, resident_id: &str, date: NaiveDate) -> AppResult<bool> {
    away_periods::covers(conn, resident_id, date)
}

/// Lazy-create read with reconciliation.
///
/// Returns the record for the key, creating the all-false default if
/// missing. If the stored away flag disagrees with the effective period
/// coverage (a row that missed a bulk pass, or a forced row whose coverage
/// was released by a return), the row is brought in line here rather than
/// waiting for the next write.
pub fn get_day(conn: &Connection, resident_id: &str, date: NaiveDate) -> AppResult<MealDay> {
    let meal = meal_days::get_or_create(conn, resident_id, date)?;
    let covered = is_away(conn, resident_id, date)?;
    if meal.away != covered {
        let flags = if covered {
            MealFlags::forced_away()
        } else {
            // a forced row carries no meal intent, so releasing it means
            // falling back to the all-false default
            MealFlags::none()
        };
        return meal_days::upsert(conn, resident_id, date, flags);
    }
    Ok(meal)
}

/// Explicit "I'm back" action.
///
/// Only clears the derived away intent for today and later: periods created
/// before this action stop covering dates from today on. Past meal records
/// are not rewritten and no period row is deleted.
pub fn return_from_away(conn: &Connection, clock: &dyn Clock, resident_id: &str) -> AppResult<()> {
    residents::record_return(conn, resident_id, clock.today())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::db::init_db;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        conn
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn mark_away_rejects_inverted_range() {
        let conn = test_conn();
        let err = mark_away(&conn, "r1", d("2024-06-03"), d("2024-06-01")).unwrap_err();
        assert!(matches!(err, AppError::InvalidRange { .. }));
        // nothing persisted
        assert!(!is_away(&conn, "r1", d("2024-06-02")).unwrap());
    }

    #[test]
    fn mark_away_forces_every_day_in_range() {
        let conn = test_conn();
        // pre-existing intent gets overridden
        meal_days::upsert(
            &conn,
            "r1",
            d("2024-06-02"),
            MealFlags {
                breakfast: true,
                early_breakfast: true,
                supper: true,
                away: false,
            },
        )
        .unwrap();

        mark_away(&conn, "r1", d("2024-06-01"), d("2024-06-03")).unwrap();

        let mut day = d("2024-06-01");
        while day <= d("2024-06-03") {
            assert!(is_away(&conn, "r1", day).unwrap(), "{day} should be away");
            let md = meal_days::get(&conn, "r1", day).unwrap().unwrap();
            assert!(md.away);
            assert!(!md.breakfast && !md.early_breakfast && !md.supper);
            day = day.succ_opt().unwrap();
        }
        assert!(!is_away(&conn, "r1", d("2024-05-31")).unwrap());
        assert!(!is_away(&conn, "r1", d("2024-06-04")).unwrap());
    }

    #[test]
    fn rerunning_the_same_range_is_a_noop() {
        let conn = test_conn();
        mark_away(&conn, "r1", d("2024-06-01"), d("2024-06-02")).unwrap();
        // simulates resuming after a partial failure
        mark_away(&conn, "r1", d("2024-06-01"), d("2024-06-02")).unwrap();

        let rows = meal_days::list(
            &conn,
            "r1",
            d("2024-06-01"),
            d("2024-06-02"),
            meal_days::DateOrder::Ascending,
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|m| m.away));
    }

    #[test]
    fn overlapping_periods_or_together() {
        let conn = test_conn();
        mark_away(&conn, "r1", d("2024-06-01"), d("2024-06-03")).unwrap();
        mark_away(&conn, "r1", d("2024-06-03"), d("2024-06-05")).unwrap();

        assert!(is_away(&conn, "r1", d("2024-06-03")).unwrap());
        assert!(is_away(&conn, "r1", d("2024-06-05")).unwrap());
    }

    #[test]
    fn return_clears_future_coverage_only() {
        let conn = test_conn();
        mark_away(&conn, "r1", d("2024-06-01"), d("2024-06-10")).unwrap();

        let clock = FixedClock::parse("2024-06-05 10:00").unwrap();
        return_from_away(&conn, &clock, "r1").unwrap();

        // past days stay away, today and later are released
        assert!(is_away(&conn, "r1", d("2024-06-04")).unwrap());
        assert!(!is_away(&conn, "r1", d("2024-06-05")).unwrap());
        assert!(!is_away(&conn, "r1", d("2024-06-08")).unwrap());

        // past meal rows are not rewritten
        let md = meal_days::get(&conn, "r1", d("2024-06-03")).unwrap().unwrap();
        assert!(md.away);
    }

    #[test]
    fn get_day_lazily_creates_a_default_record() {
        let conn = test_conn();
        let md = get_day(&conn, "r1", d("2024-06-01")).unwrap();
        assert!(!md.breakfast && !md.early_breakfast && !md.supper && !md.away);

        // a second read returns the same row, not a duplicate
        let again = get_day(&conn, "r1", d("2024-06-01")).unwrap();
        assert_eq!(again.id, md.id);
    }

    #[test]
    fn get_day_reconciles_a_stale_row_inside_a_period() {
        let conn = test_conn();
        mark_away(&conn, "r1", d("2024-06-01"), d("2024-06-03")).unwrap();

        // simulate a row that missed the bulk pass
        conn.execute(
            "UPDATE meal_days SET away = 0, breakfast = 1 WHERE resident_id = 'r1' AND date = '2024-06-02'",
            [],
        )
        .unwrap();

        let md = get_day(&conn, "r1", d("2024-06-02")).unwrap();
        assert!(md.away);
        assert!(!md.breakfast);
    }

    #[test]
    fn get_day_releases_a_forced_row_after_a_return() {
        let conn = test_conn();
        mark_away(&conn, "r1", d("2024-06-01"), d("2024-06-10")).unwrap();

        let clock = FixedClock::parse("2024-06-05 10:00").unwrap();
        return_from_away(&conn, &clock, "r1").unwrap();

        let md = get_day(&conn, "r1", d("2024-06-07")).unwrap();
        assert!(!md.away);
        assert!(!md.breakfast && !md.supper);

        // before the return date the forced state stands
        let past = get_day(&conn, "r1", d("2024-06-03")).unwrap();
        assert!(past.away);
    }

    #[test]
    fn periods_created_after_a_return_count_in_full() {
        let conn = test_conn();
        mark_away(&conn, "r1", d("2024-06-01"), d("2024-06-10")).unwrap();

        let clock = FixedClock::parse("2024-06-05 10:00").unwrap();
        return_from_away(&conn, &clock, "r1").unwrap();
        assert!(!is_away(&conn, "r1", d("2024-06-08")).unwrap());

        mark_away(&conn, "r1", d("2024-06-08"), d("2024-06-09")).unwrap();
        assert!(is_away(&conn, "r1", d("2024-06-08")).unwrap());
        assert!(is_away(&conn, "r1", d("2024-06-09")).unwrap());
        assert!(!is_away(&conn, "r1", d("2024-06-10")).unwrap());
    }
}
