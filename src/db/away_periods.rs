//! Storage for declared absence intervals.
//!
//! Rows are append-only: a period is never edited after creation. The
//! coverage query honours the resident's last recorded return, so "I'm back
//! early" does not require rewriting history.

use crate::errors::{AppError, AppResult};
use crate::models::AwayPeriod;
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, Result, Row, params};

fn row_to_away_period(row: &Row) -> Result<AwayPeriod> {
    let parse = |s: String| {
        NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(s)),
            )
        })
    };

    Ok(AwayPeriod {
        id: row.get("id")?,
        resident_id: row.get("resident_id")?,
        start_date: parse(row.get("start_date")?)?,
        end_date: parse(row.get("end_date")?)?,
        created_at: row.get("created_at")?,
    })
}

/// Persist a new period. Range validation happens in the reconciliation
/// service before this is reached; the table CHECK is a backstop only.
pub fn insert(
    conn: &Connection,
    resident_id: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> AppResult<AwayPeriod> {
    let now = Utc::now().to_rfc3339();
    let mut stmt = conn.prepare_cached(
        "INSERT INTO away_periods (resident_id, start_date, end_date, created_at)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    stmt.execute(params![
        resident_id,
        start_date.to_string(),
        end_date.to_string(),
        now,
    ])?;

    let id = conn.last_insert_rowid();
    Ok(AwayPeriod {
        id,
        resident_id: resident_id.to_string(),
        start_date,
        end_date,
        created_at: now,
    })
}

/// True if any period covers the date (inclusive both ends), unless the
/// period predates the resident's last explicit return and the date is on
/// or after that return. Periods created after the return count in full.
pub fn covers(conn: &Connection, resident_id: &str, date: NaiveDate) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT EXISTS(
             SELECT 1
             FROM away_periods p
             LEFT JOIN residents r ON r.id = p.resident_id
             WHERE p.resident_id = ?1
               AND p.start_date <= ?2
               AND p.end_date >= ?2
               AND (r.returned_at IS NULL
                    OR p.created_at >= r.returned_at
                    OR ?2 < r.returned_on)
         )",
    )?;
    let exists: i64 = stmt.query_row(params![resident_id, date.to_string()], |r| r.get(0))?;
    Ok(exists == 1)
}

/// All periods for one resident, newest first.
pub fn list_for_resident(conn: &Connection, resident_id: &str) -> AppResult<Vec<AwayPeriod>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, resident_id, start_date, end_date, created_at
         FROM away_periods
         WHERE resident_id = ?1
         ORDER BY start_date DESC, id DESC",
    )?;
    let rows = stmt.query_map([resident_id], row_to_away_period)?;

    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
