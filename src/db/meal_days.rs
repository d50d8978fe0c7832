//! Keyed storage for per-(resident, date) meal records.
//!
//! All writes go through [`upsert`], which is idempotent and race-safe: the
//! UNIQUE(resident_id, date) constraint plus `ON CONFLICT DO UPDATE` means
//! concurrent writers to the same key serialize at the storage layer instead
//! of producing duplicate rows or constraint errors.

use crate::errors::{AppError, AppResult};
use crate::models::{MealDay, MealFlag, MealFlags};
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, Result, Row, params};
use std::thread;
use std::time::Duration;

/// Bounded retries for transient SQLITE_BUSY/SQLITE_LOCKED contention.
const MAX_WRITE_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF_MS: u64 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    Ascending,
    Descending,
}

pub fn row_to_meal_day(row: &Row) -> Result<MealDay> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(MealDay {
        id: row.get("id")?,
        resident_id: row.get("resident_id")?,
        date,
        breakfast: row.get::<_, i64>("breakfast")? == 1,
        early_breakfast: row.get::<_, i64>("early_breakfast")? == 1,
        supper: row.get::<_, i64>("supper")? == 1,
        away: row.get::<_, i64>("away")? == 1,
        updated_at: row.get("updated_at")?,
    })
}

fn is_transient(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::DatabaseBusy
                || e.code == rusqlite::ErrorCode::DatabaseLocked
    )
}

/// Fetch a single record, if present.
pub fn get(conn: &Connection, resident_id: &str, date: NaiveDate) -> AppResult<Option<MealDay>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, resident_id, date, breakfast, early_breakfast, supper, away, updated_at
         FROM meal_days
         WHERE resident_id = ?1 AND date = ?2",
    )?;

    match stmt.query_row(params![resident_id, date.to_string()], row_to_meal_day) {
        Ok(md) => Ok(Some(md)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Return the record for the key, lazily creating an all-false default.
///
/// Creation is compare-and-insert: `INSERT OR IGNORE` keyed on the unique
/// constraint, then a read-back. A duplicate-key race resolves to "return
/// the existing row", never an error.
pub fn get_or_create(conn: &Connection, resident_id: &str, date: NaiveDate) -> AppResult<MealDay> {
    let now = Utc::now().to_rfc3339();
    let mut stmt = conn.prepare_cached(
        "INSERT OR IGNORE INTO meal_days
             (resident_id, date, breakfast, early_breakfast, supper, away, updated_at)
         VALUES (?1, ?2, 0, 0, 0, 0, ?3)",
    )?;
    stmt.execute(params![resident_id, date.to_string(), now])?;

    get(conn, resident_id, date)?.ok_or(AppError::Unavailable)
}

/// Idempotent full replace of the mutable flags for one key.
///
/// Repeated calls with identical flags produce no observable change beyond
/// `updated_at`. Invariants (away clears meals, early implies breakfast) are
/// applied before the statement runs, so a violated state never reaches
/// storage.
pub fn upsert(
    conn: &Connection,
    resident_id: &str,
    date: NaiveDate,
    flags: MealFlags,
) -> AppResult<MealDay> {
    let flags = flags.normalized();
    let now = Utc::now().to_rfc3339();

    let mut attempts = 0;
    loop {
        let res = conn
            .prepare_cached(
                "INSERT INTO meal_days
                     (resident_id, date, breakfast, early_breakfast, supper, away, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(resident_id, date) DO UPDATE SET
                     breakfast       = excluded.breakfast,
                     early_breakfast = excluded.early_breakfast,
                     supper          = excluded.supper,
                     away            = excluded.away,
                     updated_at      = excluded.updated_at",
            )
            .and_then(|mut stmt| {
                stmt.execute(params![
                    resident_id,
                    date.to_string(),
                    flags.breakfast as i64,
                    flags.early_breakfast as i64,
                    flags.supper as i64,
                    flags.away as i64,
                    now,
                ])
            });

        match res {
            Ok(_) => break,
            Err(e) if is_transient(&e) => {
                attempts += 1;
                if attempts >= MAX_WRITE_ATTEMPTS {
                    return Err(AppError::Unavailable);
                }
                thread::sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempts as u64));
            }
            Err(e) => return Err(e.into()),
        }
    }

    get(conn, resident_id, date)?.ok_or(AppError::Unavailable)
}

/// Range scan for one resident, inclusive on both ends.
pub fn list(
    conn: &Connection,
    resident_id: &str,
    from: NaiveDate,
    to: NaiveDate,
    order: DateOrder,
) -> AppResult<Vec<MealDay>> {
    let sql = match order {
        DateOrder::Ascending => {
            "SELECT id, resident_id, date, breakfast, early_breakfast, supper, away, updated_at
             FROM meal_days
             WHERE resident_id = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date ASC"
        }
        DateOrder::Descending => {
            "SELECT id, resident_id, date, breakfast, early_breakfast, supper, away, updated_at
             FROM meal_days
             WHERE resident_id = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date DESC"
        }
    };

    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map(
        params![resident_id, from.to_string(), to.to_string()],
        row_to_meal_day,
    )?;

    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// All records for one date, ordered by resident id (kitchen list / export).
pub fn list_for_date(conn: &Connection, date: NaiveDate) -> AppResult<Vec<MealDay>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, resident_id, date, breakfast, early_breakfast, supper, away, updated_at
         FROM meal_days
         WHERE date = ?1
         ORDER BY resident_id ASC",
    )?;
    let rows = stmt.query_map([date.to_string()], row_to_meal_day)?;

    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Count of records for `date` where the given flag is set.
///
/// The column name comes from the closed [`MealFlag`] set, never from user
/// input.
pub fn count_by_flag(conn: &Connection, date: NaiveDate, flag: MealFlag) -> AppResult<i64> {
    let sql = format!(
        "SELECT COUNT(*) FROM meal_days WHERE date = ?1 AND {} = 1",
        flag.column()
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let n: i64 = stmt.query_row([date.to_string()], |r| r.get(0))?;
    Ok(n)
}
