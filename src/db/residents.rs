//! Resident registry.
//!
//! Meal and away records treat resident ids as opaque strings, so none of
//! those paths require registration. The registry exists for reporting: the
//! "unconfirmed" set is registered residents minus residents with any meal
//! record for the date.

use crate::errors::{AppError, AppResult};
use crate::models::Resident;
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, Result, Row, params};

fn row_to_resident(row: &Row) -> Result<Resident> {
    let returned_on: Option<String> = row.get("returned_on")?;
    let returned_on = match returned_on {
        Some(s) => Some(NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(s)),
            )
        })?),
        None => None,
    };

    Ok(Resident {
        id: row.get("id")?,
        name: row.get("name")?,
        room: row.get("room")?,
        returned_on,
        created_at: row.get("created_at")?,
    })
}

pub fn add(conn: &Connection, id: &str, name: &str, room: &str) -> AppResult<Resident> {
    let now = Utc::now().to_rfc3339();
    let res = conn.execute(
        "INSERT INTO residents (id, name, room, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![id, name, room, now],
    );

    match res {
        Ok(_) => Ok(Resident {
            id: id.to_string(),
            name: name.to_string(),
            room: room.to_string(),
            returned_on: None,
            created_at: now,
        }),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(AppError::DuplicateResident(id.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn get(conn: &Connection, id: &str) -> AppResult<Option<Resident>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, room, returned_on, created_at FROM residents WHERE id = ?1",
    )?;
    match stmt.query_row([id], row_to_resident) {
        Ok(r) => Ok(Some(r)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list(conn: &Connection) -> AppResult<Vec<Resident>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, room, returned_on, created_at FROM residents ORDER BY room ASC, id ASC",
    )?;
    let rows = stmt.query_map([], row_to_resident)?;

    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Record an explicit "I'm back" action as of `on`. The resident row is
/// created lazily if it was never registered, since away periods accept
/// opaque ids too.
pub fn record_return(conn: &Connection, id: &str, on: NaiveDate) -> AppResult<()> {
    let now = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT OR IGNORE INTO residents (id, created_at) VALUES (?1, ?2)",
        params![id, now],
    )?;
    conn.execute(
        "UPDATE residents SET returned_on = ?1, returned_at = ?2 WHERE id = ?3",
        params![on.to_string(), now, id],
    )?;
    Ok(())
}

/// Registered residents with no meal record at all for the date.
///
/// A resident whose record has every flag false is "confirmed absent" and is
/// deliberately not in this set.
pub fn unconfirmed_for_date(conn: &Connection, date: NaiveDate) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT r.id
         FROM residents r
         LEFT JOIN meal_days m ON m.resident_id = r.id AND m.date = ?1
         WHERE m.id IS NULL
         ORDER BY r.id ASC",
    )?;
    let rows = stmt.query_map([date.to_string()], |row| row.get::<_, String>(0))?;

    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

pub fn count(conn: &Connection) -> AppResult<i64> {
    let mut stmt = conn.prepare_cached("SELECT COUNT(*) FROM residents")?;
    let n: i64 = stmt.query_row([], |r| r.get(0))?;
    Ok(n)
}
