//! Kitchen CSV sheet: one row per meal record for a date, joined with the
//! resident registry for display names and rooms.

use crate::db::{meal_days, residents};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use csv::Writer;
use rusqlite::Connection;

fn yes_no(v: bool) -> &'static str {
    if v { "Yes" } else { "No" }
}

/// Write the meal list for `date` to `path`. Returns the row count.
pub fn write_kitchen_csv(conn: &Connection, date: NaiveDate, path: &str) -> AppResult<usize> {
    let meals = meal_days::list_for_date(conn, date)?;

    let mut wtr =
        Writer::from_path(path).map_err(|e| AppError::Export(format!("{}: {e}", path)))?;

    wtr.write_record([
        "Resident",
        "Name",
        "Room",
        "Breakfast",
        "Early",
        "Supper",
        "Away",
    ])
    .map_err(|e| AppError::Export(e.to_string()))?;

    for meal in &meals {
        let registered = residents::get(conn, &meal.resident_id)?;
        let (name, room) = registered
            .map(|r| (r.name, r.room))
            .unwrap_or_default();

        wtr.write_record([
            meal.resident_id.as_str(),
            name.as_str(),
            room.as_str(),
            yes_no(meal.breakfast),
            yes_no(meal.early_breakfast),
            yes_no(meal.supper),
            yes_no(meal.away),
        ])
        .map_err(|e| AppError::Export(e.to_string()))?;
    }

    wtr.flush()?;
    Ok(meals.len())
}
