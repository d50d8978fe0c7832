//! Read-only aggregation over meal records for kitchen and warden staff.
//!
//! Reports are informational: they never gate a write decision, so a
//! slightly stale snapshot is acceptable.

use crate::db::{meal_days, residents};
use crate::errors::AppResult;
use crate::models::MealFlag;
use chrono::{Duration, NaiveDate};
use rusqlite::Connection;
use serde::Serialize;

/// Counts and the unconfirmed set for one date.
#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub breakfast_count: i64,
    pub early_breakfast_count: i64,
    pub supper_count: i64,
    pub away_count: i64,
    /// Registered residents with no record at all for the date. A record
    /// with every flag false means "confirmed absent" and is not listed.
    pub unconfirmed: Vec<String>,
}

/// One day of the trailing weekly series.
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub breakfast_count: i64,
    pub supper_count: i64,
}

pub fn count_by_flag(conn: &Connection, date: NaiveDate, flag: MealFlag) -> AppResult<i64> {
    meal_days::count_by_flag(conn, date, flag)
}

pub fn daily_report(conn: &Connection, date: NaiveDate) -> AppResult<DailyReport> {
    Ok(DailyReport {
        date,
        breakfast_count: meal_days::count_by_flag(conn, date, MealFlag::Breakfast)?,
        early_breakfast_count: meal_days::count_by_flag(conn, date, MealFlag::EarlyBreakfast)?,
        supper_count: meal_days::count_by_flag(conn, date, MealFlag::Supper)?,
        away_count: meal_days::count_by_flag(conn, date, MealFlag::Away)?,
        unconfirmed: residents::unconfirmed_for_date(conn, date)?,
    })
}

/// Fixed 7-day trailing window ending at `end_date`, oldest day first.
/// Days with no rows at all report zero.
pub fn weekly_trend(conn: &Connection, end_date: NaiveDate) -> AppResult<Vec<TrendPoint>> {
    let start = end_date - Duration::days(6);
    let mut series = Vec::with_capacity(7);

    let mut day = start;
    while day <= end_date {
        series.push(TrendPoint {
            date: day,
            breakfast_count: meal_days::count_by_flag(conn, day, MealFlag::Breakfast)?,
            supper_count: meal_days::count_by_flag(conn, day, MealFlag::Supper)?,
        });
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    Ok(series)
}

pub fn unconfirmed(conn: &Connection, date: NaiveDate) -> AppResult<Vec<String>> {
    residents::unconfirmed_for_date(conn, date)
}
