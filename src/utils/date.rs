use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a CLI date argument, turning a bad format into a typed error.
pub fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// All days of `[start, end]` inclusive, ascending.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = start;
    while d <= end {
        out.push(d);
        d = match d.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    out
}
