//! ISO date parsing and Monday-aligned week arithmetic.

use chrono::{DateTime, Datelike, Days, NaiveDateTime};

use crate::error::CoreError;
use crate::types::Date;

/// Message returned when a report period cannot be parsed.
pub const INVALID_DATE_FORMAT: &str = "Invalid date format. Use YYYY-MM-DD.";

/// Parse an ISO-8601 date.
///
/// Accepts a bare `YYYY-MM-DD` as well as a full timestamp (`T` or space
/// separated, with or without offset), in which case the date part is kept.
pub fn parse_iso_date(value: &str) -> Option<Date> {
    let value = value.trim();
    if let Ok(date) = Date::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|ts| ts.date())
}

/// Parse an inclusive `[start, end]` period, failing with `message` if either
/// side is not a date.
pub fn parse_period(start: &str, end: &str, message: &str) -> Result<(Date, Date), CoreError> {
    match (parse_iso_date(start), parse_iso_date(end)) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(CoreError::Validation(message.to_string())),
    }
}

/// The Monday on or before `date`.
pub fn monday_of(date: Date) -> Date {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// The Sunday closing the week that starts on `week_start`.
pub fn week_end(week_start: Date) -> Date {
    week_start + Days::new(6)
}

/// Every Monday from the week of `start` through the week of `end`, inclusive.
///
/// Empty when `end` falls in a week before `start`.
pub fn week_starts(start: Date, end: Date) -> Vec<Date> {
    let last = monday_of(end);
    let mut current = monday_of(start);
    let mut weeks = Vec::new();
    while current <= last {
        weeks.push(current);
        current = current + Days::new(7);
    }
    weeks
}

/// Number of Monday-aligned weeks touched by `[start, end]`, never less than one.
pub fn span_weeks(start: Date, end: Date) -> i64 {
    let days = (monday_of(end) - monday_of(start)).num_days();
    (days.div_euclid(7) + 1).max(1)
}
