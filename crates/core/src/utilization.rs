//! Weekly utilization grid: planned (staffed) hours versus logged hours.
//!
//! Each staffed user's forecast is spread evenly across the Monday-aligned
//! weeks of the project span. The grid covers every week of the requested
//! window; weeks outside the project span have zero staffed hours, and a
//! week with zero staffed hours has no utilization figure.

use std::collections::HashMap;

use serde::Serialize;

use crate::dates::{monday_of, span_weeks, week_end, week_starts};
use crate::error::CoreError;
use crate::money::{round2, round4};
use crate::types::{Date, DbId};

/// Message returned when the requested window cannot be parsed.
pub const INVALID_WINDOW: &str = "Invalid 'start' or 'end' date. Use YYYY-MM-DD.";

/// Longest window the grid will be built for, roughly ten years.
pub const MAX_WINDOW_WEEKS: i64 = 520;

/// Reject windows spanning more than [`MAX_WINDOW_WEEKS`] weeks. A reversed
/// window is allowed and yields an empty grid.
pub fn validate_window(start: Date, end: Date) -> Result<(), CoreError> {
    if end >= start && span_weeks(start, end) > MAX_WINDOW_WEEKS {
        return Err(CoreError::Validation(format!(
            "Window from {start} to {end} exceeds {MAX_WINDOW_WEEKS} weeks"
        )));
    }
    Ok(())
}

/// The weeks a project is planned to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectSpan {
    pub first_week: Date,
    pub last_week: Date,
    pub num_weeks: i64,
}

impl ProjectSpan {
    pub fn new(start: Date, end: Date) -> Self {
        Self {
            first_week: monday_of(start),
            last_week: monday_of(end),
            num_weeks: span_weeks(start, end),
        }
    }

    /// Whether `week_start` (a Monday) falls inside the span.
    pub fn contains(&self, week_start: Date) -> bool {
        self.first_week <= week_start && week_start <= self.last_week
    }
}

/// The date range whose time entries feed a window: from the Monday of
/// `start` through the Sunday closing the week of `end`.
pub fn actuals_range(start: Date, end: Date) -> (Date, Date) {
    (monday_of(start), week_end(monday_of(end)))
}

/// One staffing row joined with its user.
#[derive(Debug, Clone)]
pub struct StaffedUser {
    pub user_id: DbId,
    pub user_name: String,
    pub planned_hours: f64,
}

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilizationRow {
    pub week_start: Date,
    pub user_id: DbId,
    pub user_name: String,
    pub project_id: DbId,
    pub staffed_hours: f64,
    pub actual_hours: f64,
    /// `None` when nothing was staffed that week.
    pub utilization_pct: Option<f64>,
}

/// Build the grid for a window.
///
/// `actuals` maps `(user_id, week_start)` to hours logged that week. Users
/// staffed more than once on the project have their forecasts summed.
/// Rows are ordered by case-insensitive user name, then week.
pub fn build_grid(
    project_id: DbId,
    span: &ProjectSpan,
    window_start: Date,
    window_end: Date,
    staffed: &[StaffedUser],
    actuals: &HashMap<(DbId, Date), f64>,
) -> Vec<UtilizationRow> {
    let mut users: Vec<StaffedUser> = Vec::new();
    let mut index: HashMap<DbId, usize> = HashMap::new();
    for s in staffed {
        match index.get(&s.user_id) {
            Some(&i) => users[i].planned_hours += s.planned_hours,
            None => {
                index.insert(s.user_id, users.len());
                users.push(s.clone());
            }
        }
    }

    let weeks = week_starts(window_start, window_end);
    let mut rows = Vec::with_capacity(users.len() * weeks.len());

    for user in &users {
        let per_week = user.planned_hours / span.num_weeks as f64;
        for &week in &weeks {
            let staffed_hours = if span.contains(week) { per_week } else { 0.0 };
            let actual_hours = actuals.get(&(user.user_id, week)).copied().unwrap_or(0.0);
            let utilization_pct = (staffed_hours > 0.0).then(|| round4(actual_hours / staffed_hours));

            rows.push(UtilizationRow {
                week_start: week,
                user_id: user.user_id,
                user_name: user.user_name.clone(),
                project_id,
                staffed_hours: round2(staffed_hours),
                actual_hours: round2(actual_hours),
                utilization_pct,
            });
        }
    }

    rows.sort_by(|a, b| {
        a.user_name
            .to_lowercase()
            .cmp(&b.user_name.to_lowercase())
            .then(a.week_start.cmp(&b.week_start))
            .then(a.user_id.cmp(&b.user_id))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn staffed(user_id: DbId, name: &str, planned: f64) -> StaffedUser {
        StaffedUser {
            user_id,
            user_name: name.to_string(),
            planned_hours: planned,
        }
    }

    /// Four-week project: Mon 2025-03-03 .. Sun 2025-03-30.
    fn span() -> ProjectSpan {
        ProjectSpan::new(d(2025, 3, 3), d(2025, 3, 30))
    }

    #[test]
    fn span_is_monday_aligned() {
        let span = ProjectSpan::new(d(2025, 3, 5), d(2025, 3, 26));
        assert_eq!(span.first_week, d(2025, 3, 3));
        assert_eq!(span.last_week, d(2025, 3, 24));
        assert_eq!(span.num_weeks, 4);
        assert!(span.contains(d(2025, 3, 24)));
        assert!(!span.contains(d(2025, 3, 31)));
    }

    #[test]
    fn window_length_is_bounded() {
        assert!(validate_window(d(2025, 1, 1), d(2034, 12, 31)).is_ok());
        assert!(validate_window(d(2025, 3, 30), d(2025, 3, 3)).is_ok());
        let err = validate_window(d(1, 1, 1), d(9999, 12, 31)).unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("520 weeks")));
    }

    #[test]
    fn actuals_range_spans_whole_weeks() {
        assert_eq!(
            actuals_range(d(2025, 3, 5), d(2025, 3, 18)),
            (d(2025, 3, 3), d(2025, 3, 23))
        );
    }

    #[test]
    fn spreads_plan_evenly_and_divides_actuals() {
        let mut actuals = HashMap::new();
        actuals.insert((7, d(2025, 3, 10)), 5.0);

        let rows = build_grid(
            1,
            &span(),
            d(2025, 3, 3),
            d(2025, 3, 16),
            &[staffed(7, "Ana", 40.0)],
            &actuals,
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].week_start, d(2025, 3, 3));
        assert_eq!(rows[0].staffed_hours, 10.0);
        assert_eq!(rows[0].actual_hours, 0.0);
        assert_eq!(rows[0].utilization_pct, Some(0.0));
        assert_eq!(rows[1].actual_hours, 5.0);
        assert_eq!(rows[1].utilization_pct, Some(0.5));
        assert!(rows.iter().all(|r| r.project_id == 1));
    }

    #[test]
    fn weeks_outside_project_have_no_utilization() {
        let mut actuals = HashMap::new();
        actuals.insert((7, d(2025, 3, 31)), 3.0);

        let rows = build_grid(
            1,
            &span(),
            d(2025, 3, 24),
            d(2025, 4, 6),
            &[staffed(7, "Ana", 40.0)],
            &actuals,
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].staffed_hours, 10.0);
        assert_eq!(rows[1].week_start, d(2025, 3, 31));
        assert_eq!(rows[1].staffed_hours, 0.0);
        assert_eq!(rows[1].actual_hours, 3.0);
        assert_eq!(rows[1].utilization_pct, None);
    }

    #[test]
    fn zero_forecast_yields_null_utilization() {
        let rows = build_grid(
            1,
            &span(),
            d(2025, 3, 3),
            d(2025, 3, 9),
            &[staffed(7, "Ana", 0.0)],
            &HashMap::new(),
        );
        assert_eq!(rows[0].staffed_hours, 0.0);
        assert_eq!(rows[0].utilization_pct, None);
    }

    #[test]
    fn no_staffing_yields_empty_grid() {
        let rows = build_grid(1, &span(), d(2025, 3, 3), d(2025, 3, 30), &[], &HashMap::new());
        assert!(rows.is_empty());
    }

    #[test]
    fn reversed_window_yields_empty_grid() {
        let rows = build_grid(
            1,
            &span(),
            d(2025, 3, 30),
            d(2025, 3, 3),
            &[staffed(7, "Ana", 40.0)],
            &HashMap::new(),
        );
        assert!(rows.is_empty());
    }

    #[test]
    fn duplicate_staffing_rows_are_summed() {
        let rows = build_grid(
            1,
            &span(),
            d(2025, 3, 3),
            d(2025, 3, 9),
            &[staffed(7, "Ana", 20.0), staffed(7, "Ana", 20.0)],
            &HashMap::new(),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].staffed_hours, 10.0);
    }

    #[test]
    fn rounds_staffed_and_ratio() {
        // 10 hours over 3 weeks = 3.333.. per week.
        let span = ProjectSpan::new(d(2025, 3, 3), d(2025, 3, 23));
        let mut actuals = HashMap::new();
        actuals.insert((7, d(2025, 3, 3)), 2.0);

        let rows = build_grid(
            1,
            &span,
            d(2025, 3, 3),
            d(2025, 3, 3),
            &[staffed(7, "Ana", 10.0)],
            &actuals,
        );
        assert_eq!(rows[0].staffed_hours, 3.33);
        assert_eq!(rows[0].utilization_pct, Some(0.6));
    }

    #[test]
    fn sorted_by_name_case_insensitively_then_week() {
        let rows = build_grid(
            1,
            &span(),
            d(2025, 3, 3),
            d(2025, 3, 16),
            &[staffed(1, "zoe", 8.0), staffed(2, "Bruno", 8.0), staffed(3, "ana", 8.0)],
            &HashMap::new(),
        );
        let order: Vec<(&str, Date)> = rows
            .iter()
            .map(|r| (r.user_name.as_str(), r.week_start))
            .collect();
        assert_eq!(
            order,
            vec![
                ("ana", d(2025, 3, 3)),
                ("ana", d(2025, 3, 10)),
                ("Bruno", d(2025, 3, 3)),
                ("Bruno", d(2025, 3, 10)),
                ("zoe", d(2025, 3, 3)),
                ("zoe", d(2025, 3, 10)),
            ]
        );
    }
}
