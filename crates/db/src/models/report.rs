//! Raw rows returned by the aggregate report queries.
//!
//! These are converted into the `staffledger_core` report types, which own
//! the rounding and response shape.

use sqlx::FromRow;
use staffledger_core::invoice::{ContributorHours, TaskBilling};
use staffledger_core::types::{Date, DbId};
use staffledger_core::utilization::StaffedUser;

/// Hours a user logged on a project in one Monday-aligned week.
#[derive(Debug, Clone, FromRow)]
pub struct WeeklyHoursRow {
    pub user_id: DbId,
    pub week_start: Date,
    pub actual_hours: f64,
}

/// A staffing row joined with the user's name.
#[derive(Debug, Clone, FromRow)]
pub struct StaffedUserRow {
    pub user_id: DbId,
    pub user_name: String,
    pub planned_hours: f64,
}

impl From<StaffedUserRow> for StaffedUser {
    fn from(row: StaffedUserRow) -> Self {
        StaffedUser {
            user_id: row.user_id,
            user_name: row.user_name,
            planned_hours: row.planned_hours,
        }
    }
}

/// Billable hours and amount per task for an invoice period.
#[derive(Debug, Clone, FromRow)]
pub struct TaskBillingRow {
    pub task_id: DbId,
    pub task_title: String,
    pub phase_name: String,
    pub hours: f64,
    pub amount: f64,
}

impl From<TaskBillingRow> for TaskBilling {
    fn from(row: TaskBillingRow) -> Self {
        TaskBilling {
            task_id: row.task_id,
            task_title: row.task_title,
            phase_name: row.phase_name,
            hours: row.hours,
            amount: row.amount,
        }
    }
}

/// Billable hours per (task, contributor) for an invoice period.
#[derive(Debug, Clone, FromRow)]
pub struct ContributorHoursRow {
    pub task_title: String,
    pub phase_name: String,
    pub user_name: String,
    pub hours: f64,
    pub rate: f64,
}

impl From<ContributorHoursRow> for ContributorHours {
    fn from(row: ContributorHoursRow) -> Self {
        ContributorHours {
            task_title: row.task_title,
            phase_name: row.phase_name,
            user_name: row.user_name,
            hours: row.hours,
            rate: row.rate,
        }
    }
}
