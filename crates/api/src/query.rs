//! Query parameter types shared by the handler modules.
//!
//! Date parameters are taken as raw strings so a bad value produces the
//! report's own 400 message rather than the extractor's.

use serde::Deserialize;
use staffledger_core::types::DbId;

/// `?role=` on the user list.
#[derive(Debug, Deserialize)]
pub struct RoleFilter {
    pub role: Option<String>,
}

/// `?start_date=&end_date=` (inclusive).
#[derive(Debug, Deserialize)]
pub struct DateRangeParams {
    pub start_date: String,
    pub end_date: String,
}

/// `?start=&end=` on the utilization grid.
#[derive(Debug, Deserialize)]
pub struct UtilizationParams {
    pub start: String,
    pub end: String,
}

/// `?period_start=&period_end=` on the invoice preview.
#[derive(Debug, Deserialize)]
pub struct PeriodParams {
    pub period_start: String,
    pub period_end: String,
}

/// `?phase_id=` or `?user_id=` on the task list.
#[derive(Debug, Deserialize)]
pub struct TaskListParams {
    pub phase_id: Option<DbId>,
    pub user_id: Option<DbId>,
}

/// `?task_id=` or `?user_id=` on the assignment list.
#[derive(Debug, Deserialize)]
pub struct AssignmentListParams {
    pub task_id: Option<DbId>,
    pub user_id: Option<DbId>,
}

/// `?task_id=&user_id=&hours=` on the dynamic staffing adjustment.
#[derive(Debug, Deserialize)]
pub struct AdjustmentParams {
    pub task_id: DbId,
    pub user_id: DbId,
    pub hours: f64,
}
