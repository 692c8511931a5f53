//! Time entry model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staffledger_core::types::{Date, DbId, Timestamp};

/// A row from the `time_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeEntry {
    pub id: DbId,
    pub task_id: DbId,
    pub user_id: DbId,
    pub work_date: Date,
    pub hours: f64,
    pub is_billable: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for logging work.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimeEntry {
    pub task_id: DbId,
    pub user_id: DbId,
    pub work_date: Date,
    pub hours: f64,
    #[serde(default = "billable_by_default")]
    pub is_billable: bool,
}

fn billable_by_default() -> bool {
    true
}

/// Optional filters for listing entries; absent fields do not filter.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TimeEntryFilter {
    pub task_id: Option<DbId>,
    pub user_id: Option<DbId>,
}
