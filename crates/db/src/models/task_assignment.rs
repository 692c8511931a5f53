//! Task assignment (contributor on a task, with their own rate).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staffledger_core::types::{DbId, Timestamp};

/// A row from the `task_assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskAssignment {
    pub id: DbId,
    pub task_id: DbId,
    pub user_id: DbId,
    pub hourly_rate: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One item of an assignment list merge. The task always comes from the URL.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentInput {
    #[serde(alias = "taskassign_id")]
    pub assignment_id: Option<DbId>,
    pub user_id: DbId,
    pub hourly_rate: i32,
}
