//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staffledger_core::types::{Date, DbId, Timestamp};

/// Status given to tasks created without one.
pub const DEFAULT_TASK_STATUS: &str = "not started";

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub phase_id: DbId,
    pub title: String,
    pub description: String,
    pub start_date: Date,
    pub end_date: Date,
    pub due_date: Date,
    pub status: String,
    pub budget: i32,
    pub actual_spend: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a task inside a phase.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub phase_id: DbId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: Date,
    pub end_date: Date,
    pub due_date: Date,
    /// Defaults to `not started`.
    pub status: Option<String>,
    pub budget: i32,
    /// Defaults to 0.
    pub actual_spend: Option<f64>,
}
