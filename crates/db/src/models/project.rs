//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staffledger_core::types::{Date, DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub client_name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub started: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub client_name: String,
    pub start_date: Date,
    pub end_date: Date,
    #[serde(default)]
    pub started: bool,
}

/// DTO for updating an existing project. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub client_name: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub started: Option<bool>,
}

/// Row counts removed by [`crate::repositories::ProjectRepo::delete_cascade`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeDeleteSummary {
    pub time_entries: u64,
    pub task_assignments: u64,
    pub tasks: u64,
    pub phases: u64,
    pub staffing: u64,
    pub invoices: u64,
}
