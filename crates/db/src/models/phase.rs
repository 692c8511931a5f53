//! Project phase model and merge DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staffledger_core::types::{Date, DbId, Timestamp};

/// A row from the `project_phases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectPhase {
    pub id: DbId,
    pub project_id: DbId,
    pub phase_name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One item of a phase list merge. `phase_id` absent means insert.
#[derive(Debug, Clone, Deserialize)]
pub struct PhaseInput {
    pub phase_id: Option<DbId>,
    pub phase_name: String,
    pub start_date: Date,
    pub end_date: Date,
}
