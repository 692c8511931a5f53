//! Project staffing (user-to-project assignment with rate and forecast).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staffledger_core::types::{DbId, Timestamp};

use crate::models::user::User;

/// A row from the `project_staffing` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectStaffing {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub role_name: String,
    pub hourly_rate: i32,
    pub forecast_hours_initial: f64,
    pub forecast_hours_remaining: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One item of a staffing list merge.
///
/// `staffing_id` absent means insert; present means update that row. The
/// project always comes from the URL.
#[derive(Debug, Clone, Deserialize)]
pub struct StaffingInput {
    pub staffing_id: Option<DbId>,
    pub user_id: DbId,
    pub role_name: String,
    pub hourly_rate: i32,
    pub forecast_hours_initial: f64,
    pub forecast_hours_remaining: f64,
}

/// A staffing row paired with the staffed user.
#[derive(Debug, Clone, Serialize)]
pub struct UserWithStaffing {
    pub user: User,
    pub staffing: ProjectStaffing,
}
