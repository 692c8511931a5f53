//! Repository for the `project_staffing` table.

use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};
use staffledger_core::merge::{plan_id_merge, ForeignIds, MergeAction};
use staffledger_core::types::DbId;

use crate::models::staffing::{ProjectStaffing, StaffingInput, UserWithStaffing};
use crate::repositories::UserRepo;

const COLUMNS: &str = "id, project_id, user_id, role_name, hourly_rate, \
    forecast_hours_initial, forecast_hours_remaining, created_at, updated_at";

/// Provides staffing list access, merges and forecast bookkeeping.
pub struct StaffingRepo;

impl StaffingRepo {
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectStaffing>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::list_inner(&mut conn, project_id).await
    }

    /// Merge a staffing list into a project.
    ///
    /// Rows without `staffing_id` are inserted; rows whose id belongs to the
    /// project are overwritten; ids from other projects are skipped. Returns
    /// the project's staffing after the merge.
    pub async fn merge(
        pool: &PgPool,
        project_id: DbId,
        items: &[StaffingInput],
    ) -> Result<Vec<ProjectStaffing>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM project_staffing WHERE project_id = $1")
                .bind(project_id)
                .fetch_all(&mut *tx)
                .await?;
        let incoming: Vec<Option<DbId>> = items.iter().map(|i| i.staffing_id).collect();

        for action in plan_id_merge(&existing, &incoming, ForeignIds::Skip) {
            match action {
                MergeAction::Insert { item } => {
                    Self::insert_inner(&mut tx, project_id, &items[item]).await?;
                }
                MergeAction::Update { id, item } => {
                    Self::update_inner(&mut tx, id, &items[item]).await?;
                }
                MergeAction::Skip { id, .. } => {
                    tracing::warn!(project_id, staffing_id = id, "Skipping staffing row of another project");
                }
            }
        }

        let rows = Self::list_inner(&mut tx, project_id).await?;
        tx.commit().await?;
        Ok(rows)
    }

    /// Staffing rows of a project paired with their users.
    ///
    /// Rows pointing at a user that no longer exists are left out.
    pub async fn list_with_users(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<UserWithStaffing>, sqlx::Error> {
        let staffing = Self::list_by_project(pool, project_id).await?;
        let user_ids: Vec<DbId> = staffing.iter().map(|s| s.user_id).collect();
        let users: HashMap<DbId, _> = UserRepo::list_by_ids(pool, &user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(staffing
            .into_iter()
            .filter_map(|s| {
                users.get(&s.user_id).map(|user| UserWithStaffing {
                    user: user.clone(),
                    staffing: s,
                })
            })
            .collect())
    }

    /// Recompute a user's remaining forecast on the project owning `task_id`
    /// from every hour they logged on that project.
    ///
    /// Sets `forecast_hours_remaining = max(forecast_hours_initial - total, 0)`
    /// and returns the total. Returns `None` when the task (or its phase) does
    /// not exist.
    pub async fn sync_remaining_with_logged(
        pool: &PgPool,
        task_id: DbId,
        user_id: DbId,
    ) -> Result<Option<f64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let project_id = sqlx::query_scalar::<_, DbId>(
            "SELECT ph.project_id FROM tasks t
             JOIN project_phases ph ON ph.id = t.phase_id
             WHERE t.id = $1",
        )
        .bind(task_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(project_id) = project_id else {
            return Ok(None);
        };

        let total_hours = sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(te.hours), 0::FLOAT8) FROM time_entries te
             JOIN tasks t ON t.id = te.task_id
             JOIN project_phases ph ON ph.id = t.phase_id
             WHERE ph.project_id = $1 AND te.user_id = $2",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE project_staffing
             SET forecast_hours_remaining = GREATEST(forecast_hours_initial - $3, 0)
             WHERE project_id = $1 AND user_id = $2",
        )
        .bind(project_id)
        .bind(user_id)
        .bind(total_hours)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(total_hours))
    }

    /// Subtract `hours` from a user's remaining forecast on the project owning
    /// `task_id`, flooring at zero. Returns the number of staffing rows touched.
    pub async fn decrement_remaining(
        pool: &PgPool,
        task_id: DbId,
        user_id: DbId,
        hours: f64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE project_staffing ps
             SET forecast_hours_remaining = GREATEST(ps.forecast_hours_remaining - $3, 0)
             FROM tasks t
             JOIN project_phases ph ON ph.id = t.phase_id
             WHERE t.id = $1 AND ps.project_id = ph.project_id AND ps.user_id = $2",
        )
        .bind(task_id)
        .bind(user_id)
        .bind(hours)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn list_inner(
        conn: &mut PgConnection,
        project_id: DbId,
    ) -> Result<Vec<ProjectStaffing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_staffing WHERE project_id = $1 ORDER BY id");
        sqlx::query_as::<_, ProjectStaffing>(&query)
            .bind(project_id)
            .fetch_all(conn)
            .await
    }

    async fn insert_inner(
        conn: &mut PgConnection,
        project_id: DbId,
        input: &StaffingInput,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO project_staffing
                (project_id, user_id, role_name, hourly_rate,
                 forecast_hours_initial, forecast_hours_remaining)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(project_id)
        .bind(input.user_id)
        .bind(&input.role_name)
        .bind(input.hourly_rate)
        .bind(input.forecast_hours_initial)
        .bind(input.forecast_hours_remaining)
        .execute(conn)
        .await?;
        Ok(())
    }

    async fn update_inner(
        conn: &mut PgConnection,
        id: DbId,
        input: &StaffingInput,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE project_staffing SET
                user_id = $2,
                role_name = $3,
                hourly_rate = $4,
                forecast_hours_initial = $5,
                forecast_hours_remaining = $6
             WHERE id = $1",
        )
        .bind(id)
        .bind(input.user_id)
        .bind(&input.role_name)
        .bind(input.hourly_rate)
        .bind(input.forecast_hours_initial)
        .bind(input.forecast_hours_remaining)
        .execute(conn)
        .await?;
        Ok(())
    }
}
