//! Repository for the `project_phases` table.

use sqlx::{PgConnection, PgPool};
use staffledger_core::merge::{plan_id_merge, ForeignIds, MergeAction};
use staffledger_core::types::DbId;

use crate::models::phase::{PhaseInput, ProjectPhase};

const COLUMNS: &str = "id, project_id, phase_name, start_date, end_date, created_at, updated_at";

pub struct PhaseRepo;

impl PhaseRepo {
    /// Phases of a project in chronological order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectPhase>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::list_inner(&mut conn, project_id).await
    }

    /// Merge a phase list into a project and return the project's phases.
    pub async fn merge(
        pool: &PgPool,
        project_id: DbId,
        items: &[PhaseInput],
    ) -> Result<Vec<ProjectPhase>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM project_phases WHERE project_id = $1")
                .bind(project_id)
                .fetch_all(&mut *tx)
                .await?;
        let incoming: Vec<Option<DbId>> = items.iter().map(|i| i.phase_id).collect();

        for action in plan_id_merge(&existing, &incoming, ForeignIds::Skip) {
            match action {
                MergeAction::Insert { item } => {
                    let input = &items[item];
                    sqlx::query(
                        "INSERT INTO project_phases (project_id, phase_name, start_date, end_date)
                         VALUES ($1, $2, $3, $4)",
                    )
                    .bind(project_id)
                    .bind(&input.phase_name)
                    .bind(input.start_date)
                    .bind(input.end_date)
                    .execute(&mut *tx)
                    .await?;
                }
                MergeAction::Update { id, item } => {
                    let input = &items[item];
                    sqlx::query(
                        "UPDATE project_phases
                         SET phase_name = $2, start_date = $3, end_date = $4
                         WHERE id = $1",
                    )
                    .bind(id)
                    .bind(&input.phase_name)
                    .bind(input.start_date)
                    .bind(input.end_date)
                    .execute(&mut *tx)
                    .await?;
                }
                MergeAction::Skip { id, .. } => {
                    tracing::warn!(project_id, phase_id = id, "Skipping phase of another project");
                }
            }
        }

        let phases = Self::list_inner(&mut tx, project_id).await?;
        tx.commit().await?;
        Ok(phases)
    }

    async fn list_inner(
        conn: &mut PgConnection,
        project_id: DbId,
    ) -> Result<Vec<ProjectPhase>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_phases WHERE project_id = $1 ORDER BY start_date, id"
        );
        sqlx::query_as::<_, ProjectPhase>(&query)
            .bind(project_id)
            .fetch_all(conn)
            .await
    }
}
