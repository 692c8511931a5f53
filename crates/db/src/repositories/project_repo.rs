//! Repository for the `projects` table.

use sqlx::PgPool;
use staffledger_core::types::DbId;

use crate::models::project::{CascadeDeleteSummary, CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, client_name, start_date, end_date, started, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (name, client_name, start_date, end_date, started)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.client_name)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.started)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a project with this id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM projects WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// List all projects, earliest start first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY start_date, id");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                client_name = COALESCE($3, client_name),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                started = COALESCE($6, started)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.client_name)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.started)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project and everything hanging off it.
    ///
    /// Children are removed leaf-first: time entries, task assignments,
    /// tasks, phases, staffing, invoices, then the project itself. All of it
    /// happens in one transaction. Returns `None` if the project does not
    /// exist.
    pub async fn delete_cascade(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CascadeDeleteSummary>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked = sqlx::query_scalar::<_, DbId>("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let project_tasks = "SELECT t.id FROM tasks t
             JOIN project_phases ph ON ph.id = t.phase_id
             WHERE ph.project_id = $1";

        let time_entries = sqlx::query(&format!(
            "DELETE FROM time_entries WHERE task_id IN ({project_tasks})"
        ))
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let task_assignments = sqlx::query(&format!(
            "DELETE FROM task_assignments WHERE task_id IN ({project_tasks})"
        ))
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let tasks = sqlx::query(
            "DELETE FROM tasks
             WHERE phase_id IN (SELECT id FROM project_phases WHERE project_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let phases = sqlx::query("DELETE FROM project_phases WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let staffing = sqlx::query("DELETE FROM project_staffing WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let invoices = sqlx::query("DELETE FROM invoices WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(CascadeDeleteSummary {
            time_entries,
            task_assignments,
            tasks,
            phases,
            staffing,
            invoices,
        }))
    }
}
