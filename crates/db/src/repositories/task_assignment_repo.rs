//! Repository for the `task_assignments` table.

use sqlx::{PgConnection, PgPool};
use staffledger_core::merge::{
    plan_id_merge, plan_keyed_merge, ForeignIds, KeyedAction, KeyedItem, KeyedRow, MergeAction,
};
use staffledger_core::types::DbId;

use crate::models::task_assignment::{AssignmentInput, TaskAssignment};

const COLUMNS: &str = "id, task_id, user_id, hourly_rate, created_at, updated_at";

/// Provides assignment listing and the two list-merge flavours.
pub struct TaskAssignmentRepo;

impl TaskAssignmentRepo {
    pub async fn list_by_task(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Vec<TaskAssignment>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::list_inner(&mut conn, task_id).await
    }

    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<TaskAssignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_assignments WHERE user_id = $1 ORDER BY task_id, id");
        sqlx::query_as::<_, TaskAssignment>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Merge assignments into a task, matching by id first and user second.
    ///
    /// Resending a user without an id updates their existing assignment.
    pub async fn merge_by_user(
        pool: &PgPool,
        task_id: DbId,
        items: &[AssignmentInput],
    ) -> Result<Vec<TaskAssignment>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing: Vec<KeyedRow> = Self::list_inner(&mut tx, task_id)
            .await?
            .into_iter()
            .map(|a| KeyedRow {
                id: a.id,
                key: a.user_id,
            })
            .collect();
        let incoming: Vec<KeyedItem> = items
            .iter()
            .map(|i| KeyedItem {
                id: i.assignment_id,
                key: i.user_id,
            })
            .collect();

        for action in plan_keyed_merge(&existing, &incoming) {
            match action {
                KeyedAction::Insert { item } => {
                    Self::insert_inner(&mut tx, task_id, &items[item]).await?;
                }
                KeyedAction::Update { id, item } => {
                    Self::update_inner(&mut tx, id, &items[item]).await?;
                }
            }
        }

        let rows = Self::list_inner(&mut tx, task_id).await?;
        tx.commit().await?;
        Ok(rows)
    }

    /// Merge assignments into a task by id only.
    ///
    /// An id belonging to another task is treated as a new assignment of
    /// this task. Adding a user who is already assigned fails with the
    /// `uq_task_assignments_task_user` unique violation.
    pub async fn merge_by_id(
        pool: &PgPool,
        task_id: DbId,
        items: &[AssignmentInput],
    ) -> Result<Vec<TaskAssignment>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM task_assignments WHERE task_id = $1")
                .bind(task_id)
                .fetch_all(&mut *tx)
                .await?;
        let incoming: Vec<Option<DbId>> = items.iter().map(|i| i.assignment_id).collect();

        for action in plan_id_merge(&existing, &incoming, ForeignIds::Insert) {
            match action {
                MergeAction::Insert { item } => {
                    Self::insert_inner(&mut tx, task_id, &items[item]).await?;
                }
                MergeAction::Update { id, item } => {
                    Self::update_inner(&mut tx, id, &items[item]).await?;
                }
                // Not produced under `ForeignIds::Insert`.
                MergeAction::Skip { .. } => {}
            }
        }

        let rows = Self::list_inner(&mut tx, task_id).await?;
        tx.commit().await?;
        Ok(rows)
    }

    async fn list_inner(
        conn: &mut PgConnection,
        task_id: DbId,
    ) -> Result<Vec<TaskAssignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM task_assignments WHERE task_id = $1 ORDER BY id");
        sqlx::query_as::<_, TaskAssignment>(&query)
            .bind(task_id)
            .fetch_all(conn)
            .await
    }

    async fn insert_inner(
        conn: &mut PgConnection,
        task_id: DbId,
        input: &AssignmentInput,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO task_assignments (task_id, user_id, hourly_rate) VALUES ($1, $2, $3)")
            .bind(task_id)
            .bind(input.user_id)
            .bind(input.hourly_rate)
            .execute(conn)
            .await?;
        Ok(())
    }

    async fn update_inner(
        conn: &mut PgConnection,
        id: DbId,
        input: &AssignmentInput,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE task_assignments SET user_id = $2, hourly_rate = $3 WHERE id = $1")
            .bind(id)
            .bind(input.user_id)
            .bind(input.hourly_rate)
            .execute(conn)
            .await?;
        Ok(())
    }
}
