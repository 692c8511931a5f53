//! Repository for the `tasks` table.

use sqlx::PgPool;
use staffledger_core::types::DbId;

use crate::models::task::{CreateTask, Task, DEFAULT_TASK_STATUS};

const COLUMNS: &str = "id, phase_id, title, description, start_date, end_date, due_date, \
    status, budget, actual_spend, created_at, updated_at";

/// Provides task CRUD and the actual-spend rollup.
pub struct TaskRepo;

impl TaskRepo {
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (phase_id, title, description, start_date, end_date, due_date,
                 status, budget, actual_spend)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, '{DEFAULT_TASK_STATUS}'), $8, COALESCE($9, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.phase_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.due_date)
            .bind(&input.status)
            .bind(input.budget)
            .bind(input.actual_spend)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Tasks of one phase, soonest due first.
    pub async fn list_by_phase(pool: &PgPool, phase_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE phase_id = $1 ORDER BY due_date, id");
        sqlx::query_as::<_, Task>(&query)
            .bind(phase_id)
            .fetch_all(pool)
            .await
    }

    /// Tasks the user holds an assignment on, soonest due first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE id IN (SELECT task_id FROM task_assignments WHERE user_id = $1)
             ORDER BY due_date, id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Recompute and store a task's actual spend.
    ///
    /// Spend is the sum over the task's assignments of the assignee's rate
    /// times every hour they logged on the task, billable or not, rounded to
    /// two decimals. Hours logged by users without an assignment cost nothing.
    /// Returns `None` if the task does not exist.
    pub async fn recompute_actual_spend(
        pool: &PgPool,
        task_id: DbId,
    ) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar::<_, f64>(
            "UPDATE tasks SET actual_spend = (
                SELECT ROUND(COALESCE(SUM(ta.hourly_rate * logged.hours), 0)::NUMERIC, 2)::FLOAT8
                FROM task_assignments ta
                JOIN (
                    SELECT user_id, SUM(hours) AS hours
                    FROM time_entries
                    WHERE task_id = $1
                    GROUP BY user_id
                ) logged ON logged.user_id = ta.user_id
                WHERE ta.task_id = $1
             )
             WHERE id = $1
             RETURNING actual_spend",
        )
        .bind(task_id)
        .fetch_optional(pool)
        .await
    }
}
