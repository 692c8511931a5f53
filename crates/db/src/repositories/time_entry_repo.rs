//! Repository for the `time_entries` table.

use sqlx::PgPool;
use staffledger_core::types::{Date, DbId};

use crate::models::time_entry::{CreateTimeEntry, TimeEntry, TimeEntryFilter};

const COLUMNS: &str = "id, task_id, user_id, work_date, hours, is_billable, created_at, updated_at";

pub struct TimeEntryRepo;

impl TimeEntryRepo {
    pub async fn create(pool: &PgPool, input: &CreateTimeEntry) -> Result<TimeEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_entries (task_id, user_id, work_date, hours, is_billable)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(input.task_id)
            .bind(input.user_id)
            .bind(input.work_date)
            .bind(input.hours)
            .bind(input.is_billable)
            .fetch_one(pool)
            .await
    }

    /// List entries, most recent work first. Absent filter fields match all.
    pub async fn list(
        pool: &PgPool,
        filter: &TimeEntryFilter,
    ) -> Result<Vec<TimeEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_entries
             WHERE ($1::BIGINT IS NULL OR task_id = $1)
               AND ($2::BIGINT IS NULL OR user_id = $2)
             ORDER BY work_date DESC, id DESC"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(filter.task_id)
            .bind(filter.user_id)
            .fetch_all(pool)
            .await
    }

    /// One user's entries on any task of a project, with `work_date` in the
    /// inclusive range, oldest first.
    pub async fn list_for_user_in_project(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        start: Date,
        end: Date,
    ) -> Result<Vec<TimeEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_entries
             WHERE user_id = $2
               AND work_date BETWEEN $3 AND $4
               AND task_id IN (
                   SELECT t.id FROM tasks t
                   JOIN project_phases ph ON ph.id = t.phase_id
                   WHERE ph.project_id = $1
               )
             ORDER BY work_date, id"
        );
        sqlx::query_as::<_, TimeEntry>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }
}
