//! Aggregate queries behind the utilization, invoicing and spend reports.
//!
//! Every query walks `time_entries -> tasks -> project_phases` to reach the
//! project, and prices hours at the entry user's task-assignment rate.
//! Date bounds are inclusive.

use sqlx::PgPool;
use staffledger_core::types::{Date, DbId};

use crate::models::report::{ContributorHoursRow, StaffedUserRow, TaskBillingRow, WeeklyHoursRow};

/// Joins shared by the project-scoped time entry aggregates.
const PROJECT_ENTRIES: &str = "FROM time_entries te
     JOIN tasks t ON t.id = te.task_id
     JOIN project_phases ph ON ph.id = t.phase_id";

pub struct ReportRepo;

impl ReportRepo {
    /// Hours per user per Monday-aligned week for entries in `[from, to]`.
    pub async fn weekly_actuals(
        pool: &PgPool,
        project_id: DbId,
        from: Date,
        to: Date,
    ) -> Result<Vec<WeeklyHoursRow>, sqlx::Error> {
        let query = format!(
            "SELECT te.user_id,
                    te.work_date - (EXTRACT(ISODOW FROM te.work_date)::INT - 1) AS week_start,
                    SUM(te.hours)::FLOAT8 AS actual_hours
             {PROJECT_ENTRIES}
             WHERE ph.project_id = $1 AND te.work_date BETWEEN $2 AND $3
             GROUP BY te.user_id, week_start"
        );
        sqlx::query_as::<_, WeeklyHoursRow>(&query)
            .bind(project_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Staffing rows of a project joined with the user's name.
    pub async fn staffed_users(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<StaffedUserRow>, sqlx::Error> {
        sqlx::query_as::<_, StaffedUserRow>(
            "SELECT ps.user_id, u.name AS user_name, ps.forecast_hours_initial AS planned_hours
             FROM project_staffing ps
             JOIN users u ON u.id = ps.user_id
             WHERE ps.project_id = $1
             ORDER BY ps.id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    /// Billable hours and amount per task with entries in the period.
    pub async fn task_billing(
        pool: &PgPool,
        project_id: DbId,
        start: Date,
        end: Date,
    ) -> Result<Vec<TaskBillingRow>, sqlx::Error> {
        let query = format!(
            "SELECT t.id AS task_id,
                    t.title AS task_title,
                    ph.phase_name,
                    COALESCE(SUM(te.hours) FILTER (WHERE te.is_billable), 0)::FLOAT8 AS hours,
                    COALESCE(SUM(te.hours * COALESCE(ta.hourly_rate, 0))
                             FILTER (WHERE te.is_billable), 0)::FLOAT8 AS amount
             {PROJECT_ENTRIES}
             LEFT JOIN task_assignments ta ON ta.task_id = te.task_id AND ta.user_id = te.user_id
             WHERE ph.project_id = $1 AND te.work_date BETWEEN $2 AND $3
             GROUP BY t.id, t.title, ph.phase_name
             ORDER BY ph.phase_name, t.title, t.id"
        );
        sqlx::query_as::<_, TaskBillingRow>(&query)
            .bind(project_id)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    /// Total billable amount of a project for the period, unrounded.
    pub async fn billable_total(
        pool: &PgPool,
        project_id: DbId,
        start: Date,
        end: Date,
    ) -> Result<f64, sqlx::Error> {
        let query = format!(
            "SELECT COALESCE(SUM(te.hours * COALESCE(ta.hourly_rate, 0)), 0)::FLOAT8
             {PROJECT_ENTRIES}
             LEFT JOIN task_assignments ta ON ta.task_id = te.task_id AND ta.user_id = te.user_id
             WHERE ph.project_id = $1 AND te.work_date BETWEEN $2 AND $3 AND te.is_billable"
        );
        sqlx::query_scalar::<_, f64>(&query)
            .bind(project_id)
            .bind(start)
            .bind(end)
            .fetch_one(pool)
            .await
    }

    /// All hours (billable or not) per (task, contributor) in the period with the
    /// contributor's rate on that task (0 when unassigned).
    pub async fn contributor_hours(
        pool: &PgPool,
        project_id: DbId,
        start: Date,
        end: Date,
    ) -> Result<Vec<ContributorHoursRow>, sqlx::Error> {
        let query = format!(
            "SELECT t.title AS task_title,
                    ph.phase_name,
                    u.name AS user_name,
                    SUM(te.hours)::FLOAT8 AS hours,
                    COALESCE(ta.hourly_rate, 0)::FLOAT8 AS rate
             {PROJECT_ENTRIES}
             JOIN users u ON u.id = te.user_id
             LEFT JOIN task_assignments ta ON ta.task_id = te.task_id AND ta.user_id = te.user_id
             WHERE ph.project_id = $1 AND te.work_date BETWEEN $2 AND $3
             GROUP BY t.id, t.title, ph.phase_name, u.id, u.name, ta.hourly_rate
             ORDER BY ph.phase_name, t.title, u.name"
        );
        sqlx::query_as::<_, ContributorHoursRow>(&query)
            .bind(project_id)
            .bind(start)
            .bind(end)
            .fetch_all(pool)
            .await
    }

    /// Everything spent on a project so far: hours times assignment rate over
    /// all entries that have an assignment. Unrounded.
    pub async fn project_total_spend(pool: &PgPool, project_id: DbId) -> Result<f64, sqlx::Error> {
        let query = format!(
            "SELECT COALESCE(SUM(te.hours * ta.hourly_rate), 0)::FLOAT8
             {PROJECT_ENTRIES}
             JOIN task_assignments ta ON ta.task_id = te.task_id AND ta.user_id = te.user_id
             WHERE ph.project_id = $1"
        );
        sqlx::query_scalar::<_, f64>(&query)
            .bind(project_id)
            .fetch_one(pool)
            .await
    }

    /// Planned cost of a project: staffing rate times initial forecast.
    pub async fn project_forecast_cost(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<f64, sqlx::Error> {
        sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(hourly_rate * forecast_hours_initial), 0)::FLOAT8
             FROM project_staffing
             WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await
    }
}
