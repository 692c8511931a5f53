//! Repository for the `invoices` table.

use sqlx::PgPool;
use staffledger_core::types::DbId;

use crate::models::invoice::{CreateInvoice, Invoice};

const COLUMNS: &str =
    "id, project_id, client_name, period_start, period_end, total_amount, created_at, updated_at";

pub struct InvoiceRepo;

impl InvoiceRepo {
    pub async fn create(pool: &PgPool, input: &CreateInvoice) -> Result<Invoice, sqlx::Error> {
        let query = format!(
            "INSERT INTO invoices (project_id, client_name, period_start, period_end, total_amount)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(input.project_id)
            .bind(&input.client_name)
            .bind(input.period_start)
            .bind(input.period_end)
            .bind(input.total_amount)
            .fetch_one(pool)
            .await
    }

    /// Invoices of a project, latest period first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Invoice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invoices WHERE project_id = $1
             ORDER BY period_end DESC, period_start DESC, id DESC"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
