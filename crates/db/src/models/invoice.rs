//! Invoice model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use staffledger_core::types::{Date, DbId, Timestamp};

/// A row from the `invoices` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub project_id: DbId,
    pub client_name: String,
    pub period_start: Date,
    pub period_end: Date,
    /// Whole currency units.
    pub total_amount: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an invoice. The id is assigned by the database.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoice {
    pub project_id: DbId,
    pub client_name: String,
    pub period_start: Date,
    pub period_end: Date,
    pub total_amount: i64,
}
