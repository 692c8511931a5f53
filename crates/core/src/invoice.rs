//! Invoice line arithmetic.
//!
//! The database aggregates hours and amounts; this module shapes the rows
//! into the preview and table responses and decides the persisted total.

use serde::Serialize;

use crate::money::{round2, to_whole_units};
use crate::types::{Date, DbId};

/// Note attached to every preview line: amounts are summed per contributor,
/// each at their own task-assignment rate.
pub const PER_USER_RATES: &str = "per-user rates applied";

/// Message returned when a generate request omits a period bound.
pub const PERIOD_REQUIRED: &str = "period_start and period_end are required.";

/// Aggregated billable hours and amount for one task in a period.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskBilling {
    pub task_id: DbId,
    pub task_title: String,
    pub phase_name: String,
    pub hours: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewItem {
    pub task_id: DbId,
    pub task_title: String,
    pub phase_name: String,
    pub hours: f64,
    pub rate_info: &'static str,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoicePreview {
    pub project_id: DbId,
    pub period_start: Date,
    pub period_end: Date,
    pub items: Vec<PreviewItem>,
    pub total: f64,
}

/// Build the preview response. The total sums unrounded amounts.
pub fn build_preview(
    project_id: DbId,
    period_start: Date,
    period_end: Date,
    rows: Vec<TaskBilling>,
) -> InvoicePreview {
    let total: f64 = rows.iter().map(|r| r.amount).sum();
    let items = rows
        .into_iter()
        .map(|r| PreviewItem {
            task_id: r.task_id,
            task_title: r.task_title,
            phase_name: r.phase_name,
            hours: round2(r.hours),
            rate_info: PER_USER_RATES,
            amount: round2(r.amount),
        })
        .collect();

    InvoicePreview {
        project_id,
        period_start,
        period_end,
        items,
        total: round2(total),
    }
}

/// All hours one contributor logged on one task in a period, billable or not.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributorHours {
    pub task_title: String,
    pub phase_name: String,
    pub user_name: String,
    pub hours: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceTableLine {
    pub task: String,
    pub phase: String,
    pub task_contributor: String,
    pub hours: f64,
    pub rate: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceTable {
    pub rows: Vec<InvoiceTableLine>,
    pub total_amount: f64,
}

/// Build the invoice table. Each line amount is rounded before it is added
/// to the total, so the total always equals the sum of the printed lines.
pub fn build_table(rows: Vec<ContributorHours>) -> InvoiceTable {
    let lines: Vec<InvoiceTableLine> = rows
        .into_iter()
        .map(|r| InvoiceTableLine {
            amount: round2(r.hours * r.rate),
            hours: round2(r.hours),
            rate: round2(r.rate),
            task: r.task_title,
            phase: r.phase_name,
            task_contributor: r.user_name,
        })
        .collect();
    let total_amount = round2(lines.iter().map(|l| l.amount).sum());

    InvoiceTable {
        rows: lines,
        total_amount,
    }
}

/// The amount stored on a generated invoice.
pub fn invoice_total(billable_amount: f64) -> i64 {
    to_whole_units(billable_amount)
}

/// Pick the client billed on a generated invoice: a non-blank override, else
/// the project's client.
pub fn resolve_client_name(override_name: Option<&str>, project_client: &str) -> String {
    override_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(project_client)
        .to_string()
}
