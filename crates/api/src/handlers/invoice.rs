//! Handlers for invoices: recording, listing, preview, generation and the
//! per-contributor invoice table.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use staffledger_core::dates::{parse_period, INVALID_DATE_FORMAT};
use staffledger_core::error::CoreError;
use staffledger_core::invoice::{
    build_preview, build_table, invoice_total, resolve_client_name, ContributorHours,
    InvoicePreview, InvoiceTable, TaskBilling, PERIOD_REQUIRED,
};
use staffledger_core::types::DbId;
use staffledger_core::validation::{validate_non_blank, validate_non_negative};
use staffledger_db::models::invoice::{CreateInvoice, Invoice};
use staffledger_db::repositories::{InvoiceRepo, ProjectRepo, ReportRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_project_exists;
use crate::query::{DateRangeParams, PeriodParams};
use crate::state::AppState;

/// Request body for `POST /projects/{id}/invoices/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateInvoiceRequest {
    pub period_start: Option<String>,
    pub period_end: Option<String>,
    /// Overrides the project's client when non-blank.
    pub client_name: Option<String>,
}

/// A blank period bound counts as missing.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// POST /api/v1/invoices
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateInvoice>,
) -> AppResult<(StatusCode, Json<Invoice>)> {
    validate_non_blank(&input.client_name, "client_name")?;
    validate_non_negative(input.total_amount, "total_amount")?;

    let invoice = InvoiceRepo::create(&state.pool, &input).await?;
    tracing::info!(invoice_id = invoice.id, project_id = invoice.project_id, "Invoice recorded");
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// GET /api/v1/projects/{id}/invoices
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Invoice>>> {
    ensure_project_exists(&state.pool, project_id).await?;
    let invoices = InvoiceRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(invoices))
}

/// GET /api/v1/projects/{id}/invoices/preview?period_start=&period_end=
pub async fn preview(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(params): Query<PeriodParams>,
) -> AppResult<Json<InvoicePreview>> {
    let (start, end) = parse_period(&params.period_start, &params.period_end, INVALID_DATE_FORMAT)?;
    ensure_project_exists(&state.pool, project_id).await?;

    let rows: Vec<TaskBilling> = ReportRepo::task_billing(&state.pool, project_id, start, end)
        .await?
        .into_iter()
        .map(TaskBilling::from)
        .collect();
    Ok(Json(build_preview(project_id, start, end, rows)))
}

/// POST /api/v1/projects/{id}/invoices/generate
///
/// Totals billable hours in the period at per-user rates, rounds to whole
/// units and persists the invoice.
pub async fn generate(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<GenerateInvoiceRequest>,
) -> AppResult<(StatusCode, Json<Invoice>)> {
    let (Some(raw_start), Some(raw_end)) = (non_blank(&input.period_start), non_blank(&input.period_end))
    else {
        return Err(AppError::BadRequest(PERIOD_REQUIRED.into()));
    };
    let (period_start, period_end) = parse_period(raw_start, raw_end, INVALID_DATE_FORMAT)?;

    let project = ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    let billable = ReportRepo::billable_total(&state.pool, project_id, period_start, period_end).await?;
    let create = CreateInvoice {
        project_id,
        client_name: resolve_client_name(input.client_name.as_deref(), &project.client_name),
        period_start,
        period_end,
        total_amount: invoice_total(billable),
    };
    let invoice = InvoiceRepo::create(&state.pool, &create).await?;

    tracing::info!(
        invoice_id = invoice.id,
        project_id,
        %period_start,
        %period_end,
        total_amount = invoice.total_amount,
        "Invoice generated"
    );
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// GET /api/v1/projects/{id}/invoice-table?start_date=&end_date=
pub async fn table(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(params): Query<DateRangeParams>,
) -> AppResult<Json<InvoiceTable>> {
    let (start, end) = parse_period(&params.start_date, &params.end_date, INVALID_DATE_FORMAT)?;
    ensure_project_exists(&state.pool, project_id).await?;

    let rows: Vec<ContributorHours> = ReportRepo::contributor_hours(&state.pool, project_id, start, end)
        .await?
        .into_iter()
        .map(ContributorHours::from)
        .collect();
    Ok(Json(build_table(rows)))
}
