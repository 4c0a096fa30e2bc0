//! Invoice API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use edumanage_core::domain::invoice::Invoice;
use edumanage_core::domain::permission::{MANAGE_FINANCIAL_DATA, VIEW_FINANCIAL_DATA};
use edumanage_core::dto::invoice::{InvoiceForm, InvoiceQuery};
use sqlx::PgPool;

use crate::api::error::ApiResult;
use crate::auth::CurrentUser;
use crate::service::invoice_service;

/// GET /api/invoices
pub async fn list_invoices(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Query(query): Query<InvoiceQuery>,
) -> ApiResult<Json<Vec<Invoice>>> {
    user.require_permission(&pool, VIEW_FINANCIAL_DATA).await?;
    tracing::debug!("Listing invoices");

    let invoices = invoice_service::list_invoices(&pool, &query).await?;

    Ok(Json(invoices))
}

/// GET /api/invoices/{id}
pub async fn get_invoice(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Invoice>> {
    user.require_permission(&pool, VIEW_FINANCIAL_DATA).await?;
    tracing::debug!("Getting invoice: {}", id);

    let invoice = invoice_service::get_invoice(&pool, id).await?;

    Ok(Json(invoice))
}

/// POST /api/invoices
pub async fn create_invoice(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Json(form): Json<InvoiceForm>,
) -> ApiResult<Json<Invoice>> {
    user.require_permission(&pool, MANAGE_FINANCIAL_DATA).await?;
    tracing::info!("Creating invoice for student {}", form.student_id);

    let invoice = invoice_service::create_invoice(&pool, form).await?;

    Ok(Json(invoice))
}

/// PUT /api/invoices/{id}
pub async fn update_invoice(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(form): Json<InvoiceForm>,
) -> ApiResult<Json<Invoice>> {
    user.require_permission(&pool, MANAGE_FINANCIAL_DATA).await?;
    tracing::info!("Updating invoice: {}", id);

    let invoice = invoice_service::update_invoice(&pool, id, form).await?;

    Ok(Json(invoice))
}

/// DELETE /api/invoices/{id}
pub async fn delete_invoice(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    user.require_permission(&pool, MANAGE_FINANCIAL_DATA).await?;
    tracing::info!("Deleting invoice: {}", id);

    invoice_service::delete_invoice(&pool, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
