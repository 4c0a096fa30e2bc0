//! Invoice Service

use chrono::{NaiveDate, Utc};
use edumanage_core::domain::invoice::Invoice;
use edumanage_core::dto::auth::SessionUser;
use edumanage_core::dto::invoice::{InvoiceForm, InvoiceQuery};
use edumanage_core::filter::ListFilter;
use sqlx::PgPool;

use crate::repository::invoice_repository;
use crate::service::error::{Result, ServiceError};
use crate::service::student_service;

/// List invoices matching a query
pub async fn list_invoices(pool: &PgPool, query: &InvoiceQuery) -> Result<Vec<Invoice>> {
    let invoices = invoice_repository::list(pool, query.student_id).await?;
    Ok(query.apply(invoices))
}

/// Invoices addressed to the signed-in student
pub async fn my_invoices(pool: &PgPool, user: &SessionUser) -> Result<Vec<Invoice>> {
    let student = student_service::profile_of(pool, user).await?;
    let invoices = invoice_repository::list(pool, Some(student.id)).await?;
    Ok(invoices)
}

/// Get an invoice by ID
pub async fn get_invoice(pool: &PgPool, id: i64) -> Result<Invoice> {
    let invoice = invoice_repository::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Invoice", id))?;

    Ok(invoice)
}

/// Create an invoice; the invoice date defaults to today
pub async fn create_invoice(pool: &PgPool, form: InvoiceForm) -> Result<Invoice> {
    let invoice_date = form.invoice_date.unwrap_or_else(today);
    validate_invoice(&form, invoice_date)?;

    let invoice = invoice_repository::insert(pool, &form, invoice_date).await?;

    tracing::info!(
        "Invoice created: {} for student {} ({})",
        invoice.id,
        invoice.student_id,
        invoice.total_amount
    );

    Ok(invoice)
}

/// Replace an invoice's fields; an absent invoice date keeps the stored one
pub async fn update_invoice(pool: &PgPool, id: i64, form: InvoiceForm) -> Result<Invoice> {
    let invoice_date = match form.invoice_date {
        Some(date) => date,
        None => get_invoice(pool, id).await?.invoice_date,
    };
    validate_invoice(&form, invoice_date)?;

    let invoice = invoice_repository::update(pool, id, &form, invoice_date)
        .await?
        .ok_or_else(|| ServiceError::not_found("Invoice", id))?;

    tracing::info!("Invoice updated: {} ({})", invoice.id, invoice.status);

    Ok(invoice)
}

/// Delete an invoice
pub async fn delete_invoice(pool: &PgPool, id: i64) -> Result<()> {
    let deleted = invoice_repository::delete(pool, id).await?;

    if !deleted {
        return Err(ServiceError::not_found("Invoice", id));
    }

    tracing::info!("Invoice deleted: {}", id);

    Ok(())
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Amounts are non-negative, never overpaid, and the due date does not
/// precede the invoice date
pub fn validate_invoice(form: &InvoiceForm, invoice_date: NaiveDate) -> Result<()> {
    if form.total_amount < 0 {
        return Err(ServiceError::validation("Total amount cannot be negative"));
    }

    if form.amount_paid < 0 {
        return Err(ServiceError::validation("Amount paid cannot be negative"));
    }

    if form.amount_paid > form.total_amount {
        return Err(ServiceError::validation(
            "Amount paid cannot exceed the total amount",
        ));
    }

    if form.due_date < invoice_date {
        return Err(ServiceError::validation(
            "Due date cannot be before the invoice date",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use edumanage_core::domain::invoice::InvoiceStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn form(total: i64, paid: i64) -> InvoiceForm {
        InvoiceForm {
            student_id: 1,
            invoice_date: Some(date(2024, 7, 1)),
            due_date: date(2024, 7, 31),
            total_amount: total,
            amount_paid: paid,
            status: InvoiceStatus::PartiallyPaid,
            notes: Some("SPP Juli".to_string()),
        }
    }

    #[test]
    fn test_valid_invoice() {
        assert!(validate_invoice(&form(500_000, 250_000), date(2024, 7, 1)).is_ok());
        assert!(validate_invoice(&form(500_000, 500_000), date(2024, 7, 1)).is_ok());
    }

    #[test]
    fn test_invalid_amounts() {
        assert!(validate_invoice(&form(-1, 0), date(2024, 7, 1)).is_err());
        assert!(validate_invoice(&form(100, -1), date(2024, 7, 1)).is_err());
        assert!(validate_invoice(&form(100, 101), date(2024, 7, 1)).is_err());
    }

    #[test]
    fn test_due_date_before_invoice_date() {
        assert!(validate_invoice(&form(100, 0), date(2024, 8, 1)).is_err());
    }
}
