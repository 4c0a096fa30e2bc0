//! Invoice Repository

use chrono::{DateTime, NaiveDate, Utc};
use edumanage_core::domain::invoice::Invoice;
use edumanage_core::dto::invoice::InvoiceForm;
use sqlx::PgPool;

use super::decode;

const COLUMNS: &str = "id, student_id, invoice_date, due_date, total_amount, amount_paid, \
                       status, notes, created_at, updated_at";

/// Create an invoice dated `invoice_date`
pub async fn insert(
    pool: &PgPool,
    form: &InvoiceForm,
    invoice_date: NaiveDate,
) -> Result<Invoice, sqlx::Error> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
        r#"
        INSERT INTO invoices (student_id, invoice_date, due_date, total_amount, amount_paid,
                              status, notes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
        RETURNING {}
        "#,
        COLUMNS
    ))
    .bind(form.student_id)
    .bind(invoice_date)
    .bind(form.due_date)
    .bind(form.total_amount)
    .bind(form.amount_paid)
    .bind(form.status.as_str())
    .bind(&form.notes)
    .fetch_one(pool)
    .await?;

    row.try_into()
}

/// Replace the fields of an invoice
pub async fn update(
    pool: &PgPool,
    id: i64,
    form: &InvoiceForm,
    invoice_date: NaiveDate,
) -> Result<Option<Invoice>, sqlx::Error> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
        r#"
        UPDATE invoices
        SET student_id = $1, invoice_date = $2, due_date = $3, total_amount = $4,
            amount_paid = $5, status = $6, notes = $7, updated_at = NOW()
        WHERE id = $8
        RETURNING {}
        "#,
        COLUMNS
    ))
    .bind(form.student_id)
    .bind(invoice_date)
    .bind(form.due_date)
    .bind(form.total_amount)
    .bind(form.amount_paid)
    .bind(form.status.as_str())
    .bind(&form.notes)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Invoice::try_from).transpose()
}

/// Find an invoice by ID
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Invoice>, sqlx::Error> {
    let row = sqlx::query_as::<_, InvoiceRow>(&format!(
        "SELECT {} FROM invoices WHERE id = $1",
        COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Invoice::try_from).transpose()
}

/// List invoices, newest first, optionally of one student
pub async fn list(pool: &PgPool, student_id: Option<i64>) -> Result<Vec<Invoice>, sqlx::Error> {
    let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
        r#"
        SELECT {} FROM invoices
        WHERE ($1::bigint IS NULL OR student_id = $1)
        ORDER BY invoice_date DESC, id DESC
        "#,
        COLUMNS
    ))
    .bind(student_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Invoice::try_from).collect()
}

/// Delete an invoice by ID
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// ============================================================================
// Internal helper types for database mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct InvoiceRow {
    id: i64,
    student_id: i64,
    invoice_date: NaiveDate,
    due_date: NaiveDate,
    total_amount: i64,
    amount_paid: i64,
    status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = sqlx::Error;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        Ok(Invoice {
            id: row.id,
            student_id: row.student_id,
            invoice_date: row.invoice_date,
            due_date: row.due_date,
            total_amount: row.total_amount,
            amount_paid: row.amount_paid,
            status: decode(&row.status)?,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
