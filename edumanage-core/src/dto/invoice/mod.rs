//! Invoice DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::invoice::InvoiceStatus;

/// Create or edit form for an invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceForm {
    pub student_id: i64,

    /// Defaults to today
    #[serde(default)]
    pub invoice_date: Option<NaiveDate>,

    pub due_date: NaiveDate,
    pub total_amount: i64,

    #[serde(default)]
    pub amount_paid: i64,

    #[serde(default)]
    pub status: InvoiceStatus,

    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoiceQuery {
    #[serde(default, deserialize_with = "crate::dto::empty_as_none")]
    pub status: Option<InvoiceStatus>,

    #[serde(default, deserialize_with = "crate::dto::empty_as_none")]
    pub student_id: Option<i64>,
}
