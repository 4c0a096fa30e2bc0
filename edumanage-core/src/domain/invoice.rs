//! Invoice domain model
//!
//! Tuition and fee invoices issued to a student.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::ParseEnumError;

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InvoiceStatus {
    #[default]
    Unpaid,
    Paid,
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 5] = [
        InvoiceStatus::Unpaid,
        InvoiceStatus::Paid,
        InvoiceStatus::PartiallyPaid,
        InvoiceStatus::Overdue,
        InvoiceStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => "Unpaid",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::PartiallyPaid => "Partially Paid",
            InvoiceStatus::Overdue => "Overdue",
            InvoiceStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InvoiceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("invoice status", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: i64,
    pub student_id: i64,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,

    /// Amount due, in whole currency units
    pub total_amount: i64,

    /// Amount received so far, in whole currency units
    pub amount_paid: i64,

    pub status: InvoiceStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Amount still owed
    pub fn outstanding(&self) -> i64 {
        (self.total_amount - self.amount_paid).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partially_paid_label() {
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::PartiallyPaid).unwrap(),
            "\"Partially Paid\""
        );
        assert_eq!(
            "Partially Paid".parse::<InvoiceStatus>().unwrap(),
            InvoiceStatus::PartiallyPaid
        );
        assert!("Pending".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_outstanding_never_negative() {
        let now = Utc::now();
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let mut invoice = Invoice {
            id: 1,
            student_id: 1,
            invoice_date: date,
            due_date: date,
            total_amount: 500_000,
            amount_paid: 200_000,
            status: InvoiceStatus::PartiallyPaid,
            notes: None,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(invoice.outstanding(), 300_000);

        invoice.amount_paid = 600_000;
        assert_eq!(invoice.outstanding(), 0);
    }
}
