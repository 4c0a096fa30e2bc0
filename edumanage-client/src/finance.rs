//! Invoice endpoints

use crate::EduManageClient;
use crate::error::Result;
use edumanage_core::domain::invoice::Invoice;
use edumanage_core::dto::invoice::{InvoiceForm, InvoiceQuery};

impl EduManageClient {
    /// List invoices (needs VIEW_FINANCIAL_DATA)
    pub async fn list_invoices(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>> {
        let response = self
            .client
            .get(self.url("/api/invoices"))
            .query(query)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Create an invoice (needs MANAGE_FINANCIAL_DATA)
    pub async fn create_invoice(&self, form: &InvoiceForm) -> Result<Invoice> {
        let response = self
            .client
            .post(self.url("/api/invoices"))
            .json(form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Invoices addressed to the signed-in student
    pub async fn my_invoices(&self) -> Result<Vec<Invoice>> {
        let response = self.client.get(self.url("/api/me/invoices")).send().await?;

        self.handle_response(response).await
    }
}
