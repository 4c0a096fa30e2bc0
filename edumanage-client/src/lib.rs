//! EduManage HTTP Client
//!
//! A simple, type-safe HTTP client for the EduManage server API.
//!
//! The server identifies callers by a session cookie, so the client keeps a
//! cookie store: log in once and every later call on the same client is
//! authenticated.
//!
//! # Example
//!
//! ```no_run
//! use edumanage_client::EduManageClient;
//! use edumanage_core::dto::student::StudentQuery;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = EduManageClient::new("http://localhost:8080")?;
//!     client.login("admin", "admin", false).await?;
//!
//!     let page = client.list_students(&StudentQuery::default(), 1).await?;
//!     println!("{} students", page.count);
//!     Ok(())
//! }
//! ```

mod auth;
mod dashboards;
pub mod error;
mod finance;
mod people;
mod teaching;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;

/// HTTP client for the EduManage API
///
/// Methods are grouped by area:
/// - Authentication (login, logout, current user, login codes)
/// - People (students, teachers, user accounts)
/// - Teaching (subjects, schedules, grades)
/// - Finance (invoices)
/// - Role dashboards
#[derive(Debug, Clone)]
pub struct EduManageClient {
    /// Base URL of the server (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance with a cookie store
    client: Client,
}

impl EduManageClient {
    /// Create a new client with its own cookie store
    ///
    /// Redirects are not followed: the server answers API calls with JSON
    /// and only redirects browser page loads.
    ///
    /// # Example
    /// ```
    /// use edumanage_client::EduManageClient;
    ///
    /// let client = EduManageClient::new("http://localhost:8080").unwrap();
    /// ```
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()?;

        Ok(Self::with_client(base_url, client))
    }

    /// Create a new client with a custom HTTP client
    ///
    /// The given client must have a cookie store enabled for authenticated
    /// calls to work.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = EduManageClient::new("http://localhost:8080").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = EduManageClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/api/students"), "http://localhost:8080/api/students");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::builder().cookie_store(true).build().unwrap();
        let client = EduManageClient::with_client("http://localhost:8080", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
