//! Authentication endpoints

use crate::EduManageClient;
use crate::error::Result;
use edumanage_core::dto::auth::{CreateLoginCode, LoginCode, LoginRequest, LoginResponse, MeResponse};

impl EduManageClient {
    // =============================================================================
    // Session
    // =============================================================================

    /// Log in; the session cookie is kept for later calls
    ///
    /// # Arguments
    /// * `username` - Account name
    /// * `password` - Account password
    /// * `remember_me` - Ask for the long-lived session
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<LoginResponse> {
        let req = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            remember_me,
            from: None,
        };

        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&req)
            .send()
            .await?;

        let login: LoginResponse = self.handle_response(response).await?;
        tracing::debug!("Logged in as {} ({})", login.user.username, login.user.role);

        Ok(login)
    }

    /// End the current session
    pub async fn logout(&self) -> Result<()> {
        let response = self
            .client
            .post(self.url("/api/auth/logout"))
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// The signed-in user and their permissions
    pub async fn me(&self) -> Result<MeResponse> {
        let response = self.client.get(self.url("/api/auth/me")).send().await?;

        self.handle_response(response).await
    }

    /// Issue a one-time login code for a user (admin only)
    pub async fn create_login_code(&self, user_id: i64) -> Result<LoginCode> {
        let response = self
            .client
            .post(self.url("/api/auth/login-codes"))
            .json(&CreateLoginCode { user_id })
            .send()
            .await?;

        self.handle_response(response).await
    }
}
