//! Authentication DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::role::Role;

/// Credentials submitted by the login form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,

    /// Keep the session alive for the long "remember me" period
    #[serde(default)]
    pub remember_me: bool,

    /// Page the user was sent away from, if any
    #[serde(default)]
    pub from: Option<String>,
}

/// The authenticated user attached to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

/// Successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: SessionUser,

    /// Where the browser should go next
    pub redirect_to: String,
}

/// Current user with resolved permissions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: SessionUser,
    pub permissions: Vec<String>,
}

/// Request to issue a one-time login code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLoginCode {
    pub user_id: i64,
}

/// One-time code exchanged at `/auth/callback` for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCode {
    pub code: Uuid,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}
