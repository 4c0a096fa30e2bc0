//! Auth Service
//!
//! Credential checks, session lifecycle and one-time login codes.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use edumanage_core::domain::role::Role;
use edumanage_core::dto::auth::{LoginCode, LoginRequest, SessionUser};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password;
use crate::auth::session::safe_redirect;
use crate::config::Config;
use crate::repository::{session_repository, user_repository};
use crate::service::error::{Result, ServiceError};

/// Message shown for any wrong username/password combination
pub const INVALID_CREDENTIALS: &str = "Username atau password salah";

/// Message shown when a login code cannot be exchanged
pub const CALLBACK_FAILED: &str = "Could not authenticate user";

/// A freshly stored session
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user: SessionUser,
    pub token: Uuid,
    pub max_age: Duration,
}

/// Check credentials and open a session
pub async fn login(pool: &PgPool, config: &Config, req: &LoginRequest) -> Result<NewSession> {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(ServiceError::validation("Username and password are required"));
    }

    let credentials = user_repository::find_credentials(pool, username)
        .await?
        .filter(|c| password::verify_password(&req.password, &c.password_hash))
        .ok_or_else(|| ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let role = Role::from_id(credentials.role_id).ok_or_else(|| {
        ServiceError::InternalError(format!("User {} has unknown role", credentials.id))
    })?;

    let user = SessionUser {
        id: credentials.id,
        username: credentials.username,
        role,
    };

    let ttl = if req.remember_me {
        config.remember_me_ttl
    } else {
        config.session_ttl
    };

    let session = open_session(pool, user, ttl).await?;
    tracing::info!("User logged in: {} ({})", session.user.username, session.user.role);

    Ok(session)
}

/// Where to send a user after login: the requested page when it is local,
/// otherwise the dashboard of their role
pub fn login_redirect(role: Role, from: Option<&str>) -> String {
    safe_redirect(from)
        .unwrap_or(role.dashboard_path())
        .to_string()
}

/// Resolve a session token. Expired sessions are removed on sight.
pub async fn resolve_session(pool: &PgPool, token: Uuid) -> Result<Option<SessionUser>> {
    let user = session_repository::find_user(pool, token).await?;

    if user.is_none() && session_repository::delete_if_expired(pool, token).await? {
        tracing::debug!("Removed expired session");
    }

    Ok(user)
}

/// End a session
pub async fn logout(pool: &PgPool, token: Uuid) -> Result<()> {
    session_repository::delete(pool, token).await?;
    tracing::info!("Session closed");
    Ok(())
}

/// Issue a one-time login code for a user
pub async fn issue_login_code(pool: &PgPool, config: &Config, user_id: i64) -> Result<LoginCode> {
    user_repository::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User", user_id))?;

    let code = Uuid::new_v4();
    let expires_at = expires_after(config.login_code_ttl)?;
    session_repository::insert_login_code(pool, code, user_id, expires_at).await?;

    tracing::info!("Login code issued for user {}", user_id);

    Ok(LoginCode {
        code,
        user_id,
        expires_at,
    })
}

/// Trade a login code for a session. A code works once.
pub async fn exchange_login_code(pool: &PgPool, config: &Config, code: Uuid) -> Result<NewSession> {
    let user_id = session_repository::consume_login_code(pool, code)
        .await?
        .ok_or_else(|| ServiceError::Unauthorized(CALLBACK_FAILED.to_string()))?;

    let user = user_repository::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| ServiceError::Unauthorized(CALLBACK_FAILED.to_string()))?;

    let user = SessionUser {
        id: user.id,
        username: user.username,
        role: user.role,
    };

    let session = open_session(pool, user, config.session_ttl).await?;
    tracing::info!("Login code exchanged for user {}", session.user.id);

    Ok(session)
}

async fn open_session(pool: &PgPool, user: SessionUser, ttl: Duration) -> Result<NewSession> {
    let token = Uuid::new_v4();
    let expires_at = expires_after(ttl)?;
    session_repository::insert(pool, token, user.id, expires_at).await?;

    Ok(NewSession {
        user,
        token,
        max_age: ttl,
    })
}

fn expires_after(ttl: Duration) -> Result<DateTime<Utc>> {
    Utc::now()
        .checked_add_signed(to_delta(ttl)?)
        .ok_or_else(|| ServiceError::InternalError(format!("Expiry out of range: {:?}", ttl)))
}

fn to_delta(ttl: Duration) -> Result<TimeDelta> {
    TimeDelta::from_std(ttl)
        .map_err(|_| ServiceError::InternalError(format!("Duration out of range: {:?}", ttl)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_prefers_safe_from() {
        assert_eq!(
            login_redirect(Role::Admin, Some("/dashboard/admin/users")),
            "/dashboard/admin/users"
        );
    }

    #[test]
    fn test_login_redirect_falls_back_to_dashboard() {
        assert_eq!(login_redirect(Role::Teacher, None), "/dashboard/guru");
        assert_eq!(
            login_redirect(Role::Student, Some("//evil.example/phish")),
            "/dashboard/siswa"
        );
        assert_eq!(
            login_redirect(Role::Admin, Some("https://evil.example")),
            "/dashboard/admin"
        );
    }

    #[test]
    fn test_to_delta() {
        assert_eq!(
            to_delta(Duration::from_secs(3600)).unwrap(),
            TimeDelta::hours(1)
        );
        assert!(to_delta(Duration::from_secs(u64::MAX)).is_err());
    }

    #[test]
    fn test_expiry_past_the_calendar_is_an_error() {
        assert!(expires_after(Duration::from_secs(3600)).unwrap() > Utc::now());
        // ~317,000 years: a valid TimeDelta, but beyond the last representable date
        assert!(expires_after(Duration::from_secs(10_000_000_000_000)).is_err());
    }
}
