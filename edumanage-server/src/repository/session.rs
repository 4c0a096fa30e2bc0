//! Session Repository
//!
//! Server-side sessions and one-time login codes.

use chrono::{DateTime, Utc};
use edumanage_core::dto::auth::SessionUser;
use sqlx::PgPool;
use uuid::Uuid;

use super::user::role_from_id;

/// Store a new session
pub async fn insert(
    pool: &PgPool,
    token: Uuid,
    user_id: i64,
    expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO sessions (token, user_id, created_at, expires_at) VALUES ($1, $2, NOW(), $3)",
    )
    .bind(token)
    .bind(user_id)
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Resolve an unexpired session to its user
pub async fn find_user(pool: &PgPool, token: Uuid) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query_as::<_, SessionUserRow>(
        r#"
        SELECT u.id, u.username, u.role_id
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = $1 AND s.expires_at > NOW()
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    row.map(SessionUser::try_from).transpose()
}

/// Delete a session
pub async fn delete(pool: &PgPool, token: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a session only if it has expired
pub async fn delete_if_expired(pool: &PgPool, token: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE token = $1 AND expires_at <= NOW()")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Store a one-time login code
pub async fn insert_login_code(
    pool: &PgPool,
    code: Uuid,
    user_id: i64,
    expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO login_codes (code, user_id, expires_at) VALUES ($1, $2, $3)")
        .bind(code)
        .bind(user_id)
        .bind(expires_at)
        .execute(pool)
        .await?;

    Ok(())
}

/// Mark a login code used and return its user. Codes that are unknown,
/// expired or already used yield `None`.
pub async fn consume_login_code(pool: &PgPool, code: Uuid) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        UPDATE login_codes
        SET used = TRUE
        WHERE code = $1 AND NOT used AND expires_at > NOW()
        RETURNING user_id
        "#,
    )
    .bind(code)
    .fetch_optional(pool)
    .await
}

// ============================================================================
// Internal helper types for database mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct SessionUserRow {
    id: i64,
    username: String,
    role_id: i16,
}

impl TryFrom<SessionUserRow> for SessionUser {
    type Error = sqlx::Error;

    fn try_from(row: SessionUserRow) -> Result<Self, Self::Error> {
        Ok(SessionUser {
            id: row.id,
            username: row.username,
            role: role_from_id(row.role_id)?,
        })
    }
}
