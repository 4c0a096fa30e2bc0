//! Permission Service

use edumanage_core::dto::auth::SessionUser;
use sqlx::PgPool;

use crate::repository::permission_repository;
use crate::service::error::{Result, ServiceError};

/// Permission names held by a user
pub async fn permissions_for(pool: &PgPool, user_id: i64) -> Result<Vec<String>> {
    let names = permission_repository::names_for_user(pool, user_id).await?;
    Ok(names)
}

/// Fail with `Forbidden` unless the user's role carries the permission
pub async fn require(pool: &PgPool, user: &SessionUser, name: &str) -> Result<()> {
    if permission_repository::user_has(pool, user.id, name).await? {
        Ok(())
    } else {
        tracing::debug!("User {} lacks permission {}", user.username, name);
        Err(ServiceError::Forbidden(format!("Missing permission {}", name)))
    }
}
