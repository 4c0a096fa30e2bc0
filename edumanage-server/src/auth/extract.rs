//! Access to the signed-in user from handlers

use axum::{extract::FromRequestParts, http::request::Parts};
use edumanage_core::domain::role::Role;
use edumanage_core::dto::auth::SessionUser;

use sqlx::PgPool;

use crate::api::error::{ApiError, ApiResult};
use crate::service::permission_service;

/// The user whose session the gate resolved for this request
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

impl CurrentUser {
    /// Fail with 403 unless the user holds one of the given roles
    pub fn require_role(&self, allowed: &[Role]) -> ApiResult<()> {
        if allowed.contains(&self.0.role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "Role '{}' may not access this resource",
                self.0.role
            )))
        }
    }

    /// Fail with 403 unless the user's role carries the permission
    pub async fn require_permission(&self, pool: &PgPool, name: &str) -> ApiResult<()> {
        permission_service::require(pool, &self.0, name)
            .await
            .map_err(ApiError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current(role: Role) -> CurrentUser {
        CurrentUser(SessionUser {
            id: 5,
            username: "sari".to_string(),
            role,
        })
    }

    #[test]
    fn test_require_role() {
        assert!(current(Role::Admin).require_role(&[Role::Admin]).is_ok());
        assert!(
            current(Role::Teacher)
                .require_role(&[Role::Admin, Role::Teacher])
                .is_ok()
        );
        assert!(matches!(
            current(Role::Student).require_role(&[Role::Admin, Role::Teacher]),
            Err(ApiError::Forbidden(_))
        ));
    }
}
