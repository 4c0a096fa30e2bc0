//! User API Handlers
//!
//! Account management. Every endpoint needs the MANAGE_USERS permission.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use edumanage_core::domain::permission::MANAGE_USERS;
use edumanage_core::domain::user::UserView;
use edumanage_core::dto::page::{Page, PageParams};
use edumanage_core::dto::user::{CreateUser, UpdateUser, UserQuery};
use sqlx::PgPool;

use crate::api::error::ApiResult;
use crate::auth::CurrentUser;
use crate::service::user_service;

/// GET /api/users
pub async fn list_users(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Query(page): Query<PageParams>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<Page<UserView>>> {
    user.require_permission(&pool, MANAGE_USERS).await?;
    tracing::debug!("Listing users, page {}", page.page());

    let users = user_service::list_users(&pool, &query, page).await?;

    Ok(Json(users))
}

/// POST /api/users
/// Create an account and its role profile
pub async fn create_user(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Json(req): Json<CreateUser>,
) -> ApiResult<Json<UserView>> {
    user.require_permission(&pool, MANAGE_USERS).await?;
    tracing::info!("Creating user: {} ({})", req.username, req.role);

    let created = user_service::create_user(&pool, req).await?;

    Ok(Json(created))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<UserView>> {
    user.require_permission(&pool, MANAGE_USERS).await?;
    tracing::debug!("Getting user: {}", id);

    let view = user_service::get_user(&pool, id).await?;

    Ok(Json(view))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUser>,
) -> ApiResult<Json<UserView>> {
    user.require_permission(&pool, MANAGE_USERS).await?;
    tracing::info!("Updating user: {}", id);

    let view = user_service::update_user(&pool, id, req).await?;

    Ok(Json(view))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    user.require_permission(&pool, MANAGE_USERS).await?;
    tracing::info!("Deleting user: {}", id);

    user_service::delete_user(&pool, &user.0, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
