//! Teacher API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use edumanage_core::domain::role::Role;
use edumanage_core::domain::teacher::Teacher;
use edumanage_core::dto::teacher::{TeacherProfile, TeacherQuery};
use sqlx::PgPool;

use crate::api::error::ApiResult;
use crate::auth::CurrentUser;
use crate::service::teacher_service;

/// GET /api/teachers
pub async fn list_teachers(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Query(query): Query<TeacherQuery>,
) -> ApiResult<Json<Vec<Teacher>>> {
    user.require_role(&[Role::Admin])?;
    tracing::debug!("Listing teachers");

    let teachers = teacher_service::list_teachers(&pool, &query).await?;

    Ok(Json(teachers))
}

/// GET /api/teachers/{id}
pub async fn get_teacher(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Teacher>> {
    user.require_role(&[Role::Admin])?;
    tracing::debug!("Getting teacher: {}", id);

    let teacher = teacher_service::get_teacher(&pool, id).await?;

    Ok(Json(teacher))
}

/// PUT /api/teachers/{id}
pub async fn update_teacher(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(profile): Json<TeacherProfile>,
) -> ApiResult<Json<Teacher>> {
    user.require_role(&[Role::Admin])?;
    tracing::info!("Updating teacher: {}", id);

    let teacher = teacher_service::update_teacher(&pool, id, profile).await?;

    Ok(Json(teacher))
}

/// DELETE /api/teachers/{id}
pub async fn delete_teacher(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    user.require_role(&[Role::Admin])?;
    tracing::info!("Deleting teacher: {}", id);

    teacher_service::delete_teacher(&pool, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
