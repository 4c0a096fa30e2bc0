//! Subject API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use edumanage_core::domain::role::Role;
use edumanage_core::domain::subject::Subject;
use edumanage_core::dto::subject::{CreateSubject, SubjectQuery};
use sqlx::PgPool;

use crate::api::error::ApiResult;
use crate::auth::CurrentUser;
use crate::service::subject_service;

/// GET /api/subjects
pub async fn list_subjects(
    State(pool): State<PgPool>,
    Query(query): Query<SubjectQuery>,
) -> ApiResult<Json<Vec<Subject>>> {
    tracing::debug!("Listing subjects");

    let subjects = subject_service::list_subjects(&pool, &query).await?;

    Ok(Json(subjects))
}

/// POST /api/subjects
pub async fn create_subject(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Json(req): Json<CreateSubject>,
) -> ApiResult<Json<Subject>> {
    user.require_role(&[Role::Admin])?;
    tracing::info!("Creating subject: {}", req.name);

    let subject = subject_service::create_subject(&pool, req).await?;

    Ok(Json(subject))
}

/// DELETE /api/subjects/{id}
pub async fn delete_subject(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    user.require_role(&[Role::Admin])?;
    tracing::info!("Deleting subject: {}", id);

    subject_service::delete_subject(&pool, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
