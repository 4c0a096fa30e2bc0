//! Student API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use edumanage_core::domain::role::Role;
use edumanage_core::domain::student::Student;
use edumanage_core::dto::page::{Page, PageParams};
use edumanage_core::dto::student::{CreateStudent, StudentProfile, StudentQuery};
use sqlx::PgPool;

use crate::api::error::ApiResult;
use crate::auth::CurrentUser;
use crate::service::student_service;

/// GET /api/students
/// One page of students, filtered by search, class and gender
pub async fn list_students(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Query(page): Query<PageParams>,
    Query(query): Query<StudentQuery>,
) -> ApiResult<Json<Page<Student>>> {
    user.require_role(&[Role::Admin, Role::Teacher])?;
    tracing::debug!("Listing students, page {}", page.page());

    let students = student_service::list_students(&pool, &query, page).await?;

    Ok(Json(students))
}

/// GET /api/students/classes
/// Distinct class labels
pub async fn list_classes(
    State(pool): State<PgPool>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<String>>> {
    user.require_role(&[Role::Admin, Role::Teacher])?;

    let classes = student_service::list_classes(&pool).await?;

    Ok(Json(classes))
}

/// POST /api/students
/// Create a login account and its student profile
pub async fn create_student(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Json(req): Json<CreateStudent>,
) -> ApiResult<Json<Student>> {
    user.require_role(&[Role::Admin])?;
    tracing::info!("Creating student: {} ({})", req.profile.name, req.profile.nis);

    let student = student_service::create_student(&pool, req).await?;

    Ok(Json(student))
}

/// GET /api/students/{id}
pub async fn get_student(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Student>> {
    user.require_role(&[Role::Admin])?;
    tracing::debug!("Getting student: {}", id);

    let student = student_service::get_student(&pool, id).await?;

    Ok(Json(student))
}

/// PUT /api/students/{id}
pub async fn update_student(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(profile): Json<StudentProfile>,
) -> ApiResult<Json<Student>> {
    user.require_role(&[Role::Admin])?;
    tracing::info!("Updating student: {}", id);

    let student = student_service::update_student(&pool, id, profile).await?;

    Ok(Json(student))
}

/// DELETE /api/students/{id}
/// Delete a student and its account
pub async fn delete_student(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    user.require_role(&[Role::Admin])?;
    tracing::info!("Deleting student: {}", id);

    student_service::delete_student(&pool, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
