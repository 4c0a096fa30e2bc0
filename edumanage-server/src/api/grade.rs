//! Grade API Handlers
//!
//! Reading needs VIEW_STUDENT_GRADES, writing EDIT_STUDENT_GRADES. The
//! service additionally limits teachers to their own subjects.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use edumanage_core::domain::grade::GradeView;
use edumanage_core::domain::permission::{EDIT_STUDENT_GRADES, VIEW_STUDENT_GRADES};
use edumanage_core::dto::grade::{CreateGrade, GradeQuery, UpdateGrade};
use sqlx::PgPool;

use crate::api::error::ApiResult;
use crate::auth::CurrentUser;
use crate::service::grade_service;

/// GET /api/grades
pub async fn list_grades(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Query(query): Query<GradeQuery>,
) -> ApiResult<Json<Vec<GradeView>>> {
    user.require_permission(&pool, VIEW_STUDENT_GRADES).await?;
    tracing::debug!("Listing grades for {}", user.0.username);

    let grades = grade_service::list_grades(&pool, &user.0, &query).await?;

    Ok(Json(grades))
}

/// GET /api/grades/{id}
pub async fn get_grade(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<GradeView>> {
    user.require_permission(&pool, VIEW_STUDENT_GRADES).await?;
    tracing::debug!("Getting grade: {}", id);

    let grade = grade_service::get_grade(&pool, &user.0, id).await?;

    Ok(Json(grade))
}

/// POST /api/grades
pub async fn create_grade(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Json(req): Json<CreateGrade>,
) -> ApiResult<Json<GradeView>> {
    user.require_permission(&pool, EDIT_STUDENT_GRADES).await?;
    tracing::info!(
        "Recording grade: student {} subject {}",
        req.student_id,
        req.subject_id
    );

    let grade = grade_service::create_grade(&pool, &user.0, req).await?;

    Ok(Json(grade))
}

/// PUT /api/grades/{id}
pub async fn update_grade(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateGrade>,
) -> ApiResult<Json<GradeView>> {
    user.require_permission(&pool, EDIT_STUDENT_GRADES).await?;
    tracing::info!("Updating grade: {}", id);

    let grade = grade_service::update_grade(&pool, &user.0, id, req).await?;

    Ok(Json(grade))
}

/// DELETE /api/grades/{id}
pub async fn delete_grade(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    user.require_permission(&pool, EDIT_STUDENT_GRADES).await?;
    tracing::info!("Deleting grade: {}", id);

    grade_service::delete_grade(&pool, &user.0, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
