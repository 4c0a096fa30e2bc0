//! Personal API Handlers
//!
//! Views scoped to the signed-in user.

use axum::{
    Json,
    extract::{Query, State},
};
use edumanage_core::domain::grade::GradeView;
use edumanage_core::domain::invoice::Invoice;
use edumanage_core::domain::permission::VIEW_OWN_GRADES;
use edumanage_core::domain::schedule::ScheduleView;
use edumanage_core::domain::subject::Subject;
use edumanage_core::dto::grade::GradeQuery;
use edumanage_core::dto::schedule::DayQuery;
use edumanage_core::dto::subject::SubjectQuery;
use sqlx::PgPool;

use crate::api::error::ApiResult;
use crate::auth::CurrentUser;
use crate::service::{
    grade_service, invoice_service, permission_service, schedule_service, subject_service,
    teacher_service,
};

/// GET /api/me/permissions
pub async fn permissions(
    State(pool): State<PgPool>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<String>>> {
    let names = permission_service::permissions_for(&pool, user.0.id).await?;
    Ok(Json(names))
}

/// GET /api/me/schedule
/// Lessons taught (teacher) or attended (student), optionally on one day
pub async fn schedule(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Query(query): Query<DayQuery>,
) -> ApiResult<Json<Vec<ScheduleView>>> {
    tracing::debug!("Personal schedule for {}", user.0.username);

    let entries = schedule_service::my_schedule(&pool, &user.0, query.day).await?;

    Ok(Json(entries))
}

/// GET /api/me/grades
pub async fn grades(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Query(query): Query<GradeQuery>,
) -> ApiResult<Json<Vec<GradeView>>> {
    user.require_permission(&pool, VIEW_OWN_GRADES).await?;
    tracing::debug!("Own grades for {}", user.0.username);

    let grades = grade_service::my_grades(&pool, &user.0, &query).await?;

    Ok(Json(grades))
}

/// GET /api/me/classes
/// Classes the signed-in teacher has lessons with
pub async fn classes(
    State(pool): State<PgPool>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<String>>> {
    let teacher = teacher_service::profile_of(&pool, &user.0).await?;
    let classes = schedule_service::classes_of_teacher(&pool, teacher.id).await?;

    Ok(Json(classes))
}

/// GET /api/me/subjects
/// Subjects owned by the signed-in teacher
pub async fn subjects(
    State(pool): State<PgPool>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<Subject>>> {
    let teacher = teacher_service::profile_of(&pool, &user.0).await?;
    let query = SubjectQuery {
        teacher_id: Some(teacher.id),
    };

    let subjects = subject_service::list_subjects(&pool, &query).await?;

    Ok(Json(subjects))
}

/// GET /api/me/invoices
pub async fn invoices(
    State(pool): State<PgPool>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<Invoice>>> {
    let invoices = invoice_service::my_invoices(&pool, &user.0).await?;
    Ok(Json(invoices))
}
