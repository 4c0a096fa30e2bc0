//! Dashboard API Handlers

use axum::{
    Json,
    extract::State,
    response::Redirect,
};
use edumanage_core::domain::role::Role;
use edumanage_core::dto::dashboard::{AdminDashboard, StudentDashboard, TeacherDashboard};
use sqlx::PgPool;

use crate::api::error::ApiResult;
use crate::auth::CurrentUser;
use crate::service::dashboard_service;

/// GET /dashboard
/// Send the user to the dashboard of their role
pub async fn dashboard(user: CurrentUser) -> Redirect {
    Redirect::to(user.0.role.dashboard_path())
}

/// GET /dashboard/admin
pub async fn admin(
    State(pool): State<PgPool>,
    user: CurrentUser,
) -> ApiResult<Json<AdminDashboard>> {
    user.require_role(&[Role::Admin])?;
    tracing::debug!("Admin dashboard for {}", user.0.username);

    let dashboard = dashboard_service::admin_dashboard(&pool).await?;

    Ok(Json(dashboard))
}

/// GET /dashboard/guru
pub async fn teacher(
    State(pool): State<PgPool>,
    user: CurrentUser,
) -> ApiResult<Json<TeacherDashboard>> {
    user.require_role(&[Role::Teacher])?;
    tracing::debug!("Teacher dashboard for {}", user.0.username);

    let dashboard =
        dashboard_service::teacher_dashboard(&pool, &user.0, dashboard_service::today()).await?;

    Ok(Json(dashboard))
}

/// GET /dashboard/siswa
pub async fn student(
    State(pool): State<PgPool>,
    user: CurrentUser,
) -> ApiResult<Json<StudentDashboard>> {
    user.require_role(&[Role::Student])?;
    tracing::debug!("Student dashboard for {}", user.0.username);

    let dashboard =
        dashboard_service::student_dashboard(&pool, &user.0, dashboard_service::today()).await?;

    Ok(Json(dashboard))
}
