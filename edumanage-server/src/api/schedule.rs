//! Schedule API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use edumanage_core::domain::permission::MANAGE_SCHEDULES;
use edumanage_core::domain::schedule::ScheduleView;
use edumanage_core::dto::schedule::{ScheduleForm, ScheduleQuery};
use sqlx::PgPool;

use crate::api::error::ApiResult;
use crate::auth::CurrentUser;
use crate::service::schedule_service;

/// GET /api/schedules
/// Filtered timetable ordered by day and start time
pub async fn list_schedules(
    State(pool): State<PgPool>,
    Query(query): Query<ScheduleQuery>,
) -> ApiResult<Json<Vec<ScheduleView>>> {
    tracing::debug!("Listing schedules");

    let entries = schedule_service::list_schedules(&pool, &query).await?;

    Ok(Json(entries))
}

/// GET /api/schedules/{id}
pub async fn get_schedule(
    State(pool): State<PgPool>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ScheduleView>> {
    tracing::debug!("Getting schedule: {}", id);

    let entry = schedule_service::get_schedule(&pool, id).await?;

    Ok(Json(entry))
}

/// POST /api/schedules
pub async fn create_schedule(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Json(form): Json<ScheduleForm>,
) -> ApiResult<Json<ScheduleView>> {
    user.require_permission(&pool, MANAGE_SCHEDULES).await?;
    tracing::info!("Creating schedule for class {}", form.class_label);

    let entry = schedule_service::create_schedule(&pool, form).await?;

    Ok(Json(entry))
}

/// PUT /api/schedules/{id}
pub async fn update_schedule(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(form): Json<ScheduleForm>,
) -> ApiResult<Json<ScheduleView>> {
    user.require_permission(&pool, MANAGE_SCHEDULES).await?;
    tracing::info!("Updating schedule: {}", id);

    let entry = schedule_service::update_schedule(&pool, id, form).await?;

    Ok(Json(entry))
}

/// DELETE /api/schedules/{id}
pub async fn delete_schedule(
    State(pool): State<PgPool>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    user.require_permission(&pool, MANAGE_SCHEDULES).await?;
    tracing::info!("Deleting schedule: {}", id);

    schedule_service::delete_schedule(&pool, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
