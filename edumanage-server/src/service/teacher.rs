//! Teacher Service

use edumanage_core::domain::role::Role;
use edumanage_core::domain::teacher::Teacher;
use edumanage_core::dto::auth::SessionUser;
use edumanage_core::dto::teacher::{TeacherProfile, TeacherQuery};
use edumanage_core::filter::ListFilter;
use sqlx::PgPool;

use crate::repository::teacher_repository;
use crate::service::error::{Result, ServiceError};
use crate::service::user_service;

/// Get a teacher by ID
pub async fn get_teacher(pool: &PgPool, id: i64) -> Result<Teacher> {
    let teacher = teacher_repository::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Teacher", id))?;

    Ok(teacher)
}

/// The teacher profile of a signed-in teacher
pub async fn profile_of(pool: &PgPool, user: &SessionUser) -> Result<Teacher> {
    if user.role != Role::Teacher {
        return Err(ServiceError::Forbidden("Only teachers have a teacher profile".to_string()));
    }

    let teacher = teacher_repository::find_by_user_id(pool, user.id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Teacher profile not found".to_string()))?;

    Ok(teacher)
}

/// List teachers matching a query
pub async fn list_teachers(pool: &PgPool, query: &TeacherQuery) -> Result<Vec<Teacher>> {
    let teachers = teacher_repository::list_all(pool).await?;
    Ok(query.apply(teachers))
}

/// Update a teacher's profile
pub async fn update_teacher(pool: &PgPool, id: i64, profile: TeacherProfile) -> Result<Teacher> {
    user_service::validate_teacher_profile(&profile)?;

    let teacher = teacher_repository::update(pool, id, &profile)
        .await?
        .ok_or_else(|| ServiceError::not_found("Teacher", id))?;

    tracing::info!("Teacher updated: {} ({})", teacher.name, teacher.id);

    Ok(teacher)
}

/// Delete a teacher and its account; subjects and schedules cascade
pub async fn delete_teacher(pool: &PgPool, id: i64) -> Result<()> {
    let deleted = teacher_repository::delete(pool, id).await?;

    if !deleted {
        return Err(ServiceError::not_found("Teacher", id));
    }

    tracing::info!("Teacher deleted: {}", id);

    Ok(())
}
