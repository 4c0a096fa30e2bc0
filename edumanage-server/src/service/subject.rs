//! Subject Service

use edumanage_core::domain::subject::Subject;
use edumanage_core::dto::subject::{CreateSubject, SubjectQuery};
use sqlx::PgPool;

use crate::repository::{subject_repository, teacher_repository};
use crate::service::error::{Result, ServiceError};

/// List subjects, optionally of one teacher
pub async fn list_subjects(pool: &PgPool, query: &SubjectQuery) -> Result<Vec<Subject>> {
    let subjects = subject_repository::list(pool, query.teacher_id).await?;
    Ok(subjects)
}

/// Create a subject owned by an existing teacher
pub async fn create_subject(pool: &PgPool, req: CreateSubject) -> Result<Subject> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(ServiceError::validation("Subject name is required"));
    }

    if teacher_repository::find_by_id(pool, req.teacher_id).await?.is_none() {
        return Err(ServiceError::validation(format!(
            "Teacher {} does not exist",
            req.teacher_id
        )));
    }

    let subject = subject_repository::insert(pool, name, req.teacher_id).await?;

    tracing::info!("Subject created: {} ({})", subject.name, subject.id);

    Ok(subject)
}

/// Delete a subject; its schedules and grades cascade
pub async fn delete_subject(pool: &PgPool, id: i64) -> Result<()> {
    let deleted = subject_repository::delete(pool, id).await?;

    if !deleted {
        return Err(ServiceError::not_found("Subject", id));
    }

    tracing::info!("Subject deleted: {}", id);

    Ok(())
}
