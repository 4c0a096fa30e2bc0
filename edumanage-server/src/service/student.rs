//! Student Service

use edumanage_core::domain::role::Role;
use edumanage_core::domain::student::Student;
use edumanage_core::dto::auth::SessionUser;
use edumanage_core::dto::page::{PER_PAGE, Page, PageParams};
use edumanage_core::dto::student::{CreateStudent, StudentProfile, StudentQuery};
use edumanage_core::dto::user::CreateUser;
use edumanage_core::filter::unique_classes;
use sqlx::PgPool;

use crate::repository::student_repository;
use crate::service::error::{Result, ServiceError};
use crate::service::user_service;

/// Create a login account together with its student profile
pub async fn create_student(pool: &PgPool, req: CreateStudent) -> Result<Student> {
    let view = user_service::create_user(
        pool,
        CreateUser {
            username: req.username,
            password: req.password,
            role: Role::Student,
            student: Some(req.profile),
            teacher: None,
        },
    )
    .await?;

    view.student
        .ok_or_else(|| ServiceError::InternalError("Student profile was not stored".to_string()))
}

/// Get a student by ID
pub async fn get_student(pool: &PgPool, id: i64) -> Result<Student> {
    let student = student_repository::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Student", id))?;

    Ok(student)
}

/// The student profile of a signed-in student
pub async fn profile_of(pool: &PgPool, user: &SessionUser) -> Result<Student> {
    if user.role != Role::Student {
        return Err(ServiceError::Forbidden("Only students have a student profile".to_string()));
    }

    let student = student_repository::find_by_user_id(pool, user.id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Student profile not found".to_string()))?;

    Ok(student)
}

/// One page of students matching a query
pub async fn list_students(
    pool: &PgPool,
    query: &StudentQuery,
    params: PageParams,
) -> Result<Page<Student>> {
    let (data, count) =
        student_repository::list_page(pool, query, params.offset(), i64::from(PER_PAGE)).await?;

    Ok(Page {
        data,
        count,
        page: params.page(),
        per_page: PER_PAGE,
    })
}

/// Distinct class labels of all students
pub async fn list_classes(pool: &PgPool) -> Result<Vec<String>> {
    let labels = student_repository::class_labels(pool).await?;
    Ok(unique_classes(labels.iter().map(String::as_str)))
}

/// Update a student's profile
pub async fn update_student(pool: &PgPool, id: i64, profile: StudentProfile) -> Result<Student> {
    user_service::validate_student_profile(&profile)?;

    let student = student_repository::update(pool, id, &profile)
        .await?
        .ok_or_else(|| ServiceError::not_found("Student", id))?;

    tracing::info!("Student updated: {} ({})", student.name, student.id);

    Ok(student)
}

/// Delete a student and its account; grades and invoices cascade
pub async fn delete_student(pool: &PgPool, id: i64) -> Result<()> {
    let deleted = student_repository::delete(pool, id).await?;

    if !deleted {
        return Err(ServiceError::not_found("Student", id));
    }

    tracing::info!("Student deleted: {}", id);

    Ok(())
}
