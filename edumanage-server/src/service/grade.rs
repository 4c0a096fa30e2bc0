//! Grade Service
//!
//! Admins manage every grade. Teachers see and change only grades in the
//! subjects they own. Students read their own grades.

use edumanage_core::domain::grade::{GradeView, is_valid_academic_year, is_valid_score};
use edumanage_core::domain::role::Role;
use edumanage_core::dto::auth::SessionUser;
use edumanage_core::dto::grade::{CreateGrade, GradeQuery, UpdateGrade};
use edumanage_core::filter::ListFilter;
use sqlx::PgPool;

use crate::repository::{grade_repository, subject_repository};
use crate::service::error::{Result, ServiceError};
use crate::service::{student_service, teacher_service};

/// List grades visible to the user
pub async fn list_grades(
    pool: &PgPool,
    user: &SessionUser,
    query: &GradeQuery,
) -> Result<Vec<GradeView>> {
    let grades = match teacher_scope(pool, user).await? {
        Some(teacher_id) => grade_repository::list_by_teacher(pool, teacher_id).await?,
        None => grade_repository::list_all(pool).await?,
    };

    Ok(query.apply(grades))
}

/// The signed-in student's own grades
pub async fn my_grades(
    pool: &PgPool,
    user: &SessionUser,
    query: &GradeQuery,
) -> Result<Vec<GradeView>> {
    let student = student_service::profile_of(pool, user).await?;
    let grades = grade_repository::list_by_student(pool, student.id).await?;
    Ok(query.apply(grades))
}

/// Get a grade the user may see
pub async fn get_grade(pool: &PgPool, user: &SessionUser, id: i64) -> Result<GradeView> {
    let scope = teacher_scope(pool, user).await?;
    let grade = find(pool, id).await?;
    ensure_owner(scope, grade.teacher_id)?;
    Ok(grade)
}

/// Record a grade
pub async fn create_grade(pool: &PgPool, user: &SessionUser, req: CreateGrade) -> Result<GradeView> {
    validate_grade(req.score, &req.academic_year)?;

    let scope = teacher_scope(pool, user).await?;
    let subject = subject_repository::find_by_id(pool, req.subject_id)
        .await?
        .ok_or_else(|| {
            ServiceError::validation(format!("Subject {} does not exist", req.subject_id))
        })?;
    ensure_owner(scope, subject.teacher_id)?;

    let grade = grade_repository::insert(pool, &req).await?;

    tracing::info!(
        "Grade recorded: {} {} {} = {}",
        grade.student_name,
        grade.subject_name,
        grade.grade.academic_year,
        grade.grade.score
    );

    Ok(grade)
}

/// Change score, semester and academic year of a grade
pub async fn update_grade(
    pool: &PgPool,
    user: &SessionUser,
    id: i64,
    req: UpdateGrade,
) -> Result<GradeView> {
    validate_grade(req.score, &req.academic_year)?;

    let scope = teacher_scope(pool, user).await?;
    let existing = find(pool, id).await?;
    ensure_owner(scope, existing.teacher_id)?;

    if !grade_repository::update(pool, id, &req).await? {
        return Err(ServiceError::not_found("Grade", id));
    }

    tracing::info!("Grade updated: {}", id);

    find(pool, id).await
}

/// Delete a grade
pub async fn delete_grade(pool: &PgPool, user: &SessionUser, id: i64) -> Result<()> {
    let scope = teacher_scope(pool, user).await?;
    let existing = find(pool, id).await?;
    ensure_owner(scope, existing.teacher_id)?;

    if !grade_repository::delete(pool, id).await? {
        return Err(ServiceError::not_found("Grade", id));
    }

    tracing::info!("Grade deleted: {}", id);

    Ok(())
}

async fn find(pool: &PgPool, id: i64) -> Result<GradeView> {
    grade_repository::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Grade", id))
}

/// `None` for admins (no restriction), the teacher's ID for teachers.
/// Students manage no grades.
async fn teacher_scope(pool: &PgPool, user: &SessionUser) -> Result<Option<i64>> {
    match user.role {
        Role::Admin => Ok(None),
        Role::Teacher => Ok(Some(teacher_service::profile_of(pool, user).await?.id)),
        Role::Student => Err(ServiceError::Forbidden(
            "Students cannot manage grades".to_string(),
        )),
    }
}

fn ensure_owner(scope: Option<i64>, owner_teacher_id: i64) -> Result<()> {
    match scope {
        Some(teacher_id) if teacher_id != owner_teacher_id => Err(ServiceError::Forbidden(
            "Grade belongs to another teacher's subject".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Score in `[0, 100]` and an academic year of the form `YYYY/YYYY`
pub fn validate_grade(score: f64, academic_year: &str) -> Result<()> {
    if !is_valid_score(score) {
        return Err(ServiceError::validation("Score must be between 0 and 100"));
    }

    if !is_valid_academic_year(academic_year.trim()) {
        return Err(ServiceError::validation(
            "Academic year must look like 2023/2024",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_grade_bounds() {
        assert!(validate_grade(0.0, "2023/2024").is_ok());
        assert!(validate_grade(100.0, "2023/2024").is_ok());
        assert!(validate_grade(85.5, " 2024/2025 ").is_ok());
        assert!(validate_grade(-0.5, "2023/2024").is_err());
        assert!(validate_grade(100.1, "2023/2024").is_err());
        assert!(validate_grade(f64::NAN, "2023/2024").is_err());
    }

    #[test]
    fn test_validate_grade_academic_year() {
        assert!(validate_grade(70.0, "2023/2025").is_err());
        assert!(validate_grade(70.0, "2023").is_err());
    }

    #[test]
    fn test_ensure_owner() {
        assert!(ensure_owner(None, 4).is_ok());
        assert!(ensure_owner(Some(4), 4).is_ok());
        assert!(matches!(ensure_owner(Some(2), 4), Err(ServiceError::Forbidden(_))));
    }
}
