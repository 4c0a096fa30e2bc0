//! User Service
//!
//! Accounts together with their role profile. A user and its student or
//! teacher profile are always written in one transaction.

use edumanage_core::domain::role::Role;
use edumanage_core::domain::user::UserView;
use edumanage_core::dto::auth::SessionUser;
use edumanage_core::dto::page::{Page, PageParams};
use edumanage_core::dto::student::StudentProfile;
use edumanage_core::dto::teacher::TeacherProfile;
use edumanage_core::dto::user::{CreateUser, UpdateUser, UserQuery};
use edumanage_core::filter::{ListFilter, paginate};
use sqlx::PgPool;

use crate::auth::password;
use crate::repository::{student_repository, teacher_repository, user_repository};
use crate::service::error::{Result, ServiceError};

/// Create a user and its role profile
pub async fn create_user(pool: &PgPool, req: CreateUser) -> Result<UserView> {
    validate_account(&req.username, Some(&req.password))?;
    validate_profile(req.role, req.student.as_ref(), req.teacher.as_ref())?;

    let hash = hash(&req.password)?;

    let mut tx = pool.begin().await?;

    let user = user_repository::insert(&mut *tx, req.username.trim(), &hash, req.role).await?;

    let mut view = UserView {
        user,
        student: None,
        teacher: None,
    };

    match (req.role, &req.student, &req.teacher) {
        (Role::Student, Some(profile), _) => {
            view.student =
                Some(student_repository::upsert_for_user(&mut *tx, view.user.id, profile).await?);
        }
        (Role::Teacher, _, Some(profile)) => {
            view.teacher =
                Some(teacher_repository::upsert_for_user(&mut *tx, view.user.id, profile).await?);
        }
        _ => {}
    }

    tx.commit().await?;

    tracing::info!(
        "User created: {} ({}, id {})",
        view.user.username,
        view.user.role,
        view.user.id
    );

    Ok(view)
}

/// Update a user, its password when given, and its role profile.
///
/// Changing the role replaces the profile: the profile of the old role is
/// removed and the new one written.
pub async fn update_user(pool: &PgPool, id: i64, req: UpdateUser) -> Result<UserView> {
    let new_password = req.password.as_deref().filter(|p| !p.is_empty());
    validate_account(&req.username, None)?;
    validate_profile(req.role, req.student.as_ref(), req.teacher.as_ref())?;

    let hash = new_password.map(hash).transpose()?;

    let mut tx = pool.begin().await?;

    let admins = user_repository::lock_by_role(&mut *tx, Role::Admin).await?;

    let existing = user_repository::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User", id))?;

    if existing.role == Role::Admin && req.role != Role::Admin {
        ensure_other_admin(&admins, id)?;
    }

    user_repository::update(&mut *tx, id, req.username.trim(), hash.as_deref(), req.role).await?;

    match req.role {
        Role::Student => {
            teacher_repository::delete_for_user(&mut *tx, id).await?;
            if let Some(profile) = &req.student {
                student_repository::upsert_for_user(&mut *tx, id, profile).await?;
            }
        }
        Role::Teacher => {
            student_repository::delete_for_user(&mut *tx, id).await?;
            if let Some(profile) = &req.teacher {
                teacher_repository::upsert_for_user(&mut *tx, id, profile).await?;
            }
        }
        Role::Admin => {
            student_repository::delete_for_user(&mut *tx, id).await?;
            teacher_repository::delete_for_user(&mut *tx, id).await?;
        }
    }

    tx.commit().await?;

    tracing::info!("User updated: {} ({})", req.username.trim(), id);

    get_user(pool, id).await
}

/// Get a user with its profile
pub async fn get_user(pool: &PgPool, id: i64) -> Result<UserView> {
    let view = user_repository::find_view_by_id(pool, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User", id))?;

    Ok(view)
}

/// List users matching a query, one page at a time
pub async fn list_users(pool: &PgPool, query: &UserQuery, page: PageParams) -> Result<Page<UserView>> {
    let users = user_repository::list_views(pool).await?;
    Ok(paginate(query.apply(users), page))
}

/// Delete a user; the profile and everything depending on it cascades
pub async fn delete_user(pool: &PgPool, acting: &SessionUser, id: i64) -> Result<()> {
    if acting.id == id {
        return Err(ServiceError::validation("You cannot delete your own account"));
    }

    let mut tx = pool.begin().await?;

    let admins = user_repository::lock_by_role(&mut *tx, Role::Admin).await?;
    if admins.contains(&id) {
        ensure_other_admin(&admins, id)?;
    }

    let deleted = user_repository::delete(&mut *tx, id).await?;

    if !deleted {
        return Err(ServiceError::not_found("User", id));
    }

    tx.commit().await?;

    tracing::info!("User deleted: {}", id);

    Ok(())
}

/// The locked admin set must still hold an admin once `id` leaves it
fn ensure_other_admin(admins: &[i64], id: i64) -> Result<()> {
    if admins.iter().any(|&admin| admin != id) {
        Ok(())
    } else {
        Err(ServiceError::validation("Cannot remove the last admin"))
    }
}

fn hash(password: &str) -> Result<String> {
    password::hash_password(password).map_err(|e| ServiceError::InternalError(e.to_string()))
}

// ============================================================================
// Validation
// ============================================================================

fn validate_account(username: &str, password: Option<&str>) -> Result<()> {
    if username.trim().is_empty() {
        return Err(ServiceError::validation("Username is required"));
    }

    if username.trim().len() > 100 {
        return Err(ServiceError::validation("Username must be at most 100 characters"));
    }

    if password.is_some_and(str::is_empty) {
        return Err(ServiceError::validation("Password is required"));
    }

    Ok(())
}

fn validate_profile(
    role: Role,
    student: Option<&StudentProfile>,
    teacher: Option<&TeacherProfile>,
) -> Result<()> {
    match role {
        Role::Student => {
            let profile = student
                .ok_or_else(|| ServiceError::validation("Student profile is required"))?;
            validate_student_profile(profile)
        }
        Role::Teacher => {
            let profile = teacher
                .ok_or_else(|| ServiceError::validation("Teacher profile is required"))?;
            validate_teacher_profile(profile)
        }
        Role::Admin => Ok(()),
    }
}

/// NIS, name and class are required
pub fn validate_student_profile(profile: &StudentProfile) -> Result<()> {
    if profile.nis.trim().is_empty() {
        return Err(ServiceError::validation("NIS is required"));
    }
    if profile.name.trim().is_empty() {
        return Err(ServiceError::validation("Student name is required"));
    }
    if profile.class_label.trim().is_empty() {
        return Err(ServiceError::validation("Class is required"));
    }
    Ok(())
}

/// NIP and name are required
pub fn validate_teacher_profile(profile: &TeacherProfile) -> Result<()> {
    if profile.nip.trim().is_empty() {
        return Err(ServiceError::validation("NIP is required"));
    }
    if profile.name.trim().is_empty() {
        return Err(ServiceError::validation("Teacher name is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_profile() -> StudentProfile {
        StudentProfile {
            nis: "2024001".to_string(),
            name: "Budi Santoso".to_string(),
            class_label: "X-A".to_string(),
            ..Default::default()
        }
    }

    fn teacher_profile() -> TeacherProfile {
        TeacherProfile {
            nip: "198001012005011001".to_string(),
            name: "Sari Dewi".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_last_admin_cannot_leave() {
        assert!(ensure_other_admin(&[1, 2], 2).is_ok());
        assert!(matches!(
            ensure_other_admin(&[2], 2),
            Err(ServiceError::ValidationError(_))
        ));
        // After a concurrent demotion committed, the locked set only holds the caller
        assert!(ensure_other_admin(&[], 2).is_err());
    }

    #[test]
    fn test_validate_account() {
        assert!(validate_account("budi", Some("rahasia")).is_ok());
        assert!(validate_account("budi", None).is_ok());
        assert!(validate_account("   ", Some("rahasia")).is_err());
        assert!(validate_account("budi", Some("")).is_err());
        assert!(validate_account(&"x".repeat(101), None).is_err());
    }

    #[test]
    fn test_student_requires_profile() {
        assert!(validate_profile(Role::Student, None, None).is_err());
        assert!(validate_profile(Role::Student, Some(&student_profile()), None).is_ok());
        // A teacher profile does not stand in for a student one
        assert!(validate_profile(Role::Student, None, Some(&teacher_profile())).is_err());
    }

    #[test]
    fn test_teacher_requires_profile() {
        assert!(validate_profile(Role::Teacher, None, None).is_err());
        assert!(validate_profile(Role::Teacher, None, Some(&teacher_profile())).is_ok());
    }

    #[test]
    fn test_admin_needs_no_profile() {
        assert!(validate_profile(Role::Admin, None, None).is_ok());
    }

    #[test]
    fn test_validate_student_profile_fields() {
        let mut profile = student_profile();
        profile.class_label = " ".to_string();
        assert!(
            matches!(validate_student_profile(&profile), Err(ServiceError::ValidationError(msg)) if msg == "Class is required")
        );

        let mut profile = student_profile();
        profile.nis.clear();
        assert!(validate_student_profile(&profile).is_err());
    }

    #[test]
    fn test_validate_teacher_profile_fields() {
        let mut profile = teacher_profile();
        profile.name.clear();
        assert!(validate_teacher_profile(&profile).is_err());
        assert!(validate_teacher_profile(&teacher_profile()).is_ok());
    }
}
