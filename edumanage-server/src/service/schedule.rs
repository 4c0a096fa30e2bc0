//! Schedule Service
//!
//! Weekly lesson slots. A slot without an explicit teacher is taught by
//! the teacher who owns its subject.

use edumanage_core::domain::role::Role;
use edumanage_core::domain::schedule::{Day, ScheduleView};
use edumanage_core::dto::auth::SessionUser;
use edumanage_core::dto::schedule::{ScheduleForm, ScheduleQuery};
use edumanage_core::filter::{ListFilter, sort_schedule, unique_classes};
use sqlx::PgPool;

use crate::repository::{schedule_repository, subject_repository};
use crate::service::error::{Result, ServiceError};
use crate::service::{student_service, teacher_service};

/// List schedule entries matching a query, ordered through the week
pub async fn list_schedules(pool: &PgPool, query: &ScheduleQuery) -> Result<Vec<ScheduleView>> {
    let entries = schedule_repository::list_all(pool).await?;
    let mut entries = query.apply(entries);
    sort_schedule(&mut entries);
    Ok(entries)
}

/// Get a schedule entry by ID
pub async fn get_schedule(pool: &PgPool, id: i64) -> Result<ScheduleView> {
    let entry = schedule_repository::find_by_id(pool, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Schedule", id))?;

    Ok(entry)
}

/// Create a schedule entry
pub async fn create_schedule(pool: &PgPool, form: ScheduleForm) -> Result<ScheduleView> {
    validate_schedule(&form)?;
    let teacher_id = resolve_teacher(pool, &form).await?;

    let entry = schedule_repository::insert(pool, &form, teacher_id).await?;

    tracing::info!(
        "Schedule created: {} {} {} ({})",
        entry.entry.class_label,
        entry.entry.day,
        entry.subject_name,
        entry.entry.id
    );

    Ok(entry)
}

/// Replace a schedule entry
pub async fn update_schedule(pool: &PgPool, id: i64, form: ScheduleForm) -> Result<ScheduleView> {
    validate_schedule(&form)?;
    let teacher_id = resolve_teacher(pool, &form).await?;

    let updated = schedule_repository::update(pool, id, &form, teacher_id).await?;

    if !updated {
        return Err(ServiceError::not_found("Schedule", id));
    }

    tracing::info!("Schedule updated: {}", id);

    get_schedule(pool, id).await
}

/// Delete a schedule entry
pub async fn delete_schedule(pool: &PgPool, id: i64) -> Result<()> {
    let deleted = schedule_repository::delete(pool, id).await?;

    if !deleted {
        return Err(ServiceError::not_found("Schedule", id));
    }

    tracing::info!("Schedule deleted: {}", id);

    Ok(())
}

/// The signed-in user's own timetable: lessons taught for a teacher, the
/// class timetable for a student
pub async fn my_schedule(
    pool: &PgPool,
    user: &SessionUser,
    day: Option<Day>,
) -> Result<Vec<ScheduleView>> {
    let mut entries = match user.role {
        Role::Teacher => {
            let teacher = teacher_service::profile_of(pool, user).await?;
            schedule_repository::list_by_teacher(pool, teacher.id, day).await?
        }
        Role::Student => {
            let student = student_service::profile_of(pool, user).await?;
            schedule_repository::list_by_class(pool, &student.class_label, day).await?
        }
        Role::Admin => {
            return Err(ServiceError::Forbidden(
                "Admins have no personal schedule".to_string(),
            ));
        }
    };

    sort_schedule(&mut entries);
    Ok(entries)
}

/// Classes a teacher has lessons with
pub async fn classes_of_teacher(pool: &PgPool, teacher_id: i64) -> Result<Vec<String>> {
    let labels = schedule_repository::classes_of_teacher(pool, teacher_id).await?;
    Ok(unique_classes(labels.iter().map(String::as_str)))
}

/// The explicit teacher, or the owner of the subject
async fn resolve_teacher(pool: &PgPool, form: &ScheduleForm) -> Result<i64> {
    let subject = subject_repository::find_by_id(pool, form.subject_id)
        .await?
        .ok_or_else(|| {
            ServiceError::validation(format!("Subject {} does not exist", form.subject_id))
        })?;

    Ok(form.teacher_id.unwrap_or(subject.teacher_id))
}

/// Class and subject are required and a lesson must end after it starts
pub fn validate_schedule(form: &ScheduleForm) -> Result<()> {
    if form.class_label.trim().is_empty() {
        return Err(ServiceError::validation("Class is required"));
    }

    if form.subject_id <= 0 {
        return Err(ServiceError::validation("Subject is required"));
    }

    if form.end_time <= form.start_time {
        return Err(ServiceError::validation("End time must be after start time"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn form(start: (u32, u32), end: (u32, u32)) -> ScheduleForm {
        ScheduleForm {
            class_label: "XI-IPA-1".to_string(),
            subject_id: 3,
            teacher_id: None,
            day: Day::Tuesday,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        }
    }

    #[test]
    fn test_valid_schedule() {
        assert!(validate_schedule(&form((7, 30), (9, 0))).is_ok());
    }

    #[test]
    fn test_end_must_follow_start() {
        assert!(validate_schedule(&form((9, 0), (9, 0))).is_err());
        assert!(validate_schedule(&form((10, 0), (8, 0))).is_err());
    }

    #[test]
    fn test_class_is_required() {
        let mut f = form((7, 0), (8, 0));
        f.class_label = "  ".to_string();
        assert!(
            matches!(validate_schedule(&f), Err(ServiceError::ValidationError(msg)) if msg == "Class is required")
        );
    }

    #[test]
    fn test_subject_is_required() {
        let mut f = form((7, 0), (8, 0));
        f.subject_id = 0;
        assert!(validate_schedule(&f).is_err());
    }
}
