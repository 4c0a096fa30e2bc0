//! Dashboard Service
//!
//! One summary per role.

use chrono::{Datelike, Local};
use edumanage_core::domain::schedule::Day;
use edumanage_core::dto::auth::SessionUser;
use edumanage_core::dto::dashboard::{AdminDashboard, StudentDashboard, TeacherDashboard};
use edumanage_core::filter::{sort_schedule, unique_academic_years};
use sqlx::PgPool;

use crate::repository::{dashboard_repository, grade_repository, schedule_repository};
use crate::service::error::Result;
use crate::service::{schedule_service, student_service, teacher_service};

/// Today's school day in server local time; `None` on Sunday
pub fn today() -> Option<Day> {
    Day::from_weekday(Local::now().weekday())
}

/// Student, teacher, class and subject counts
pub async fn admin_dashboard(pool: &PgPool) -> Result<AdminDashboard> {
    let counts = dashboard_repository::admin_counts(pool).await?;
    Ok(counts)
}

/// Profile, today's lessons and taught classes of a teacher
pub async fn teacher_dashboard(
    pool: &PgPool,
    user: &SessionUser,
    today: Option<Day>,
) -> Result<TeacherDashboard> {
    let profile = teacher_service::profile_of(pool, user).await?;

    let mut today_schedule = match today {
        Some(day) => schedule_repository::list_by_teacher(pool, profile.id, Some(day)).await?,
        None => Vec::new(),
    };
    sort_schedule(&mut today_schedule);

    let classes = schedule_service::classes_of_teacher(pool, profile.id).await?;

    Ok(TeacherDashboard {
        profile,
        today,
        today_schedule,
        classes,
    })
}

/// Profile, today's class lessons and graded academic years of a student
pub async fn student_dashboard(
    pool: &PgPool,
    user: &SessionUser,
    today: Option<Day>,
) -> Result<StudentDashboard> {
    let profile = student_service::profile_of(pool, user).await?;

    let mut today_schedule = match today {
        Some(day) => {
            schedule_repository::list_by_class(pool, &profile.class_label, Some(day)).await?
        }
        None => Vec::new(),
    };
    sort_schedule(&mut today_schedule);

    let years = grade_repository::academic_years_of_student(pool, profile.id).await?;
    let academic_years = unique_academic_years(years.iter().map(String::as_str));

    Ok(StudentDashboard {
        profile,
        today,
        today_schedule,
        academic_years,
    })
}
