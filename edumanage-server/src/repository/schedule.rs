//! Schedule Repository
//!
//! Handles all database operations related to weekly lesson slots.

use chrono::NaiveTime;
use edumanage_core::domain::schedule::{Day, ScheduleEntry, ScheduleView};
use edumanage_core::dto::schedule::ScheduleForm;
use sqlx::PgPool;

use super::decode;

const SELECT: &str = r#"
    SELECT sc.id, sc.class_label, sc.subject_id, sc.teacher_id, sc.day,
           sc.start_time, sc.end_time,
           sb.name AS subject_name, t.name AS teacher_name
    FROM schedules sc
    JOIN subjects sb ON sb.id = sc.subject_id
    JOIN teachers t ON t.id = sc.teacher_id
"#;

/// Create a schedule entry taught by `teacher_id`
pub async fn insert(
    pool: &PgPool,
    form: &ScheduleForm,
    teacher_id: i64,
) -> Result<ScheduleView, sqlx::Error> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO schedules (class_label, subject_id, teacher_id, day, start_time, end_time)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(form.class_label.trim())
    .bind(form.subject_id)
    .bind(teacher_id)
    .bind(form.day.as_str())
    .bind(form.start_time)
    .bind(form.end_time)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Update a schedule entry
pub async fn update(
    pool: &PgPool,
    id: i64,
    form: &ScheduleForm,
    teacher_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE schedules
        SET class_label = $1, subject_id = $2, teacher_id = $3, day = $4,
            start_time = $5, end_time = $6
        WHERE id = $7
        "#,
    )
    .bind(form.class_label.trim())
    .bind(form.subject_id)
    .bind(teacher_id)
    .bind(form.day.as_str())
    .bind(form.start_time)
    .bind(form.end_time)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Find a schedule entry by ID
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<ScheduleView>, sqlx::Error> {
    let row = sqlx::query_as::<_, ScheduleRow>(&format!("{} WHERE sc.id = $1", SELECT))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(ScheduleView::try_from).transpose()
}

/// List every schedule entry
pub async fn list_all(pool: &PgPool) -> Result<Vec<ScheduleView>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ScheduleRow>(SELECT)
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(ScheduleView::try_from).collect()
}

/// Lessons taught by a teacher, optionally on one day
pub async fn list_by_teacher(
    pool: &PgPool,
    teacher_id: i64,
    day: Option<Day>,
) -> Result<Vec<ScheduleView>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ScheduleRow>(&format!(
        "{} WHERE sc.teacher_id = $1 AND ($2::text IS NULL OR sc.day = $2)",
        SELECT
    ))
    .bind(teacher_id)
    .bind(day.map(Day::as_str))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(ScheduleView::try_from).collect()
}

/// Lessons of a class, optionally on one day
pub async fn list_by_class(
    pool: &PgPool,
    class_label: &str,
    day: Option<Day>,
) -> Result<Vec<ScheduleView>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ScheduleRow>(&format!(
        "{} WHERE sc.class_label = $1 AND ($2::text IS NULL OR sc.day = $2)",
        SELECT
    ))
    .bind(class_label)
    .bind(day.map(Day::as_str))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(ScheduleView::try_from).collect()
}

/// Class labels a teacher has lessons with
pub async fn classes_of_teacher(pool: &PgPool, teacher_id: i64) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT DISTINCT class_label FROM schedules WHERE teacher_id = $1 ORDER BY class_label",
    )
    .bind(teacher_id)
    .fetch_all(pool)
    .await
}

/// Delete a schedule entry by ID
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// ============================================================================
// Internal helper types for database mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ScheduleRow {
    id: i64,
    class_label: String,
    subject_id: i64,
    teacher_id: i64,
    day: String,
    start_time: NaiveTime,
    end_time: NaiveTime,
    subject_name: String,
    teacher_name: String,
}

impl TryFrom<ScheduleRow> for ScheduleView {
    type Error = sqlx::Error;

    fn try_from(row: ScheduleRow) -> Result<Self, Self::Error> {
        Ok(ScheduleView {
            entry: ScheduleEntry {
                id: row.id,
                class_label: row.class_label,
                subject_id: row.subject_id,
                teacher_id: row.teacher_id,
                day: decode(&row.day)?,
                start_time: row.start_time,
                end_time: row.end_time,
            },
            subject_name: row.subject_name,
            teacher_name: row.teacher_name,
        })
    }
}
