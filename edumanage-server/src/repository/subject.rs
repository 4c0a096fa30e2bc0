//! Subject Repository

use edumanage_core::domain::subject::Subject;
use sqlx::PgPool;

const SELECT: &str = r#"
    SELECT sb.id, sb.name, sb.teacher_id, t.name AS teacher_name
    FROM subjects sb
    JOIN teachers t ON t.id = sb.teacher_id
"#;

/// Create a subject owned by a teacher
pub async fn insert(pool: &PgPool, name: &str, teacher_id: i64) -> Result<Subject, sqlx::Error> {
    let id: i64 =
        sqlx::query_scalar("INSERT INTO subjects (name, teacher_id) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(teacher_id)
            .fetch_one(pool)
            .await?;

    let subject = find_by_id(pool, id).await?.ok_or(sqlx::Error::RowNotFound)?;
    Ok(subject)
}

/// Find a subject by ID
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Subject>, sqlx::Error> {
    let row = sqlx::query_as::<_, SubjectRow>(&format!("{} WHERE sb.id = $1", SELECT))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.into()))
}

/// List subjects, optionally only those of one teacher
pub async fn list(pool: &PgPool, teacher_id: Option<i64>) -> Result<Vec<Subject>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SubjectRow>(&format!(
        "{} WHERE ($1::bigint IS NULL OR sb.teacher_id = $1) ORDER BY sb.name",
        SELECT
    ))
    .bind(teacher_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// Delete a subject; its schedules and grades cascade
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// ============================================================================
// Internal helper types for database mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct SubjectRow {
    id: i64,
    name: String,
    teacher_id: i64,
    teacher_name: String,
}

impl From<SubjectRow> for Subject {
    fn from(row: SubjectRow) -> Self {
        Subject {
            id: row.id,
            name: row.name,
            teacher_id: row.teacher_id,
            teacher_name: Some(row.teacher_name),
        }
    }
}
