//! Grade Repository
//!
//! Handles all database operations related to grades.

use edumanage_core::domain::grade::{Grade, GradeView};
use edumanage_core::dto::grade::{CreateGrade, UpdateGrade};
use sqlx::PgPool;

use super::decode;

const SELECT: &str = r#"
    SELECT g.id, g.student_id, g.subject_id, g.score, g.semester, g.academic_year,
           st.name AS student_name, st.nis AS student_nis, st.class_label,
           sb.name AS subject_name, sb.teacher_id
    FROM grades g
    JOIN students st ON st.id = g.student_id
    JOIN subjects sb ON sb.id = g.subject_id
"#;

const ORDER: &str = "ORDER BY g.academic_year DESC, g.semester, sb.name, st.name";

/// Record a grade
pub async fn insert(pool: &PgPool, req: &CreateGrade) -> Result<GradeView, sqlx::Error> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO grades (student_id, subject_id, score, semester, academic_year)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(req.student_id)
    .bind(req.subject_id)
    .bind(req.score)
    .bind(req.semester.as_str())
    .bind(req.academic_year.trim())
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
}

/// Change score, semester and academic year of a grade
pub async fn update(pool: &PgPool, id: i64, req: &UpdateGrade) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE grades SET score = $1, semester = $2, academic_year = $3 WHERE id = $4",
    )
    .bind(req.score)
    .bind(req.semester.as_str())
    .bind(req.academic_year.trim())
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Find a grade by ID
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<GradeView>, sqlx::Error> {
    let row = sqlx::query_as::<_, GradeRow>(&format!("{} WHERE g.id = $1", SELECT))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(GradeView::try_from).transpose()
}

/// List every grade
pub async fn list_all(pool: &PgPool) -> Result<Vec<GradeView>, sqlx::Error> {
    let rows = sqlx::query_as::<_, GradeRow>(&format!("{} {}", SELECT, ORDER))
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(GradeView::try_from).collect()
}

/// Grades in subjects owned by a teacher
pub async fn list_by_teacher(pool: &PgPool, teacher_id: i64) -> Result<Vec<GradeView>, sqlx::Error> {
    let rows =
        sqlx::query_as::<_, GradeRow>(&format!("{} WHERE sb.teacher_id = $1 {}", SELECT, ORDER))
            .bind(teacher_id)
            .fetch_all(pool)
            .await?;

    rows.into_iter().map(GradeView::try_from).collect()
}

/// Grades of one student
pub async fn list_by_student(pool: &PgPool, student_id: i64) -> Result<Vec<GradeView>, sqlx::Error> {
    let rows =
        sqlx::query_as::<_, GradeRow>(&format!("{} WHERE g.student_id = $1 {}", SELECT, ORDER))
            .bind(student_id)
            .fetch_all(pool)
            .await?;

    rows.into_iter().map(GradeView::try_from).collect()
}

/// Academic years in which a student has grades
pub async fn academic_years_of_student(
    pool: &PgPool,
    student_id: i64,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT DISTINCT academic_year FROM grades WHERE student_id = $1")
        .bind(student_id)
        .fetch_all(pool)
        .await
}

/// Delete a grade by ID
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM grades WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// ============================================================================
// Internal helper types for database mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct GradeRow {
    id: i64,
    student_id: i64,
    subject_id: i64,
    score: f64,
    semester: String,
    academic_year: String,
    student_name: String,
    student_nis: String,
    class_label: String,
    subject_name: String,
    teacher_id: i64,
}

impl TryFrom<GradeRow> for GradeView {
    type Error = sqlx::Error;

    fn try_from(row: GradeRow) -> Result<Self, Self::Error> {
        Ok(GradeView {
            grade: Grade {
                id: row.id,
                student_id: row.student_id,
                subject_id: row.subject_id,
                score: row.score,
                semester: decode(&row.semester)?,
                academic_year: row.academic_year,
            },
            student_name: row.student_name,
            student_nis: row.student_nis,
            class_label: row.class_label,
            subject_name: row.subject_name,
            teacher_id: row.teacher_id,
        })
    }
}
