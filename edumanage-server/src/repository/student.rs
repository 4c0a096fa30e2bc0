//! Student Repository
//!
//! Handles all database operations related to student profiles.

use chrono::NaiveDate;
use edumanage_core::domain::student::Student;
use edumanage_core::dto::student::{StudentProfile, StudentQuery};
use sqlx::{PgExecutor, PgPool};

use super::{decode, like_pattern, non_blank};

const SELECT: &str = r#"
    SELECT id, user_id, nis, name, class_label, gender, birth_place, birth_date, address
    FROM students
"#;

const FILTER: &str = r#"
    WHERE ($1::text IS NULL OR name ILIKE $1 OR nis ILIKE $1)
      AND ($2::text IS NULL OR class_label = $2)
      AND ($3::text IS NULL OR gender = $3)
"#;

/// Create or replace the student profile of a user
pub async fn upsert_for_user(
    executor: impl PgExecutor<'_>,
    user_id: i64,
    profile: &StudentProfile,
) -> Result<Student, sqlx::Error> {
    let row = sqlx::query_as::<_, StudentRow>(
        r#"
        INSERT INTO students (user_id, nis, name, class_label, gender, birth_place, birth_date, address)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (user_id) DO UPDATE
        SET nis = EXCLUDED.nis, name = EXCLUDED.name, class_label = EXCLUDED.class_label,
            gender = EXCLUDED.gender, birth_place = EXCLUDED.birth_place,
            birth_date = EXCLUDED.birth_date, address = EXCLUDED.address
        RETURNING id, user_id, nis, name, class_label, gender, birth_place, birth_date, address
        "#,
    )
    .bind(user_id)
    .bind(profile.nis.trim())
    .bind(profile.name.trim())
    .bind(profile.class_label.trim())
    .bind(profile.gender.as_str())
    .bind(&profile.birth_place)
    .bind(profile.birth_date)
    .bind(&profile.address)
    .fetch_one(executor)
    .await?;

    row.try_into()
}

/// Update a student profile by ID
pub async fn update(
    pool: &PgPool,
    id: i64,
    profile: &StudentProfile,
) -> Result<Option<Student>, sqlx::Error> {
    let row = sqlx::query_as::<_, StudentRow>(
        r#"
        UPDATE students
        SET nis = $1, name = $2, class_label = $3, gender = $4,
            birth_place = $5, birth_date = $6, address = $7
        WHERE id = $8
        RETURNING id, user_id, nis, name, class_label, gender, birth_place, birth_date, address
        "#,
    )
    .bind(profile.nis.trim())
    .bind(profile.name.trim())
    .bind(profile.class_label.trim())
    .bind(profile.gender.as_str())
    .bind(&profile.birth_place)
    .bind(profile.birth_date)
    .bind(&profile.address)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Student::try_from).transpose()
}

/// Remove the student profile of a user, if any
pub async fn delete_for_user(executor: impl PgExecutor<'_>, user_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM students WHERE user_id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Find a student by ID
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Student>, sqlx::Error> {
    let row = sqlx::query_as::<_, StudentRow>(&format!("{} WHERE id = $1", SELECT))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(Student::try_from).transpose()
}

/// Find the student profile belonging to a user
pub async fn find_by_user_id(pool: &PgPool, user_id: i64) -> Result<Option<Student>, sqlx::Error> {
    let row = sqlx::query_as::<_, StudentRow>(&format!("{} WHERE user_id = $1", SELECT))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    row.map(Student::try_from).transpose()
}

/// One page of students matching a query, with the total match count
pub async fn list_page(
    pool: &PgPool,
    query: &StudentQuery,
    offset: i64,
    limit: i64,
) -> Result<(Vec<Student>, i64), sqlx::Error> {
    let pattern = like_pattern(query.search.as_deref());
    let class_label = non_blank(query.class_label.as_deref());
    let gender = query.gender.map(|g| g.as_str());

    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM students {}", FILTER))
        .bind(&pattern)
        .bind(class_label)
        .bind(gender)
        .fetch_one(pool)
        .await?;

    let rows = sqlx::query_as::<_, StudentRow>(&format!(
        "{} {} ORDER BY name, id LIMIT $4 OFFSET $5",
        SELECT, FILTER
    ))
    .bind(&pattern)
    .bind(class_label)
    .bind(gender)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let students = rows
        .into_iter()
        .map(Student::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((students, count))
}

/// Class labels that have at least one student
pub async fn class_labels(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT DISTINCT class_label FROM students ORDER BY class_label")
        .fetch_all(pool)
        .await
}

/// Delete a student together with its login account
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM users WHERE id = (SELECT user_id FROM students WHERE id = $1)")
            .bind(id)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}

// ============================================================================
// Internal helper types for database mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct StudentRow {
    id: i64,
    user_id: i64,
    nis: String,
    name: String,
    class_label: String,
    gender: String,
    birth_place: Option<String>,
    birth_date: Option<NaiveDate>,
    address: Option<String>,
}

impl TryFrom<StudentRow> for Student {
    type Error = sqlx::Error;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        Ok(Student {
            id: row.id,
            user_id: row.user_id,
            nis: row.nis,
            name: row.name,
            class_label: row.class_label,
            gender: decode(&row.gender)?,
            birth_place: row.birth_place,
            birth_date: row.birth_date,
            address: row.address,
        })
    }
}

/// Student columns of a `LEFT JOIN`, all nullable
#[derive(sqlx::FromRow)]
pub(super) struct StudentColumns {
    s_id: Option<i64>,
    s_nis: Option<String>,
    s_name: Option<String>,
    s_class_label: Option<String>,
    s_gender: Option<String>,
    s_birth_place: Option<String>,
    s_birth_date: Option<NaiveDate>,
    s_address: Option<String>,
}

impl StudentColumns {
    pub(super) fn into_student(self, user_id: i64) -> Result<Option<Student>, sqlx::Error> {
        let Some(id) = self.s_id else {
            return Ok(None);
        };

        Ok(Some(Student {
            id,
            user_id,
            nis: self.s_nis.unwrap_or_default(),
            name: self.s_name.unwrap_or_default(),
            class_label: self.s_class_label.unwrap_or_default(),
            gender: match self.s_gender {
                Some(gender) => decode(&gender)?,
                None => Default::default(),
            },
            birth_place: self.s_birth_place,
            birth_date: self.s_birth_date,
            address: self.s_address,
        }))
    }
}
