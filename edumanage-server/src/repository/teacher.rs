//! Teacher Repository
//!
//! Handles all database operations related to teacher profiles.

use chrono::NaiveDate;
use edumanage_core::domain::teacher::Teacher;
use edumanage_core::dto::teacher::TeacherProfile;
use sqlx::{PgExecutor, PgPool};

use super::decode;

const SELECT: &str = r#"
    SELECT id, user_id, nip, name, specialization, gender, birth_place, birth_date, address
    FROM teachers
"#;

/// Create or replace the teacher profile of a user
pub async fn upsert_for_user(
    executor: impl PgExecutor<'_>,
    user_id: i64,
    profile: &TeacherProfile,
) -> Result<Teacher, sqlx::Error> {
    let row = sqlx::query_as::<_, TeacherRow>(
        r#"
        INSERT INTO teachers (user_id, nip, name, specialization, gender, birth_place, birth_date, address)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (user_id) DO UPDATE
        SET nip = EXCLUDED.nip, name = EXCLUDED.name, specialization = EXCLUDED.specialization,
            gender = EXCLUDED.gender, birth_place = EXCLUDED.birth_place,
            birth_date = EXCLUDED.birth_date, address = EXCLUDED.address
        RETURNING id, user_id, nip, name, specialization, gender, birth_place, birth_date, address
        "#,
    )
    .bind(user_id)
    .bind(profile.nip.trim())
    .bind(profile.name.trim())
    .bind(&profile.specialization)
    .bind(profile.gender.as_str())
    .bind(&profile.birth_place)
    .bind(profile.birth_date)
    .bind(&profile.address)
    .fetch_one(executor)
    .await?;

    row.try_into()
}

/// Update a teacher profile by ID
pub async fn update(
    pool: &PgPool,
    id: i64,
    profile: &TeacherProfile,
) -> Result<Option<Teacher>, sqlx::Error> {
    let row = sqlx::query_as::<_, TeacherRow>(
        r#"
        UPDATE teachers
        SET nip = $1, name = $2, specialization = $3, gender = $4,
            birth_place = $5, birth_date = $6, address = $7
        WHERE id = $8
        RETURNING id, user_id, nip, name, specialization, gender, birth_place, birth_date, address
        "#,
    )
    .bind(profile.nip.trim())
    .bind(profile.name.trim())
    .bind(&profile.specialization)
    .bind(profile.gender.as_str())
    .bind(&profile.birth_place)
    .bind(profile.birth_date)
    .bind(&profile.address)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Teacher::try_from).transpose()
}

/// Remove the teacher profile of a user, if any
pub async fn delete_for_user(executor: impl PgExecutor<'_>, user_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM teachers WHERE user_id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Find a teacher by ID
pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Teacher>, sqlx::Error> {
    let row = sqlx::query_as::<_, TeacherRow>(&format!("{} WHERE id = $1", SELECT))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(Teacher::try_from).transpose()
}

/// Find the teacher profile belonging to a user
pub async fn find_by_user_id(pool: &PgPool, user_id: i64) -> Result<Option<Teacher>, sqlx::Error> {
    let row = sqlx::query_as::<_, TeacherRow>(&format!("{} WHERE user_id = $1", SELECT))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    row.map(Teacher::try_from).transpose()
}

/// List all teachers
pub async fn list_all(pool: &PgPool) -> Result<Vec<Teacher>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TeacherRow>(&format!("{} ORDER BY name", SELECT))
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(Teacher::try_from).collect()
}

/// Delete a teacher together with its login account
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM users WHERE id = (SELECT user_id FROM teachers WHERE id = $1)")
            .bind(id)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}

// ============================================================================
// Internal helper types for database mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct TeacherRow {
    id: i64,
    user_id: i64,
    nip: String,
    name: String,
    specialization: Option<String>,
    gender: String,
    birth_place: Option<String>,
    birth_date: Option<NaiveDate>,
    address: Option<String>,
}

impl TryFrom<TeacherRow> for Teacher {
    type Error = sqlx::Error;

    fn try_from(row: TeacherRow) -> Result<Self, Self::Error> {
        Ok(Teacher {
            id: row.id,
            user_id: row.user_id,
            nip: row.nip,
            name: row.name,
            specialization: row.specialization,
            gender: decode(&row.gender)?,
            birth_place: row.birth_place,
            birth_date: row.birth_date,
            address: row.address,
        })
    }
}

/// Teacher columns of a `LEFT JOIN`, all nullable
#[derive(sqlx::FromRow)]
pub(super) struct TeacherColumns {
    t_id: Option<i64>,
    t_nip: Option<String>,
    t_name: Option<String>,
    t_specialization: Option<String>,
    t_gender: Option<String>,
    t_birth_place: Option<String>,
    t_birth_date: Option<NaiveDate>,
    t_address: Option<String>,
}

impl TeacherColumns {
    pub(super) fn into_teacher(self, user_id: i64) -> Result<Option<Teacher>, sqlx::Error> {
        let Some(id) = self.t_id else {
            return Ok(None);
        };

        Ok(Some(Teacher {
            id,
            user_id,
            nip: self.t_nip.unwrap_or_default(),
            name: self.t_name.unwrap_or_default(),
            specialization: self.t_specialization,
            gender: match self.t_gender {
                Some(gender) => decode(&gender)?,
                None => Default::default(),
            },
            birth_place: self.t_birth_place,
            birth_date: self.t_birth_date,
            address: self.t_address,
        }))
    }
}
