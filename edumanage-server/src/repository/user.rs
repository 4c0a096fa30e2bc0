//! User Repository
//!
//! Handles all database operations related to login accounts.

use chrono::{DateTime, Utc};
use edumanage_core::domain::role::Role;
use edumanage_core::domain::user::{User, UserView};
use sqlx::{PgExecutor, PgPool};

use super::student::StudentColumns;
use super::teacher::TeacherColumns;

/// Stored credentials for a username
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credentials {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role_id: i16,
}

/// Insert a user row
pub async fn insert(
    executor: impl PgExecutor<'_>,
    username: &str,
    password_hash: &str,
    role: Role,
) -> Result<User, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (username, password_hash, role_id, created_at)
        VALUES ($1, $2, $3, NOW())
        RETURNING id, username, role_id, created_at
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(role.id())
    .fetch_one(executor)
    .await?;

    row.try_into()
}

/// Update username and role, and the password hash when one is given
pub async fn update(
    executor: impl PgExecutor<'_>,
    id: i64,
    username: &str,
    password_hash: Option<&str>,
    role: Role,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET username = $1, password_hash = COALESCE($2, password_hash), role_id = $3
        WHERE id = $4
        "#,
    )
    .bind(username)
    .bind(password_hash)
    .bind(role.id())
    .bind(id)
    .execute(executor)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Find credentials by username
pub async fn find_credentials(
    pool: &PgPool,
    username: &str,
) -> Result<Option<Credentials>, sqlx::Error> {
    sqlx::query_as::<_, Credentials>(
        "SELECT id, username, password_hash, role_id FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Find a user by ID
pub async fn find_by_id(executor: impl PgExecutor<'_>, id: i64) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, username, role_id, created_at FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;

    row.map(User::try_from).transpose()
}

/// List all users joined with their role profile
pub async fn list_views(pool: &PgPool) -> Result<Vec<UserView>, sqlx::Error> {
    let rows = sqlx::query_as::<_, UserViewRow>(&format!("{} ORDER BY u.username", VIEW_SELECT))
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(UserView::try_from).collect()
}

/// Find one user joined with their role profile
pub async fn find_view_by_id(pool: &PgPool, id: i64) -> Result<Option<UserView>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserViewRow>(&format!("{} WHERE u.id = $1", VIEW_SELECT))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(UserView::try_from).transpose()
}

/// Delete a user; profiles and everything hanging off them cascade
pub async fn delete(executor: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Count users holding a role
/// Lock every account of a role for the rest of the transaction and return
/// their ids. Concurrent callers queue on the row locks, so a count taken from
/// the result stays valid until commit.
pub async fn lock_by_role(executor: impl PgExecutor<'_>, role: Role) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM users WHERE role_id = $1 ORDER BY id FOR UPDATE")
        .bind(role.id())
        .fetch_all(executor)
        .await
}

// ============================================================================
// Internal helper types for database mapping
// ============================================================================

const VIEW_SELECT: &str = r#"
    SELECT u.id, u.username, u.role_id, u.created_at,
           s.id AS s_id, s.nis AS s_nis, s.name AS s_name, s.class_label AS s_class_label,
           s.gender AS s_gender, s.birth_place AS s_birth_place,
           s.birth_date AS s_birth_date, s.address AS s_address,
           t.id AS t_id, t.nip AS t_nip, t.name AS t_name,
           t.specialization AS t_specialization, t.gender AS t_gender,
           t.birth_place AS t_birth_place, t.birth_date AS t_birth_date,
           t.address AS t_address
    FROM users u
    LEFT JOIN students s ON s.user_id = u.id
    LEFT JOIN teachers t ON t.user_id = u.id
"#;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    role_id: i16,
    created_at: DateTime<Utc>,
}

pub(super) fn role_from_id(id: i16) -> Result<Role, sqlx::Error> {
    Role::from_id(id).ok_or_else(|| sqlx::Error::Decode(format!("unknown role id {}", id).into()))
}

impl TryFrom<UserRow> for User {
    type Error = sqlx::Error;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            username: row.username,
            role: role_from_id(row.role_id)?,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserViewRow {
    #[sqlx(flatten)]
    user: UserRow,
    #[sqlx(flatten)]
    student: StudentColumns,
    #[sqlx(flatten)]
    teacher: TeacherColumns,
}

impl TryFrom<UserViewRow> for UserView {
    type Error = sqlx::Error;

    fn try_from(row: UserViewRow) -> Result<Self, Self::Error> {
        let user = User::try_from(row.user)?;
        let student = row.student.into_student(user.id)?;
        let teacher = row.teacher.into_teacher(user.id)?;

        Ok(UserView {
            user,
            student,
            teacher,
        })
    }
}
