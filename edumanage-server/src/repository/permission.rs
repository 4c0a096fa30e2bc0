//! Permission Repository

use sqlx::PgPool;

/// Names of every permission granted to a user through their role
pub async fn names_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT p.name
        FROM users u
        JOIN role_permissions rp ON rp.role_id = u.role_id
        JOIN permissions p ON p.id = rp.permission_id
        WHERE u.id = $1
        ORDER BY p.name
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Whether a user's role carries a permission
pub async fn user_has(pool: &PgPool, user_id: i64, name: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM users u
            JOIN role_permissions rp ON rp.role_id = u.role_id
            JOIN permissions p ON p.id = rp.permission_id
            WHERE u.id = $1 AND p.name = $2
        )
        "#,
    )
    .bind(user_id)
    .bind(name)
    .fetch_one(pool)
    .await
}
