use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

use edumanage_core::domain::permission;
use edumanage_core::domain::role::Role;

use crate::auth::password;
use crate::config::BootstrapAdmin;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Permissions granted to each role at seeding time
fn role_permissions(role: Role) -> &'static [&'static str] {
    match role {
        Role::Admin => &[
            permission::VIEW_FINANCIAL_DATA,
            permission::MANAGE_FINANCIAL_DATA,
            permission::MANAGE_USERS,
            permission::MANAGE_SCHEDULES,
            permission::VIEW_STUDENT_GRADES,
            permission::EDIT_STUDENT_GRADES,
        ],
        Role::Teacher => &[
            permission::VIEW_STUDENT_GRADES,
            permission::EDIT_STUDENT_GRADES,
        ],
        Role::Student => &[permission::VIEW_OWN_GRADES],
    }
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Roles and permissions
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS roles (
            id SMALLINT PRIMARY KEY,
            name VARCHAR(50) NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS permissions (
            id SERIAL PRIMARY KEY,
            name VARCHAR(100) NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS role_permissions (
            role_id SMALLINT NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
            permission_id INTEGER NOT NULL REFERENCES permissions(id) ON DELETE CASCADE,
            PRIMARY KEY (role_id, permission_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Accounts
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            username VARCHAR(100) NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role_id SMALLINT NOT NULL REFERENCES roles(id),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            nis VARCHAR(50) NOT NULL UNIQUE,
            name VARCHAR(255) NOT NULL,
            class_label VARCHAR(50) NOT NULL,
            gender VARCHAR(20) NOT NULL CHECK (gender IN ('Laki-laki', 'Perempuan')),
            birth_place VARCHAR(255),
            birth_date DATE,
            address TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teachers (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            nip VARCHAR(50) NOT NULL UNIQUE,
            name VARCHAR(255) NOT NULL,
            specialization VARCHAR(255),
            gender VARCHAR(20) NOT NULL CHECK (gender IN ('Laki-laki', 'Perempuan')),
            birth_place VARCHAR(255),
            birth_date DATE,
            address TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Teaching
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS subjects (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            teacher_id BIGINT NOT NULL REFERENCES teachers(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id BIGSERIAL PRIMARY KEY,
            class_label VARCHAR(50) NOT NULL,
            subject_id BIGINT NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
            teacher_id BIGINT NOT NULL REFERENCES teachers(id) ON DELETE CASCADE,
            day VARCHAR(10) NOT NULL
                CHECK (day IN ('Senin', 'Selasa', 'Rabu', 'Kamis', 'Jumat', 'Sabtu')),
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            CHECK (end_time > start_time)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS grades (
            id BIGSERIAL PRIMARY KEY,
            student_id BIGINT NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            subject_id BIGINT NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
            score DOUBLE PRECISION NOT NULL CHECK (score >= 0 AND score <= 100),
            semester VARCHAR(10) NOT NULL CHECK (semester IN ('Ganjil', 'Genap')),
            academic_year VARCHAR(9) NOT NULL,
            UNIQUE (student_id, subject_id, semester, academic_year)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Finance
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS invoices (
            id BIGSERIAL PRIMARY KEY,
            student_id BIGINT NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            invoice_date DATE NOT NULL,
            due_date DATE NOT NULL,
            total_amount BIGINT NOT NULL CHECK (total_amount >= 0),
            amount_paid BIGINT NOT NULL DEFAULT 0 CHECK (amount_paid >= 0),
            status VARCHAR(20) NOT NULL
                CHECK (status IN ('Unpaid', 'Paid', 'Partially Paid', 'Overdue', 'Cancelled')),
            notes TEXT,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL,
            CHECK (amount_paid <= total_amount)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Sessions
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            token UUID PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            created_at TIMESTAMPTZ NOT NULL,
            expires_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS login_codes (
            code UUID PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            expires_at TIMESTAMPTZ NOT NULL,
            used BOOLEAN NOT NULL DEFAULT FALSE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for the common lookups
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_students_class ON students(class_label)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_subjects_teacher ON subjects(teacher_id)")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_schedules_teacher_day ON schedules(teacher_id, day)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_schedules_class_day ON schedules(class_label, day)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_grades_subject ON grades(subject_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_invoices_student ON invoices(student_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_expires ON sessions(expires_at)")
        .execute(pool)
        .await?;

    seed_roles_and_permissions(pool).await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

async fn seed_roles_and_permissions(pool: &PgPool) -> Result<(), sqlx::Error> {
    for role in Role::ALL {
        sqlx::query("INSERT INTO roles (id, name) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING")
            .bind(role.id())
            .bind(role.name())
            .execute(pool)
            .await?;
    }

    for name in permission::ALL {
        sqlx::query("INSERT INTO permissions (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
    }

    for role in Role::ALL {
        for name in role_permissions(role) {
            sqlx::query(
                r#"
                INSERT INTO role_permissions (role_id, permission_id)
                SELECT $1, id FROM permissions WHERE name = $2
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(role.id())
            .bind(*name)
            .execute(pool)
            .await?;
        }
    }

    Ok(())
}

/// Create the configured admin account unless an admin already exists
pub async fn bootstrap_admin(pool: &PgPool, admin: &BootstrapAdmin) -> anyhow::Result<()> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role_id = $1")
        .bind(Role::Admin.id())
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        tracing::debug!("Admin account present, skipping bootstrap");
        return Ok(());
    }

    let hash = password::hash_password(&admin.password)?;

    sqlx::query(
        r#"
        INSERT INTO users (username, password_hash, role_id, created_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (username) DO NOTHING
        "#,
    )
    .bind(&admin.username)
    .bind(hash)
    .bind(Role::Admin.id())
    .execute(pool)
    .await?;

    tracing::info!("Bootstrap admin account created: {}", admin.username);
    Ok(())
}

/// Delete expired sessions and used or expired login codes
pub async fn purge_expired_sessions(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let sessions = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
        .execute(pool)
        .await?;

    let codes = sqlx::query("DELETE FROM login_codes WHERE used OR expires_at <= NOW()")
        .execute(pool)
        .await?;

    Ok(sessions.rows_affected() + codes.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_financial_permissions_are_admin_only() {
        assert!(role_permissions(Role::Admin).contains(&permission::VIEW_FINANCIAL_DATA));
        assert!(!role_permissions(Role::Teacher).contains(&permission::VIEW_FINANCIAL_DATA));
        assert!(!role_permissions(Role::Student).contains(&permission::VIEW_FINANCIAL_DATA));
    }

    #[test]
    fn test_seeded_permissions_are_known() {
        for role in Role::ALL {
            for name in role_permissions(role) {
                assert!(permission::ALL.contains(name), "{name} is not a known permission");
            }
        }
    }
}
