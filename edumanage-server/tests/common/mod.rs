//! Shared setup for database tests
//!
//! Tests run against the database named by `DATABASE_URL` and are skipped
//! when it is unset.

#![allow(dead_code)]

use chrono::NaiveTime;
use edumanage_core::domain::role::Role;
use edumanage_core::domain::student::Student;
use edumanage_core::domain::user::UserView;
use edumanage_core::dto::auth::SessionUser;
use edumanage_core::dto::student::{CreateStudent, StudentProfile};
use edumanage_core::dto::teacher::TeacherProfile;
use edumanage_core::dto::user::CreateUser;
use edumanage_server::db;
use edumanage_server::service::{student_service, user_service};
use sqlx::PgPool;
use tokio::sync::Mutex;
use uuid::Uuid;

static MIGRATED: Mutex<bool> = Mutex::const_new(false);

/// Connect and migrate, or `None` when no database is configured
pub async fn pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping database test");
        return None;
    };

    let pool = db::create_pool(&url).await.expect("connect to DATABASE_URL");

    let mut migrated = MIGRATED.lock().await;
    if !*migrated {
        db::run_migrations(&pool).await.expect("run migrations");
        *migrated = true;
    }

    Some(pool)
}

/// A value no other test run will produce
pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..12])
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// An acting admin that is not stored in the database
pub fn acting_admin() -> SessionUser {
    SessionUser {
        id: -1,
        username: "test-admin".to_string(),
        role: Role::Admin,
    }
}

pub fn session_user(view: &UserView) -> SessionUser {
    SessionUser {
        id: view.user.id,
        username: view.user.username.clone(),
        role: view.user.role,
    }
}

pub fn student_profile(nis: &str, class_label: &str) -> StudentProfile {
    StudentProfile {
        nis: nis.to_string(),
        name: format!("Siswa {}", nis),
        class_label: class_label.to_string(),
        ..Default::default()
    }
}

pub async fn create_student(pool: &PgPool, class_label: &str) -> Student {
    let nis = unique("nis");
    student_service::create_student(
        pool,
        CreateStudent {
            username: unique("siswa"),
            password: "rahasia".to_string(),
            profile: student_profile(&nis, class_label),
        },
    )
    .await
    .expect("create student")
}

pub async fn create_teacher(pool: &PgPool) -> UserView {
    let nip = unique("nip");
    user_service::create_user(
        pool,
        CreateUser {
            username: unique("guru"),
            password: "rahasia".to_string(),
            role: Role::Teacher,
            student: None,
            teacher: Some(TeacherProfile {
                name: format!("Guru {}", nip),
                nip,
                ..Default::default()
            }),
        },
    )
    .await
    .expect("create teacher")
}
