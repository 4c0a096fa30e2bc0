//! Dashboard Repository

use edumanage_core::dto::dashboard::AdminDashboard;
use sqlx::PgPool;

/// Headline counts for the admin dashboard
pub async fn admin_counts(pool: &PgPool) -> Result<AdminDashboard, sqlx::Error> {
    let (student_count, teacher_count, class_count, subject_count): (i64, i64, i64, i64) =
        sqlx::query_as(
            r#"
            SELECT (SELECT COUNT(*) FROM students),
                   (SELECT COUNT(*) FROM teachers),
                   (SELECT COUNT(DISTINCT class_label) FROM schedules),
                   (SELECT COUNT(*) FROM subjects)
            "#,
        )
        .fetch_one(pool)
        .await?;

    Ok(AdminDashboard {
        student_count,
        teacher_count,
        class_count,
        subject_count,
    })
}
