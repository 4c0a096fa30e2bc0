//! API Module
//!
//! HTTP layer for the server.
//! Each submodule handles endpoints for a specific domain; the session gate
//! runs in front of all of them.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod grade;
pub mod health;
pub mod invoice;
pub mod me;
pub mod schedule;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod user;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::auth::gate;
use crate::state::AppState;

/// Create the main router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Public pages
        .route("/", get(auth::landing))
        .route("/health", get(health::health_check))
        .route("/login", get(auth::login_page))
        .route("/auth/callback", get(auth::callback))
        // Session endpoints
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/login-codes", post(auth::create_login_code))
        // Dashboards
        .route("/dashboard", get(dashboard::dashboard))
        .route("/dashboard/admin", get(dashboard::admin))
        .route("/dashboard/guru", get(dashboard::teacher))
        .route("/dashboard/siswa", get(dashboard::student))
        // Students and teachers
        .route(
            "/api/students",
            get(student::list_students).post(student::create_student),
        )
        .route("/api/students/classes", get(student::list_classes))
        .route(
            "/api/students/{id}",
            get(student::get_student)
                .put(student::update_student)
                .delete(student::delete_student),
        )
        .route("/api/teachers", get(teacher::list_teachers))
        .route(
            "/api/teachers/{id}",
            get(teacher::get_teacher)
                .put(teacher::update_teacher)
                .delete(teacher::delete_teacher),
        )
        // Accounts
        .route("/api/users", get(user::list_users).post(user::create_user))
        .route(
            "/api/users/{id}",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::delete_user),
        )
        // Teaching
        .route(
            "/api/subjects",
            get(subject::list_subjects).post(subject::create_subject),
        )
        .route(
            "/api/subjects/{id}",
            axum::routing::delete(subject::delete_subject),
        )
        .route(
            "/api/schedules",
            get(schedule::list_schedules).post(schedule::create_schedule),
        )
        .route(
            "/api/schedules/{id}",
            get(schedule::get_schedule)
                .put(schedule::update_schedule)
                .delete(schedule::delete_schedule),
        )
        .route(
            "/api/grades",
            get(grade::list_grades).post(grade::create_grade),
        )
        .route(
            "/api/grades/{id}",
            get(grade::get_grade)
                .put(grade::update_grade)
                .delete(grade::delete_grade),
        )
        // Finance
        .route(
            "/api/invoices",
            get(invoice::list_invoices).post(invoice::create_invoice),
        )
        .route(
            "/api/invoices/{id}",
            get(invoice::get_invoice)
                .put(invoice::update_invoice)
                .delete(invoice::delete_invoice),
        )
        // Personal views
        .route("/api/me/permissions", get(me::permissions))
        .route("/api/me/schedule", get(me::schedule))
        .route("/api/me/grades", get(me::grades))
        .route("/api/me/classes", get(me::classes))
        .route("/api/me/subjects", get(me::subjects))
        .route("/api/me/invoices", get(me::invoices))
        // Add gate, state and middleware
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gate::session_gate,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use axum::extract::Query;
    use axum::http::Uri;
    use edumanage_core::dto::grade::GradeQuery;
    use edumanage_core::dto::page::PageParams;
    use edumanage_core::dto::schedule::{DayQuery, ScheduleQuery};
    use edumanage_core::dto::student::StudentQuery;
    use edumanage_core::domain::gender::Gender;

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn test_blank_query_selectors_select_everything() {
        let Query(students) = Query::<StudentQuery>::try_from_uri(&uri(
            "/api/students?search=&class_label=&gender=",
        ))
        .unwrap();
        assert_eq!(students.gender, None);

        let Query(page) = Query::<PageParams>::try_from_uri(&uri("/api/students?page=")).unwrap();
        assert_eq!(page.page(), 1);

        let Query(schedules) =
            Query::<ScheduleQuery>::try_from_uri(&uri("/api/schedules?day=&teacher_id=")).unwrap();
        assert_eq!(schedules.day, None);
        assert_eq!(schedules.teacher_id, None);

        let Query(grades) =
            Query::<GradeQuery>::try_from_uri(&uri("/api/grades?semester=&subject_id="))
                .unwrap();
        assert_eq!(grades.semester, None);
        assert_eq!(grades.subject_id, None);

        let Query(day) = Query::<DayQuery>::try_from_uri(&uri("/api/me/schedule?day=")).unwrap();
        assert_eq!(day.day, None);
    }

    #[test]
    fn test_query_selectors_still_parse_values() {
        let Query(students) = Query::<StudentQuery>::try_from_uri(&uri(
            "/api/students?gender=Laki-laki&page=2",
        ))
        .unwrap();
        assert_eq!(students.gender, Some(Gender::Male));

        let Query(page) = Query::<PageParams>::try_from_uri(&uri("/api/students?gender=Laki-laki&page=2")).unwrap();
        assert_eq!(page.page(), 2);

        assert!(Query::<StudentQuery>::try_from_uri(&uri("/api/students?gender=x")).is_err());
    }
}
