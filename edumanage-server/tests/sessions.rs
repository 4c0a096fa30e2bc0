//! Login, sessions and login codes against a live database

mod common;

use edumanage_core::domain::role::Role;
use edumanage_core::dto::auth::LoginRequest;
use edumanage_core::dto::user::CreateUser;
use edumanage_server::config::Config;
use edumanage_server::service::error::ServiceError;
use edumanage_server::service::{auth_service, permission_service, user_service};

use common::*;

async fn create_admin(pool: &sqlx::PgPool) -> String {
    let username = unique("admin");
    user_service::create_user(
        pool,
        CreateUser {
            username: username.clone(),
            password: "s3cret!".to_string(),
            role: Role::Admin,
            student: None,
            teacher: None,
        },
    )
    .await
    .unwrap();
    username
}

fn login_request(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
        remember_me: false,
        from: None,
    }
}

#[tokio::test]
async fn test_login_resolve_logout() {
    let Some(pool) = pool().await else { return };
    let config = Config::default();
    let username = create_admin(&pool).await;

    let session = auth_service::login(&pool, &config, &login_request(&username, "s3cret!"))
        .await
        .unwrap();
    assert_eq!(session.user.role, Role::Admin);
    assert_eq!(session.max_age, config.session_ttl);

    let resolved = auth_service::resolve_session(&pool, session.token).await.unwrap();
    assert_eq!(resolved, Some(session.user.clone()));

    auth_service::logout(&pool, session.token).await.unwrap();
    assert!(
        auth_service::resolve_session(&pool, session.token)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let Some(pool) = pool().await else { return };
    let username = create_admin(&pool).await;

    let result =
        auth_service::login(&pool, &Config::default(), &login_request(&username, "nope")).await;

    assert!(
        matches!(result, Err(ServiceError::Unauthorized(msg)) if msg == "Username atau password salah")
    );
}

#[tokio::test]
async fn test_remember_me_extends_session() {
    let Some(pool) = pool().await else { return };
    let config = Config::default();
    let username = create_admin(&pool).await;

    let mut req = login_request(&username, "s3cret!");
    req.remember_me = true;
    let session = auth_service::login(&pool, &config, &req).await.unwrap();

    assert_eq!(session.max_age, config.remember_me_ttl);
}

#[tokio::test]
async fn test_login_code_works_once() {
    let Some(pool) = pool().await else { return };
    let config = Config::default();
    let teacher = create_teacher(&pool).await;

    let code = auth_service::issue_login_code(&pool, &config, teacher.user.id)
        .await
        .unwrap();

    let session = auth_service::exchange_login_code(&pool, &config, code.code)
        .await
        .unwrap();
    assert_eq!(session.user.id, teacher.user.id);

    let again = auth_service::exchange_login_code(&pool, &config, code.code).await;
    assert!(matches!(again, Err(ServiceError::Unauthorized(_))));
}

#[tokio::test]
async fn test_teacher_permissions_come_from_role() {
    let Some(pool) = pool().await else { return };
    let teacher = create_teacher(&pool).await;

    let permissions = permission_service::permissions_for(&pool, teacher.user.id)
        .await
        .unwrap();

    assert_eq!(permissions, vec!["EDIT_STUDENT_GRADES", "VIEW_STUDENT_GRADES"]);
    assert!(
        permission_service::require(&pool, &session_user(&teacher), "VIEW_FINANCIAL_DATA")
            .await
            .is_err()
    );
}
