//! Auth API Handlers
//!
//! Login, logout, the current user, and the login-code callback.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::{HeaderName, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use edumanage_core::domain::role::Role;
use edumanage_core::dto::auth::{
    CreateLoginCode, LoginCode, LoginRequest, LoginResponse, MeResponse,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::auth::CurrentUser;
use crate::auth::session::{self, SessionToken, safe_redirect};
use crate::config::Config;
use crate::service::auth_service::{self, CALLBACK_FAILED, NewSession};
use crate::service::permission_service;

type SetCookie = [(HeaderName, String); 1];

fn set_cookie(value: String) -> SetCookie {
    [(header::SET_COOKIE, value)]
}

fn session_cookie(config: &Config, session: &NewSession) -> SetCookie {
    set_cookie(session::session_cookie(
        session.token,
        session.max_age,
        config.cookie_secure,
    ))
}

/// GET /
/// Service landing document
pub async fn landing() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "edumanage",
        "version": env!("CARGO_PKG_VERSION"),
        "login": "/login",
    }))
}

#[derive(Debug, Deserialize)]
pub struct LoginPageParams {
    #[serde(default)]
    pub from: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

/// GET /login
/// Tell the caller how to log in, echoing where they came from
pub async fn login_page(Query(params): Query<LoginPageParams>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "login": "/api/auth/login",
        "from": safe_redirect(params.from.as_deref()),
        "error": params.error,
    }))
}

/// POST /api/auth/login
/// Verify credentials and open a session
pub async fn login(
    State(pool): State<PgPool>,
    State(config): State<Arc<Config>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(SetCookie, Json<LoginResponse>)> {
    tracing::info!("Login attempt: {}", req.username);

    let session = auth_service::login(&pool, &config, &req).await?;
    let redirect_to = auth_service::login_redirect(session.user.role, req.from.as_deref());
    let cookie = session_cookie(&config, &session);

    Ok((
        cookie,
        Json(LoginResponse {
            user: session.user,
            redirect_to,
        }),
    ))
}

/// POST /api/auth/logout
/// Close the current session and clear the cookie
pub async fn logout(
    State(pool): State<PgPool>,
    State(config): State<Arc<Config>>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> ApiResult<(SetCookie, StatusCode)> {
    auth_service::logout(&pool, token).await?;

    Ok((
        set_cookie(session::clear_cookie(config.cookie_secure)),
        StatusCode::NO_CONTENT,
    ))
}

/// GET /api/auth/me
/// The signed-in user and their permissions
pub async fn me(State(pool): State<PgPool>, user: CurrentUser) -> ApiResult<Json<MeResponse>> {
    let permissions = permission_service::permissions_for(&pool, user.0.id).await?;

    Ok(Json(MeResponse {
        user: user.0,
        permissions,
    }))
}

/// POST /api/auth/login-codes
/// Issue a one-time login code for a user (admin only)
pub async fn create_login_code(
    State(pool): State<PgPool>,
    State(config): State<Arc<Config>>,
    user: CurrentUser,
    Json(req): Json<CreateLoginCode>,
) -> ApiResult<Json<LoginCode>> {
    user.require_role(&[Role::Admin])?;
    tracing::info!("Issuing login code for user {}", req.user_id);

    let code = auth_service::issue_login_code(&pool, &config, req.user_id).await?;

    Ok(Json(code))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: Option<String>,

    #[serde(default)]
    pub next: Option<String>,
}

/// GET /auth/callback
/// Exchange a login code for a session and continue to `next`
pub async fn callback(
    State(pool): State<PgPool>,
    State(config): State<Arc<Config>>,
    Query(params): Query<CallbackParams>,
) -> Response {
    let failed = || Redirect::to(&format!("/login?error={}", CALLBACK_FAILED.replace(' ', "%20")));

    let Some(code) = params.code.as_deref().and_then(|c| Uuid::parse_str(c).ok()) else {
        tracing::debug!("Callback without a usable code");
        return failed().into_response();
    };

    match auth_service::exchange_login_code(&pool, &config, code).await {
        Ok(session) => {
            let next = safe_redirect(params.next.as_deref()).unwrap_or("/dashboard");
            (session_cookie(&config, &session), Redirect::to(next)).into_response()
        }
        Err(e) => {
            tracing::warn!("Login code exchange failed: {}", e);
            failed().into_response()
        }
    }
}
