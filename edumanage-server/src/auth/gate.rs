//! Session gate middleware
//!
//! Runs in front of every route. Resolves the session cookie, keeps
//! anonymous visitors on the public pages and sends signed-in users away
//! from the login page.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use edumanage_core::dto::auth::SessionUser;

use crate::api::error::ApiError;
use crate::auth::session::{self, SessionToken};
use crate::service::auth_service;
use crate::state::AppState;

/// Paths reachable without a session
pub const PUBLIC_PATHS: [&str; 5] = ["/", "/login", "/auth/callback", "/health", "/api/auth/login"];

/// What the gate does with a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Hand the request to the router
    Continue,
    /// Reject an anonymous API call with 401
    Unauthorized,
    /// See other location
    Redirect(String),
}

pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

fn is_api(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

/// Login page URL that returns to `path` after signing in
fn login_redirect(path: &str) -> String {
    let from: String = form_urlencoded::byte_serialize(path.as_bytes()).collect();
    format!("/login?from={}", from)
}

/// Decide how to route a request given the resolved session
pub fn decide(path: &str, user: Option<&SessionUser>) -> GateDecision {
    match user {
        Some(user) if path == "/login" || path == "/dashboard" => {
            GateDecision::Redirect(user.role.dashboard_path().to_string())
        }
        Some(_) => GateDecision::Continue,
        None if is_public(path) => GateDecision::Continue,
        None if is_api(path) => GateDecision::Unauthorized,
        None => GateDecision::Redirect(login_redirect(path)),
    }
}

pub async fn session_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = session::read_session_token(request.headers());

    let user = match token {
        Some(token) => match auth_service::resolve_session(&state.pool, token).await {
            Ok(user) => user,
            Err(e) => return ApiError::from(e).into_response(),
        },
        None => None,
    };

    match decide(request.uri().path(), user.as_ref()) {
        GateDecision::Continue => {}
        GateDecision::Unauthorized => {
            return ApiError::Unauthorized("Authentication required".to_string()).into_response();
        }
        GateDecision::Redirect(location) => {
            tracing::debug!("Gate redirecting {} to {}", request.uri().path(), location);
            return Redirect::to(&location).into_response();
        }
    }

    if let (Some(token), Some(user)) = (token, user) {
        request.extensions_mut().insert(SessionToken(token));
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use edumanage_core::domain::role::Role;

    fn user(role: Role) -> SessionUser {
        SessionUser {
            id: 1,
            username: "budi".to_string(),
            role,
        }
    }

    #[test]
    fn test_anonymous_public_paths_pass() {
        for path in PUBLIC_PATHS {
            assert_eq!(decide(path, None), GateDecision::Continue);
        }
    }

    #[test]
    fn test_anonymous_page_redirects_to_login() {
        assert_eq!(
            decide("/dashboard/admin", None),
            GateDecision::Redirect("/login?from=%2Fdashboard%2Fadmin".to_string())
        );
    }

    #[test]
    fn test_login_redirect_encodes_the_path() {
        let GateDecision::Redirect(target) = decide("/dashboard/a&b%c+d", None) else {
            panic!("expected a redirect");
        };
        assert_eq!(target, "/login?from=%2Fdashboard%2Fa%26b%25c%2Bd");

        let query = target.trim_start_matches("/login?");
        let from: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        assert_eq!(
            from,
            vec![("from".to_string(), "/dashboard/a&b%c+d".to_string())]
        );
    }

    #[test]
    fn test_anonymous_api_gets_401() {
        assert_eq!(decide("/api/students", None), GateDecision::Unauthorized);
        assert_eq!(decide("/api/auth/me", None), GateDecision::Unauthorized);
    }

    #[test]
    fn test_signed_in_user_leaves_login_page() {
        assert_eq!(
            decide("/login", Some(&user(Role::Teacher))),
            GateDecision::Redirect("/dashboard/guru".to_string())
        );
        assert_eq!(
            decide("/dashboard", Some(&user(Role::Student))),
            GateDecision::Redirect("/dashboard/siswa".to_string())
        );
    }

    #[test]
    fn test_signed_in_user_continues() {
        assert_eq!(
            decide("/api/students", Some(&user(Role::Admin))),
            GateDecision::Continue
        );
        assert_eq!(decide("/", Some(&user(Role::Admin))), GateDecision::Continue);
    }
}
