//! Session cookie handling
//!
//! The browser only ever holds an opaque random token; the user it belongs
//! to lives in the `sessions` table.

use std::time::Duration;

use axum::http::{HeaderMap, header};
use uuid::Uuid;

/// Name of the session cookie
pub const COOKIE_NAME: &str = "edumanage_session";

/// Extension inserted by the gate so handlers can end the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken(pub Uuid);

/// Build the `Set-Cookie` value for a new session
pub fn session_cookie(token: Uuid, max_age: Duration, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        COOKIE_NAME,
        token,
        max_age.as_secs()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the `Set-Cookie` value that removes the session cookie
pub fn clear_cookie(secure: bool) -> String {
    let mut cookie = format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", COOKIE_NAME);
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Find the session token among the request's cookies
pub fn read_session_token(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// Accept a redirect target only if it stays on this site
pub fn safe_redirect(target: Option<&str>) -> Option<&str> {
    target.filter(|t| t.starts_with('/') && !t.starts_with("//") && !t.contains('\\'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_cookie_attributes() {
        let token = Uuid::new_v4();
        let cookie = session_cookie(token, Duration::from_secs(86_400), false);
        assert!(cookie.starts_with(&format!("edumanage_session={}", token)));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(!cookie.contains("Secure"));

        let secure = session_cookie(token, Duration::from_secs(60), true);
        assert!(secure.ends_with("; Secure"));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        assert!(clear_cookie(false).contains("Max-Age=0"));
    }

    #[test]
    fn test_read_session_token_among_other_cookies() {
        let token = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; edumanage_session={}; lang=id", token))
                .unwrap(),
        );
        assert_eq!(read_session_token(&headers), Some(token));
    }

    #[test]
    fn test_read_session_token_rejects_garbage() {
        let mut headers = HeaderMap::new();
        assert_eq!(read_session_token(&headers), None);

        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("edumanage_session=not-a-uuid"),
        );
        assert_eq!(read_session_token(&headers), None);

        // The old scheme stored the whole user as JSON in a readable cookie
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("user=%7B%22id%22%3A1%2C%22role_id%22%3A1%7D"),
        );
        assert_eq!(read_session_token(&headers), None);
    }

    #[test]
    fn test_safe_redirect() {
        assert_eq!(safe_redirect(Some("/dashboard/guru")), Some("/dashboard/guru"));
        assert_eq!(safe_redirect(Some("//evil.example")), None);
        assert_eq!(safe_redirect(Some("https://evil.example")), None);
        assert_eq!(safe_redirect(Some("/\\evil.example")), None);
        assert_eq!(safe_redirect(None), None);
    }
}
