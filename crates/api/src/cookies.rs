//! The two session cookies shared with the front-end.
//!
//! `auth_token` holds the backend bearer token and is `HttpOnly`.
//! `user_role` holds the role name and is read by the edge middleware.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};

pub const AUTH_TOKEN_COOKIE: &str = "auth_token";
pub const USER_ROLE_COOKIE: &str = "user_role";

/// Session cookies live for one day.
const SESSION_MAX_AGE_SECS: u64 = 24 * 60 * 60;

/// Value of the named cookie across all `Cookie` headers.
///
/// Returns `None` when the cookie is absent. An empty value is returned
/// as-is; callers decide what an empty cookie means.
pub fn read(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
}

/// The caller's backend token, if a non-empty one is set.
pub fn auth_token(headers: &HeaderMap) -> Option<String> {
    read(headers, AUTH_TOKEN_COOKIE).filter(|t| !t.is_empty())
}

/// `Set-Cookie` value storing a session cookie.
pub fn session_cookie(name: &str, value: &str, http_only: bool, secure: bool) -> HeaderValue {
    let mut cookie = format!("{name}={value}; Path=/; Max-Age={SESSION_MAX_AGE_SECS}; SameSite=Lax");
    if http_only {
        cookie.push_str("; HttpOnly");
    }
    if secure {
        cookie.push_str("; Secure");
    }
    header_value(cookie)
}

/// `Set-Cookie` value deleting a cookie.
pub fn expired_cookie(name: &str) -> HeaderValue {
    header_value(format!("{name}=; Path=/; Max-Age=0; SameSite=Lax"))
}

/// Append `Set-Cookie` headers storing a fresh session.
pub fn set_session(headers: &mut HeaderMap, token: &str, role: &str, secure: bool) {
    headers.append(SET_COOKIE, session_cookie(AUTH_TOKEN_COOKIE, token, true, secure));
    headers.append(SET_COOKIE, session_cookie(USER_ROLE_COOKIE, role, false, secure));
}

/// Append `Set-Cookie` headers removing both session cookies.
pub fn clear_session(headers: &mut HeaderMap) {
    headers.append(SET_COOKIE, expired_cookie(AUTH_TOKEN_COOKIE));
    headers.append(SET_COOKIE, expired_cookie(USER_ROLE_COOKIE));
}

/// Characters a header cannot carry are dropped.
fn header_value(cookie: String) -> HeaderValue {
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| {
        let cleaned: String = cookie
            .chars()
            .filter(|c| c.is_ascii_graphic() || *c == ' ')
            .collect();
        HeaderValue::from_str(&cleaned).unwrap_or_else(|_| HeaderValue::from_static(""))
    })
}
