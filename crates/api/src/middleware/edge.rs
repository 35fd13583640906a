//! Edge redirect middleware.
//!
//! Runs before every handler and looks only at the `user_role` cookie, so
//! it never calls the backend. Handlers still confirm the role with
//! [`crate::middleware::rbac`].

use axum::extract::Request;
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use klinik_core::routing::{edge_applies, edge_decision, EdgeDecision};

use crate::cookies::{self, USER_ROLE_COOKIE};

/// Redirect page requests the caller's role cookie does not allow.
///
/// Only page loads (`GET`/`HEAD`) are redirected; form posts such as the
/// login itself always reach their handler.
pub async fn edge_redirect(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    if !is_page_load(request.method()) || !edge_applies(&path) {
        return next.run(request).await;
    }

    let role = cookies::read(request.headers(), USER_ROLE_COOKIE);
    match edge_decision(role.as_deref(), &path) {
        EdgeDecision::Continue => next.run(request).await,
        EdgeDecision::Redirect(to) => {
            tracing::debug!(path = %path, to = %to, role = role.as_deref().unwrap_or(""), "Edge redirect");
            Redirect::temporary(&to).into_response()
        }
    }
}

fn is_page_load(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_reads_are_page_loads() {
        assert!(is_page_load(&Method::GET));
        assert!(is_page_load(&Method::HEAD));
        assert!(!is_page_load(&Method::POST));
        assert!(!is_page_load(&Method::DELETE));
    }
}
