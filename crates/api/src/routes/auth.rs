//! Route definitions for the public pages and the session.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// GET  /              -> landing
/// GET  /auth/login    -> login_page
/// POST /auth/login    -> login
/// POST /auth/logout   -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::landing))
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/logout", post(auth::logout))
}
