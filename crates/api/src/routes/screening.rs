//! Route definitions for the two public screening flows.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::screening;
use crate::state::AppState;

/// Citizen flow, mounted at `/screening`.
///
/// ```text
/// GET  /form              -> citizen_form
/// POST /form              -> citizen_submit
/// POST /form/document     -> citizen_document (KTP analysis)
/// GET  /success/{uuid}    -> citizen_success
/// ```
pub fn citizen_router() -> Router<AppState> {
    Router::new()
        .route(
            "/form",
            get(screening::citizen_form).post(screening::citizen_submit),
        )
        .route("/form/document", post(screening::citizen_document))
        .route("/success/{uuid}", get(screening::citizen_success))
}

/// Foreign-national flow, mounted at `/carstensz`.
///
/// ```text
/// GET  /                  -> carstensz_landing
/// GET  /form              -> carstensz_form
/// POST /form              -> carstensz_submit
/// POST /form/document     -> carstensz_document (passport analysis)
/// GET  /form/{uuid}       -> carstensz_success
/// GET  /thanks            -> carstensz_thanks
/// ```
pub fn carstensz_router() -> Router<AppState> {
    Router::new()
        .route("/", get(screening::carstensz_landing))
        .route(
            "/form",
            get(screening::carstensz_form).post(screening::carstensz_submit),
        )
        .route("/form/document", post(screening::carstensz_document))
        .route("/form/{uuid}", get(screening::carstensz_success))
        .route("/thanks", get(screening::carstensz_thanks))
}
