//! Route definitions for the upstream pass-through proxies.

use axum::routing::{any, get};
use axum::Router;

use crate::handlers::{auth, proxy};
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// ANY /proxy/{*path}         -> BACKEND_URL/{path}
/// ANY /python-proxy/{*path}  -> OCR_URL/{path}
/// GET /me                    -> who-am-i for the cookie session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/proxy/{*path}", any(proxy::backend))
        .route("/python-proxy/{*path}", any(proxy::ocr))
        .route("/me", get(auth::me))
}
