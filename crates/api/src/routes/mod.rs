pub mod auth;
pub mod dashboard;
pub mod health;
pub mod proxy;
pub mod screening;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree (everything except `/health`).
///
/// Route hierarchy:
///
/// ```text
/// /                                  landing                 (edge)
/// /auth/login, /auth/logout          session                 (edge on login)
///
/// /api/proxy/{*path}                 primary backend pass-through
/// /api/python-proxy/{*path}          OCR service pass-through
/// /api/me                            who-am-i
///
/// /screening/...                     citizen screening flow
/// /carstensz/...                     foreign-national screening flow
///
/// /dashboard/{admin,nurse,cashier,doctor}/...   role dashboards (edge + role)
/// /dashboard/management/...                     shared pages (edge + any staff)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/api", proxy::router())
        .nest("/screening", screening::citizen_router())
        .nest("/carstensz", screening::carstensz_router())
        .nest("/dashboard", dashboard::router())
}
