//! Backend-for-frontend server for the clinic screening app.
//!
//! Serves the citizen and foreign-national screening flows and the staff
//! dashboards as JSON view models, proxies raw calls to the primary backend
//! and the OCR service, and owns the `auth_token` / `user_role` cookies.

pub mod config;
pub mod cookies;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod upload;
