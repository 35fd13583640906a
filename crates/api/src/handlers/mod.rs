//! Request handlers, one module per area of the app.
//!
//! Handlers scope the backend client to the caller (cookie token or the
//! role extractor's client) and map failures via [`crate::error::AppError`].

pub mod admin;
pub mod auth;
pub mod cashier;
pub mod doctor;
pub mod management;
pub mod nurse;
pub mod proxy;
pub mod screening;
