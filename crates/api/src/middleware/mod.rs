//! Session middleware and extractors.
//!
//! - [`edge::edge_redirect`] -- Cookie-only redirect check on page requests.
//! - [`auth::AuthUser`] -- The caller as confirmed by the backend.
//! - [`rbac::RequireAdmin`], [`rbac::RequireNurse`], [`rbac::RequireCashier`],
//!   [`rbac::RequireDoctor`] -- One dashboard role.
//! - [`rbac::RequireStaff`] -- Any staff role.

pub mod auth;
pub mod edge;
pub mod rbac;
