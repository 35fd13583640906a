//! Domain layer for the Klinik Gunung screening service.
//!
//! Everything in here is pure: no I/O, no HTTP. The client and API crates
//! build on these types and decisions.

pub mod error;
pub mod export;
pub mod locale;
pub mod management;
pub mod notice;
pub mod nurse;
pub mod ocr;
pub mod patient;
pub mod payment;
pub mod questionnaire;
pub mod roles;
pub mod routing;
pub mod screening;
pub mod types;
pub mod upload;
