//! HTTP clients for the two upstream services.
//!
//! [`BackendClient`] talks to the primary backend and applies the shared
//! interception rules; [`OcrClient`] talks to the OCR microservice and
//! [`DocumentAnalyzer`] runs the upload-and-analyze flow on top of it.

pub mod analyze;
pub mod auth;
pub mod backend;
pub mod error;
pub mod management;
pub mod nurse;
pub mod ocr;
pub mod payment;
pub mod screening;
pub mod session;

pub use analyze::{AnalyzeError, AnalyzedDocument, DocumentAnalyzer};
pub use backend::{BackendClient, RawReply, Reply};
pub use error::ClientError;
pub use ocr::{DocumentOcr, OcrClient, OcrError};
pub use session::Session;
