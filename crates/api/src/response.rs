//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ..., "notice": ... }` envelope. The
//! notice is the toast the front-end shows; it is omitted for plain reads.

use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use klinik_core::export::Download;
use klinik_core::notice::Notice;
use serde::Serialize;

/// Standard `{ "data": T, "notice"?: Notice }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse::new(items)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data, notice: None }
    }

    pub fn with_notice(data: T, notice: Option<Notice>) -> Self {
        Self { data, notice }
    }
}

/// A file sent to the browser as an attachment.
pub struct Attachment {
    pub download: Download,
    pub body: Vec<u8>,
}

impl IntoResponse for Attachment {
    fn into_response(self) -> Response {
        let disposition = HeaderValue::from_str(&self.download.content_disposition())
            .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
        (
            StatusCode::OK,
            [
                (CONTENT_TYPE, HeaderValue::from_static(self.download.content_type)),
                (CONTENT_DISPOSITION, disposition),
            ],
            Body::from(self.body),
        )
            .into_response()
    }
}
