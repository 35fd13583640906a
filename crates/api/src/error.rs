use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use klinik_client::{AnalyzeError, ClientError};
use klinik_core::error::CoreError;
use klinik_core::notice::Notice;
use klinik_core::roles::LOGIN_PATH;
use serde_json::json;

use crate::cookies;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for rejected input, [`ClientError`] for upstream
/// failures and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `klinik_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failed call to the primary backend.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A failed document upload or analysis.
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The caller may not see this page; send them elsewhere.
    #[error("Redirect to {0}")]
    Redirect(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Status, code and message of a JSON error response, plus the optional
/// extras.
struct ErrorBody {
    status: StatusCode,
    code: &'static str,
    message: String,
    notice: Option<Notice>,
    redirect: Option<&'static str>,
}

impl ErrorBody {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            notice: None,
            redirect: None,
        }
    }

    fn with_notice(mut self) -> Self {
        self.notice = Some(Notice::error(self.message.clone()));
        self
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();

        let body = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    ErrorBody::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                        .with_notice()
                }
                CoreError::UnknownField(_) => {
                    ErrorBody::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", core.to_string())
                }
            },

            // --- Upstream errors ---
            AppError::Client(err) => classify_client_error(err, &mut headers),
            AppError::Analyze(err) => classify_analyze_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                ErrorBody::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
            }
            AppError::Redirect(to) => {
                return match HeaderValue::from_str(to) {
                    Ok(location) => {
                        (StatusCode::TEMPORARY_REDIRECT, [(LOCATION, location)]).into_response()
                    }
                    Err(e) => {
                        tracing::error!(error = %e, to = %to, "Invalid redirect target");
                        error_response(ErrorBody::internal(), headers)
                    }
                };
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                ErrorBody::internal()
            }
        };

        error_response(body, headers)
    }
}

fn error_response(body: ErrorBody, headers: HeaderMap) -> Response {
    let mut json = json!({
        "error": body.message,
        "code": body.code,
    });
    if let Some(notice) = body.notice {
        json["notice"] = json!(notice);
    }
    if let Some(redirect) = body.redirect {
        json["redirect"] = json!(redirect);
    }

    (body.status, headers, axum::Json(json)).into_response()
}

/// Map a backend failure to an HTTP response.
///
/// - Session expiry maps to 401 and expires both session cookies.
/// - Backend error statuses pass through with the backend's message.
/// - A missing or malformed upstream response maps to 502.
fn classify_client_error(err: &ClientError, headers: &mut HeaderMap) -> ErrorBody {
    match err {
        ClientError::SessionExpired { message, redirect } => {
            cookies::clear_session(headers);
            let mut body =
                ErrorBody::new(StatusCode::UNAUTHORIZED, "SESSION_EXPIRED", message.clone())
                    .with_notice();
            body.redirect = Some(if redirect.is_empty() { LOGIN_PATH } else { *redirect });
            body
        }
        ClientError::Api { status, message } => {
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            ErrorBody::new(status, "UPSTREAM_ERROR", message.clone()).with_notice()
        }
        ClientError::Unreachable { message } => {
            ErrorBody::new(StatusCode::BAD_GATEWAY, "UPSTREAM_UNREACHABLE", message.clone())
                .with_notice()
        }
        ClientError::Invalid(msg) => {
            ErrorBody::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()).with_notice()
        }
        ClientError::Decode(detail) => {
            tracing::error!(error = %detail, "Unexpected backend response");
            let mut body = ErrorBody::new(
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_DECODE_ERROR",
                "An internal error occurred",
            );
            body.notice = Some(err.notice());
            body
        }
    }
}

fn classify_analyze_error(err: &AnalyzeError) -> ErrorBody {
    let (status, code) = match err {
        AnalyzeError::Rejected { .. } => (StatusCode::BAD_REQUEST, "UPLOAD_REJECTED"),
        AnalyzeError::ConversionFailed { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "CONVERSION_FAILED")
        }
        AnalyzeError::AnalysisFailed { .. } => (StatusCode::BAD_GATEWAY, "ANALYSIS_FAILED"),
    };
    ErrorBody::new(status, code, err.to_string()).with_notice()
}
