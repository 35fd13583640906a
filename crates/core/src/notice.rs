//! Classification of backend responses into user-facing notices.
//!
//! Every call to the primary backend passes through these rules, success or
//! failure. The client crate applies them; the API crate serializes the
//! resulting [`Notice`] next to the payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::locale::{Locale, Message};
use crate::roles::LOGIN_PATH;

/// HTTP methods that change backend state and therefore report success.
const MUTATING_METHODS: &[&str] = &["POST", "PUT", "PATCH", "DELETE"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// A one-line message for the user, shown as a toast by the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Success notice for a completed call, or `None` for read-only methods.
pub fn success_notice(method: &str, body: Option<&Value>, locale: Locale) -> Option<Notice> {
    let method = method.to_ascii_uppercase();
    if !MUTATING_METHODS.contains(&method.as_str()) {
        return None;
    }
    let message = body
        .and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .unwrap_or(Message::OperationSucceeded.text(locale));
    Some(Notice::success(message))
}

/// How a failed backend call should be surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// 401 outside the login call: drop the session and go to login.
    SessionExpired { message: String, redirect: &'static str },
    /// Backend answered with an error status.
    Api { status: u16, message: String },
    /// No response at all.
    Unreachable { message: String },
}

impl Failure {
    pub fn message(&self) -> &str {
        match self {
            Self::SessionExpired { message, .. }
            | Self::Api { message, .. }
            | Self::Unreachable { message } => message,
        }
    }

    pub fn notice(&self) -> Notice {
        Notice::error(self.message())
    }
}

/// Classify a failed call.
///
/// `status` is `None` when no response arrived. `is_login_request` exempts
/// the login call from session expiry so a wrong password shows the
/// backend's message instead of bouncing to the login page.
pub fn classify_failure(
    status: Option<u16>,
    body: Option<&Value>,
    is_login_request: bool,
    locale: Locale,
) -> Failure {
    let Some(status) = status else {
        return Failure::Unreachable {
            message: Message::ServerUnreachable.text(locale).to_string(),
        };
    };

    if status == 401 && !is_login_request {
        return Failure::SessionExpired {
            message: Message::SessionExpired.text(locale).to_string(),
            redirect: LOGIN_PATH,
        };
    }

    let fallback = body
        .and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .unwrap_or(Message::GenericError.text(locale))
        .to_string();

    let message = if status == 422 {
        first_validation_message(body).unwrap_or(fallback)
    } else {
        fallback
    };

    Failure::Api { status, message }
}

/// First message of the first field in a Laravel `errors` object.
///
/// Returns `None` when there is no `errors` object, or the first entry is
/// not a non-empty array (the caller then falls back to `message`).
pub fn first_validation_message(body: Option<&Value>) -> Option<String> {
    let errors = body?.get("errors")?.as_object()?;
    let (_, first) = errors.iter().next()?;
    first
        .as_array()?
        .first()?
        .as_str()
        .map(str::to_string)
}
