use klinik_core::error::CoreError;
use klinik_core::locale::{Locale, Message};
use klinik_core::notice::{Failure, Notice};

/// Errors from calls to the primary backend.
///
/// The variants follow the interception rules: every failure already
/// carries the message the user should see.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// 401 outside the login call. The session has been cleared.
    #[error("Session expired: {message}")]
    SessionExpired {
        message: String,
        redirect: &'static str,
    },

    /// The backend answered with a non-2xx status.
    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// No response arrived (connect, DNS, timeout).
    #[error("Backend unreachable: {message}")]
    Unreachable { message: String },

    /// Rejected locally before anything was sent.
    #[error("Invalid request: {0}")]
    Invalid(String),

    /// A 2xx response whose body did not have the expected shape.
    #[error("Unexpected backend response: {0}")]
    Decode(String),
}

impl ClientError {
    /// The notice the front-end should show for this failure.
    pub fn notice(&self) -> Notice {
        self.notice_in(Locale::default())
    }

    /// Like [`ClientError::notice`], for the flow speaking `locale`.
    pub fn notice_in(&self, locale: Locale) -> Notice {
        match self {
            Self::SessionExpired { message, .. }
            | Self::Api { message, .. }
            | Self::Unreachable { message }
            | Self::Invalid(message) => Notice::error(message.clone()),
            Self::Decode(_) => Notice::error(Message::Unexpected.text(locale)),
        }
    }

    /// HTTP status reported by the backend, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::SessionExpired { .. } => Some(401),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Invalid(msg),
            other => Self::Invalid(other.to_string()),
        }
    }
}

impl From<Failure> for ClientError {
    fn from(failure: Failure) -> Self {
        match failure {
            Failure::SessionExpired { message, redirect } => Self::SessionExpired { message, redirect },
            Failure::Api { status, message } => Self::Api { status, message },
            Failure::Unreachable { message } => Self::Unreachable { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klinik_core::notice::NoticeLevel;

    #[test]
    fn failure_maps_one_to_one() {
        let err = ClientError::from(Failure::Api {
            status: 422,
            message: "Email sudah terdaftar".into(),
        });
        assert_eq!(err.status(), Some(422));
        let notice = err.notice();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Email sudah terdaftar");
    }

    #[test]
    fn session_expiry_reports_401() {
        let err = ClientError::from(Failure::SessionExpired {
            message: "x".into(),
            redirect: "/auth/login",
        });
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn decode_notice_follows_the_locale() {
        let err = ClientError::Decode("missing field `data`".into());
        assert_eq!(err.status(), None);
        assert_eq!(err.notice().message, "Terjadi kesalahan yang tidak terduga");
        assert_eq!(
            err.notice_in(Locale::En).message,
            "An unexpected error occurred"
        );
    }
}
