//! Bearer-token session of one [`BackendClient`](crate::BackendClient).

use std::sync::{PoisonError, RwLock};

/// Token and role returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub role: String,
}

/// The only mutable state of a client: overwritten on login, cleared on
/// logout or when the backend reports the session expired.
#[derive(Debug, Default)]
pub struct Session {
    inner: RwLock<Option<Credentials>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// A session resumed from a token the caller already holds (cookie).
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(Some(Credentials {
                token: token.into(),
                role: String::new(),
            })),
        }
    }

    pub fn set(&self, token: impl Into<String>, role: impl Into<String>) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Credentials {
            token: token.into(),
            role: role.into(),
        });
    }

    pub fn clear(&self) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    pub fn token(&self) -> Option<String> {
        self.credentials().map(|c| c.token)
    }

    pub fn credentials(&self) -> Option<Credentials> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_clear() {
        let session = Session::new();
        assert_eq!(session.token(), None);

        session.set("tok-1", "nurse");
        assert_eq!(session.token().as_deref(), Some("tok-1"));
        assert_eq!(session.credentials().unwrap().role, "nurse");

        session.set("tok-2", "admin");
        assert_eq!(session.token().as_deref(), Some("tok-2"));

        session.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn resumed_session_has_token_only() {
        let session = Session::with_token("abc");
        assert_eq!(session.token().as_deref(), Some("abc"));
        assert_eq!(session.credentials().unwrap().role, "");
    }
}
