//! Cookie-session authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use klinik_client::auth::CurrentUser;
use klinik_client::{BackendClient, ClientError};
use klinik_core::roles::Role;
use klinik_core::routing::{guard, GuardOutcome};

use crate::cookies;
use crate::error::AppError;
use crate::state::AppState;

/// The signed-in staff member, confirmed by `GET /me` with the
/// `auth_token` cookie.
///
/// `backend` acts with the caller's token; handlers make their backend
/// calls through it.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(role = user.role.as_str(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: CurrentUser,
    pub role: Role,
    pub backend: BackendClient,
}

impl AuthUser {
    /// Confirm the caller and check their role against `allowed`.
    ///
    /// A missing cookie or a failed lookup redirects to login; a known role
    /// outside `allowed` redirects to its own dashboard. An expired session
    /// surfaces as the backend error so the cookies get cleared.
    pub async fn authorize(
        parts: &Parts,
        state: &AppState,
        allowed: &[Role],
    ) -> Result<Self, AppError> {
        let Some(token) = cookies::auth_token(&parts.headers) else {
            return Err(redirect(guard(allowed, None)));
        };

        let backend = state.backend_for(Some(&token));
        let user = match backend.me().await {
            Ok(user) => user,
            Err(err @ ClientError::SessionExpired { .. }) => return Err(err.into()),
            Err(err) => {
                tracing::warn!(error = %err, "Who-am-I call failed");
                return Err(redirect(guard(allowed, None)));
            }
        };

        match guard(allowed, Some(user.role.as_str())) {
            GuardOutcome::Allow(role) => Ok(Self { user, role, backend }),
            outcome => {
                tracing::debug!(role = %user.role, path = %parts.uri.path(), "Role guard redirect");
                Err(redirect(outcome))
            }
        }
    }
}

fn redirect(outcome: GuardOutcome) -> AppError {
    match outcome {
        GuardOutcome::Redirect(to) => AppError::Redirect(to.to_string()),
        GuardOutcome::Allow(role) => AppError::Redirect(role.dashboard_path().to_string()),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Self::authorize(parts, state, &Role::ALL).await
    }
}
