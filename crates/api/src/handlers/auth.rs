//! Handlers for the public pages and the cookie session (login, logout,
//! who-am-i).

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use klinik_client::auth::CurrentUser;
use klinik_core::notice::Notice;
use klinik_core::roles::{Role, DASHBOARD_PREFIX, LOGIN_PATH};
use serde::{Deserialize, Serialize};

use crate::cookies;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login: the user and the dashboard to open.
#[derive(Debug, Serialize)]
pub struct LoginResult {
    pub user: CurrentUser,
    pub redirect: String,
}

#[derive(Debug, Serialize)]
pub struct LandingView {
    pub screening_form: &'static str,
    pub carstensz: &'static str,
    pub login: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LoginView {
    pub action: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LogoutResult {
    pub redirect: &'static str,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
pub async fn landing() -> Json<DataResponse<LandingView>> {
    Json(DataResponse::new(LandingView {
        screening_form: "/screening/form",
        carstensz: "/carstensz",
        login: LOGIN_PATH,
    }))
}

/// GET /auth/login
///
/// Signed-in callers never reach this; the edge middleware sends them to
/// their dashboard.
pub async fn login_page() -> Json<DataResponse<LoginView>> {
    Json(DataResponse::new(LoginView { action: LOGIN_PATH }))
}

/// POST /auth/login
///
/// Sign in against the backend and store the session in the `auth_token`
/// and `user_role` cookies.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<(HeaderMap, Json<DataResponse<LoginResult>>)> {
    let email = body.email.trim();
    if email.is_empty() || body.password.is_empty() {
        return Err(AppError::BadRequest(
            "Email dan password wajib diisi".to_string(),
        ));
    }

    let backend = state.backend_for(None);
    let reply = backend.login(email, &body.password).await?;

    let credentials = backend.session().credentials().ok_or_else(|| {
        AppError::InternalError("Login succeeded without storing a session".to_string())
    })?;

    let mut headers = HeaderMap::new();
    cookies::set_session(
        &mut headers,
        &credentials.token,
        &credentials.role,
        state.config.cookie_secure,
    );

    let redirect = Role::from_name(&reply.data.role)
        .map(Role::dashboard_path)
        .unwrap_or(DASHBOARD_PREFIX)
        .to_string();

    Ok((
        headers,
        Json(DataResponse::with_notice(
            LoginResult {
                user: reply.data,
                redirect,
            },
            reply.notice,
        )),
    ))
}

/// POST /auth/logout
///
/// Always clears the cookies, even when the backend call fails.
pub async fn logout(
    State(state): State<AppState>,
    request_headers: HeaderMap,
) -> (HeaderMap, Json<DataResponse<LogoutResult>>) {
    let token = cookies::auth_token(&request_headers);
    if token.is_some() {
        state.backend_for(token.as_deref()).logout().await;
    }

    let mut headers = HeaderMap::new();
    cookies::clear_session(&mut headers);

    (
        headers,
        Json(DataResponse::with_notice(
            LogoutResult {
                redirect: LOGIN_PATH,
            },
            Some(Notice::info("Anda telah keluar")),
        )),
    )
}

/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<DataResponse<CurrentUser>>> {
    let token = cookies::auth_token(&headers);
    let user = state.backend_for(token.as_deref()).me().await?;
    Ok(Json(DataResponse::new(user)))
}
