//! Login, logout and the "who am I" call.

use klinik_core::types::DbId;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::backend::{BackendClient, Reply, NO_QUERY};
use crate::error::ClientError;

#[derive(Debug, Clone, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// The signed-in staff member as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
}

/// `{ token, user }` returned by `/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: CurrentUser,
}

impl BackendClient {
    /// `POST /auth/login`. On success the token and role are stored in
    /// this client's session.
    pub async fn login(&self, email: &str, password: &str) -> Result<Reply<CurrentUser>, ClientError> {
        let body = LoginBody { email, password };
        let reply: Reply<LoginResponse> = self
            .send_json(Method::POST, "/auth/login", Some(&body))
            .await?;

        self.session().set(&reply.data.token, &reply.data.user.role);
        tracing::info!(role = %reply.data.user.role, "Staff signed in");

        Ok(reply.map(|r| r.user))
    }

    /// `POST /auth/logout`. The session is cleared whatever the backend
    /// answers; a failed call is only logged.
    pub async fn logout(&self) {
        let result: Result<Reply<serde_json::Value>, ClientError> = self
            .send_json(Method::POST, "/auth/logout", None::<&()>)
            .await;
        if let Err(e) = result {
            tracing::warn!(error = %e, "Logout call failed");
        }
        self.session().clear();
    }

    /// `GET /me`.
    pub async fn me(&self) -> Result<CurrentUser, ClientError> {
        self.get_json("/me", NO_QUERY).await
    }
}
