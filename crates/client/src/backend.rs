//! HTTP client for the primary backend.
//!
//! Every call goes through [`BackendClient::execute`], which attaches the
//! bearer token, classifies failures into [`ClientError`] and, for
//! mutating requests, produces the success [`Notice`].

use std::sync::Arc;

use klinik_core::locale::Locale;
use klinik_core::notice::{classify_failure, success_notice, Failure, Notice};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ClientError;
use crate::session::Session;

/// Path fragment identifying the login call, which is exempt from session
/// expiry handling.
const LOGIN_ENDPOINT: &str = "/auth/login";

/// Query string for calls without parameters.
pub const NO_QUERY: &[(&str, &str)] = &[];

/// A decoded response plus the notice the call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub data: T,
    pub notice: Option<Notice>,
}

impl<T> Reply<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reply<U> {
        Reply {
            data: f(self.data),
            notice: self.notice,
        }
    }
}

/// An undecoded 2xx response.
#[derive(Debug, Clone)]
pub struct RawReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    pub notice: Option<Notice>,
}

impl RawReply {
    /// Decode the body as JSON. An empty body decodes as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        let bytes: &[u8] = if self.body.is_empty() { b"null" } else { &self.body };
        serde_json::from_slice(bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub fn into_reply<T: DeserializeOwned>(self) -> Result<Reply<T>, ClientError> {
        let data = self.json()?;
        Ok(Reply {
            data,
            notice: self.notice,
        })
    }
}

/// Client for the primary backend. Cheap to clone; clones share the
/// connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    session: Arc<Session>,
    locale: Locale,
}

impl BackendClient {
    /// * `base_url` - e.g. `http://localhost:9000/api/v1`; a trailing slash
    ///   is ignored.
    pub fn new(http: reqwest::Client, base_url: impl AsRef<str>) -> Self {
        Self {
            http,
            base_url: Arc::from(base_url.as_ref().trim_end_matches('/')),
            session: Arc::new(Session::new()),
            locale: Locale::Id,
        }
    }

    /// A client for one caller's token, sharing this client's pool.
    pub fn with_token(&self, token: Option<&str>) -> Self {
        let session = match token.filter(|t| !t.is_empty()) {
            Some(t) => Session::with_token(t),
            None => Session::new(),
        };
        Self {
            http: self.http.clone(),
            base_url: Arc::clone(&self.base_url),
            session: Arc::new(session),
            locale: self.locale,
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request with the JSON accept header and, when a session
    /// token exists, `Authorization: Bearer`.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self
            .http
            .request(method, self.url(path))
            .header(ACCEPT, "application/json");
        if let Some(token) = self.session.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Send a prepared request and apply the interception rules.
    pub async fn execute(
        &self,
        method: &Method,
        path: &str,
        req: RequestBuilder,
    ) -> Result<RawReply, ClientError> {
        let response = match req.send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(%method, path, error = %e, "Backend unreachable");
                return Err(classify_failure(None, None, false, self.locale).into());
            }
        };

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = match response.bytes().await {
            Ok(b) => b.to_vec(),
            Err(e) => {
                tracing::warn!(%method, path, error = %e, "Backend response interrupted");
                return Err(classify_failure(None, None, false, self.locale).into());
            }
        };

        let json: Option<Value> = serde_json::from_slice(&body).ok();

        if !status.is_success() {
            let failure = classify_failure(
                Some(status.as_u16()),
                json.as_ref(),
                path.contains(LOGIN_ENDPOINT),
                self.locale,
            );
            if matches!(failure, Failure::SessionExpired { .. }) {
                self.session.clear();
                tracing::info!(%method, path, "Backend session expired, credentials cleared");
            } else {
                tracing::warn!(%method, path, status = status.as_u16(), "Backend call failed");
            }
            return Err(failure.into());
        }

        tracing::debug!(%method, path, status = status.as_u16(), "Backend call succeeded");

        Ok(RawReply {
            status: status.as_u16(),
            content_type,
            notice: success_notice(method.as_str(), json.as_ref(), self.locale),
            body,
        })
    }

    // ---- typed helpers ----

    pub async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let req = self.request(Method::GET, path).query(query);
        self.execute(&Method::GET, path, req).await?.json()
    }

    pub async fn get_bytes<Q>(&self, path: &str, query: &Q) -> Result<RawReply, ClientError>
    where
        Q: Serialize + ?Sized,
    {
        let req = self.request(Method::GET, path).query(query);
        self.execute(&Method::GET, path, req).await
    }

    pub async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Reply<T>, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut req = self.request(method.clone(), path);
        if let Some(body) = body {
            req = req.json(body);
        }
        self.execute(&method, path, req).await?.into_reply()
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Reply<T>, ClientError> {
        let req = self.request(Method::POST, path).multipart(form);
        self.execute(&Method::POST, path, req).await?.into_reply()
    }
}

/// Build a multipart form from ordered text fields.
pub fn text_form<I, K, V>(fields: I) -> reqwest::multipart::Form
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    fields
        .into_iter()
        .fold(reqwest::multipart::Form::new(), |form, (k, v)| {
            form.text(k.into(), v.into())
        })
}
