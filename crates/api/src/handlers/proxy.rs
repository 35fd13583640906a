//! Pass-through proxies to the primary backend and the OCR service.
//!
//! Method, path, query, headers and body are forwarded unchanged; the
//! upstream status, headers and body come back unchanged. Only hop-by-hop
//! headers are dropped, plus the browser's `Cookie` on the way up.

use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::header::{self, HeaderName};
use axum::http::HeaderMap;
use axum::response::Response;
use klinik_client::ClientError;
use klinik_core::locale::{Locale, Message};

use crate::cookies;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Headers that describe one connection and are never forwarded.
const HOP_BY_HOP: &[HeaderName] = &[
    header::CONNECTION,
    header::HOST,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::TE,
    header::TRAILER,
    header::UPGRADE,
    header::PROXY_AUTHORIZATION,
    header::PROXY_AUTHENTICATE,
];

/// ANY /api/proxy/{*path}
///
/// A request without an `Authorization` header is sent with the
/// `auth_token` cookie as its bearer token.
pub async fn backend(
    State(state): State<AppState>,
    Path(path): Path<String>,
    request: Request,
) -> AppResult<Response> {
    let bearer = cookies::auth_token(request.headers());
    forward(&state, &state.config.backend_url, &path, bearer, request).await
}

/// ANY /api/python-proxy/{*path}
pub async fn ocr(
    State(state): State<AppState>,
    Path(path): Path<String>,
    request: Request,
) -> AppResult<Response> {
    forward(&state, &state.config.ocr_url, &path, None, request).await
}

async fn forward(
    state: &AppState,
    base_url: &str,
    path: &str,
    bearer: Option<String>,
    request: Request,
) -> AppResult<Response> {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, state.config.max_body_bytes)
        .await
        .map_err(|e| AppError::BadRequest(format!("Request body rejected: {e}")))?;

    let mut url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    if let Some(query) = parts.uri.query() {
        url.push('?');
        url.push_str(query);
    }

    let mut headers = forwardable(&parts.headers);
    headers.remove(header::COOKIE);
    if let Some(token) = bearer.filter(|_| !headers.contains_key(header::AUTHORIZATION)) {
        let value = format!("Bearer {token}")
            .parse()
            .map_err(|_| AppError::BadRequest("Invalid session cookie".to_string()))?;
        headers.insert(header::AUTHORIZATION, value);
    }

    let upstream = state
        .http
        .request(parts.method.clone(), &url)
        .headers(headers)
        .body(body)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(method = %parts.method, url = %url, error = %e, "Proxy upstream unreachable");
            AppError::Client(ClientError::Unreachable {
                message: Message::ServerUnreachable.text(Locale::Id).to_string(),
            })
        })?;

    let status = upstream.status();
    let response_headers = forwardable(upstream.headers());
    let bytes = upstream.bytes().await.map_err(|e| {
        tracing::warn!(url = %url, error = %e, "Proxy upstream response interrupted");
        AppError::Client(ClientError::Unreachable {
            message: Message::ServerUnreachable.text(Locale::Id).to_string(),
        })
    })?;

    tracing::debug!(method = %parts.method, url = %url, status = status.as_u16(), "Proxied request");

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    Ok(response)
}

/// Copy of `headers` without the hop-by-hop ones.
fn forwardable(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| !HOP_BY_HOP.contains(*name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn hop_by_hop_headers_are_dropped() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let kept = forwardable(&headers);
        assert_eq!(kept.len(), 1);
        assert!(kept.contains_key(header::ACCEPT));
    }

    #[test]
    fn upstream_set_cookies_are_all_kept() {
        let mut headers = HeaderMap::new();
        headers.append(header::SET_COOKIE, HeaderValue::from_static("a=1"));
        headers.append(header::SET_COOKIE, HeaderValue::from_static("b=2"));

        let kept = forwardable(&headers);
        assert_eq!(kept.get_all(header::SET_COOKIE).iter().count(), 2);
    }
}
