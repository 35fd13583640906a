//! Integration tests for login, logout and the who-am-i endpoint.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::{get, post};
use axum::{body::Body, Json, Router};
use common::{body_json, post_json, set_cookies};
use serde_json::{json, Value};

fn auth_backend() -> Router {
    async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["password"] == "rahasia123" {
            (
                StatusCode::OK,
                Json(json!({
                    "message": "Login berhasil",
                    "token": "tok-42",
                    "user": { "id": 42, "name": "Sari", "email": body["email"], "role": "cashier" }
                })),
            )
        } else {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Email atau password salah" })),
            )
        }
    }

    async fn me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
        match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
            Some("Bearer tok-42") => (
                StatusCode::OK,
                Json(json!({ "id": 42, "name": "Sari", "role": "cashier" })),
            ),
            _ => (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthenticated." }))),
        }
    }

    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(|| async { Json(json!({ "message": "Logged out" })) }))
        .route("/me", get(me))
}

// ---------------------------------------------------------------------------
// Test: successful login sets both session cookies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_sets_session_cookies() {
    let backend = common::spawn_upstream(auth_backend()).await;
    let app = common::build_test_app(&backend, common::DEAD_UPSTREAM);

    let response = post_json(
        app,
        "/auth/login",
        json!({ "email": "sari@klinik.id", "password": "rahasia123" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert!(cookies
        .iter()
        .any(|c| c.starts_with("auth_token=tok-42;") && c.contains("HttpOnly")));
    assert!(cookies.iter().any(|c| c.starts_with("user_role=cashier;")));

    let json = body_json(response).await;
    assert_eq!(json["data"]["redirect"], "/dashboard/cashier");
    assert_eq!(json["data"]["user"]["role"], "cashier");
    assert_eq!(json["notice"]["level"], "success");
    assert_eq!(json["notice"]["message"], "Login berhasil");
}

// ---------------------------------------------------------------------------
// Test: a wrong password is not treated as an expired session
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wrong_password_keeps_backend_message() {
    let backend = common::spawn_upstream(auth_backend()).await;
    let app = common::build_test_app(&backend, common::DEAD_UPSTREAM);

    let response = post_json(
        app,
        "/auth/login",
        json!({ "email": "sari@klinik.id", "password": "salah" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&response).is_empty());

    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert_eq!(json["error"], "Email atau password salah");
    assert!(json.get("redirect").is_none());
}

#[tokio::test]
async fn login_requires_both_fields() {
    let app = common::build_offline_app();
    let response = post_json(app, "/auth/login", json!({ "email": " ", "password": "" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: logout always clears the cookies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logout_clears_cookies_even_offline() {
    let app = common::build_offline_app();
    let request = Request::post("/auth/logout")
        .header("cookie", "auth_token=tok-42; user_role=cashier")
        .body(Body::empty())
        .unwrap();

    let response = common::send(app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));

    let json = body_json(response).await;
    assert_eq!(json["data"]["redirect"], "/auth/login");
}

// ---------------------------------------------------------------------------
// Test: /api/me uses the cookie token
// ---------------------------------------------------------------------------

#[tokio::test]
async fn me_reports_cookie_user() {
    let backend = common::spawn_upstream(auth_backend()).await;
    let app = common::build_test_app(&backend, common::DEAD_UPSTREAM);

    let response = common::get_with_cookie(app, "/api/me", "auth_token=tok-42").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], 42);
    assert_eq!(json["data"]["role"], "cashier");
}

#[tokio::test]
async fn me_without_session_is_expired() {
    let backend = common::spawn_upstream(auth_backend()).await;
    let app = common::build_test_app(&backend, common::DEAD_UPSTREAM);

    let response = common::get(app, "/api/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "SESSION_EXPIRED");
}
