//! Integration tests for the public screening flows.

mod common;

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use common::{body_json, post_multipart, FilePart};
use serde_json::{json, Value};

const PATIENT_UUID: &str = "3f1c2a9e-5b7d-4e21-8c3a-1d9e0f6b2a44";

/// Multipart field names and file names the fake backend received.
type Received = Arc<Mutex<Vec<String>>>;

fn screening_backend(received: Received) -> Router {
    async fn store(State(received): State<Received>, mut multipart: Multipart) -> Json<Value> {
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let entry = match field.file_name() {
                Some(file) => format!("{name}={file}"),
                None => format!("{name}={}", field.text().await.unwrap()),
            };
            received.lock().unwrap().push(entry);
        }
        Json(json!({
            "status": "success",
            "message": "Data berhasil disimpan",
            "data": { "patient": { "uuid": PATIENT_UUID } }
        }))
    }

    Router::new()
        .route("/screening", post(store))
        .route("/screening/cartensz", post(store))
        .route(
            "/screenings/questionnaires",
            get(|| async {
                Json(json!({ "data": [
                    { "id": 1, "question": "Apakah Anda memiliki riwayat asma?", "type": "select",
                      "options": [{ "id": 1, "text": "Ya" }, { "id": 2, "text": "Tidak" }] }
                ] }))
            }),
        )
        .with_state(received)
}

fn complete_citizen() -> Vec<(&'static str, &'static str)> {
    vec![
        ("nik", "3507123456780001"),
        ("name", "Budi Santoso"),
        ("place_of_birth", "Malang"),
        ("date_of_birth", "1990-04-12"),
        ("gender", "laki-laki"),
        ("address", "Jl. Ijen 10"),
        ("email", "budi@example.id"),
        ("contact", "081234567890"),
    ]
}

// ---------------------------------------------------------------------------
// Test: the form lists the questionnaire
// ---------------------------------------------------------------------------

#[tokio::test]
async fn form_lists_questions() {
    let backend = common::spawn_upstream(screening_backend(Received::default())).await;
    let app = common::build_test_app(&backend, common::DEAD_UPSTREAM);

    let response = common::get(app, "/screening/form").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["questions"][0]["id"], 1);
    assert_eq!(json["data"]["image_field"], "ktp_images");
    assert!(json.get("notice").is_none());
}

#[tokio::test]
async fn form_without_questionnaire_carries_notice() {
    let app = common::build_offline_app();
    let response = common::get(app, "/screening/form").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["questions"], json!([]));
    assert_eq!(json["notice"]["level"], "error");
    assert_eq!(
        json["notice"]["message"],
        "Gagal memuat kuesioner. Silakan refresh halaman."
    );
}

// ---------------------------------------------------------------------------
// Test: incomplete forms never reach the backend
// ---------------------------------------------------------------------------

#[tokio::test]
async fn incomplete_citizen_form_lists_missing_fields() {
    let received = Received::default();
    let backend = common::spawn_upstream(screening_backend(received.clone())).await;
    let app = common::build_test_app(&backend, common::DEAD_UPSTREAM);

    let response = post_multipart(
        app,
        "/screening/form",
        &[("nik", "3507123456780001"), ("name", "Budi Santoso")],
        &[],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["error"],
        "Silakan lengkapi data: Tempat Lahir, Tanggal Lahir, Jenis Kelamin, Alamat, Email, Nomor Telepon"
    );
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_answers_are_rejected() {
    let app = common::build_offline_app();
    let mut fields = complete_citizen();
    fields.push(("answers", "{not json"));

    let response = post_multipart(app, "/screening/form", &fields, &[]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Test: a complete submission is forwarded and redirected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn citizen_submit_forwards_form_and_redirects() {
    let received = Received::default();
    let backend = common::spawn_upstream(screening_backend(received.clone())).await;
    let app = common::build_test_app(&backend, common::DEAD_UPSTREAM);

    let mut fields = complete_citizen();
    fields.push(("answers", r#"[{"questioner_id":1,"answer":"Ya"}]"#));
    let photo = FilePart {
        field: "ktp_images",
        file_name: "ktp.jpg",
        content_type: "image/jpeg",
        bytes: b"jpeg-bytes",
    };

    let response = post_multipart(app, "/screening/form", &fields, &[photo]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["uuid"], PATIENT_UUID);
    assert_eq!(
        json["data"]["redirect"],
        format!("/screening/success/{PATIENT_UUID}")
    );
    assert_eq!(json["notice"]["message"], "Data berhasil disimpan");

    let received = received.lock().unwrap();
    assert!(received.contains(&"nik=3507123456780001".to_string()));
    assert!(received.contains(&"ktp_images=ktp.jpg".to_string()));
    assert!(received.contains(&r#"answers=[{"questioner_id":1,"answer":"Ya"}]"#.to_string()));
}

#[tokio::test]
async fn answers_keyed_by_question_are_forwarded_as_array() {
    let received = Received::default();
    let backend = common::spawn_upstream(screening_backend(received.clone())).await;
    let app = common::build_test_app(&backend, common::DEAD_UPSTREAM);

    let mut fields = complete_citizen();
    fields.push(("answers", r#"{"2":"Tidak"}"#));

    let response = post_multipart(app, "/screening/form", &fields, &[]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let received = received.lock().unwrap();
    assert!(received.contains(&r#"answers=[{"questioner_id":2,"answer":"Tidak"}]"#.to_string()));
}

#[tokio::test]
async fn carstensz_submit_redirects_to_thanks() {
    let backend = common::spawn_upstream(screening_backend(Received::default())).await;
    let app = common::build_test_app(&backend, common::DEAD_UPSTREAM);

    let fields = [
        ("passport_number", "C01X00T47"),
        ("name", "Anna Schmidt"),
        ("date_of_birth", "1988-09-30"),
        ("gender", "female"),
        ("email", "anna@example.de"),
    ];
    let response = post_multipart(app, "/carstensz/form", &fields, &[]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["redirect"], "/carstensz/thanks");
}

#[tokio::test]
async fn carstensz_validation_is_english() {
    let app = common::build_offline_app();
    let response = post_multipart(app, "/carstensz/form", &[("name", "Anna")], &[]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Please complete the data Passport number, Date Of Birth, Gender, Email"
    );
}

#[tokio::test]
async fn submit_without_uuid_is_a_failure() {
    let backend = common::spawn_upstream(Router::new().route(
        "/screening",
        post(|| async { Json(json!({ "status": "error", "message": "Duplikat NIK" })) }),
    ))
    .await;
    let app = common::build_test_app(&backend, common::DEAD_UPSTREAM);

    let response = post_multipart(app, "/screening/form", &complete_citizen(), &[]).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Gagal mengirim data. Silakan coba lagi.");
}

// ---------------------------------------------------------------------------
// Test: success pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_patient_reads_not_found() {
    let backend = common::spawn_upstream(Router::new()).await;
    let app = common::build_test_app(&backend, common::DEAD_UPSTREAM);

    let response = common::get(app, "/screening/success/does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Data pasien tidak ditemukan.");
}

#[tokio::test]
async fn thanks_page_links_home() {
    let app = common::build_offline_app();
    let response = common::get(app, "/carstensz/thanks").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["home"], "/carstensz");
}
