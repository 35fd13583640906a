//! Handlers for the doctor dashboard (`/dashboard/doctor`).

use axum::extract::{Path, Query};
use axum::Json;
use klinik_client::ClientError;
use klinik_core::export::Download;
use klinik_core::screening::{detail_fields, record_answer_rows, AnswerRow, DetailField, ListParams};
use klinik_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::admin::replied;
use crate::error::AppResult;
use crate::middleware::rbac::RequireDoctor;
use crate::response::{Attachment, DataResponse};

/// A screening with its fields and answers ready for display.
#[derive(Debug, Serialize)]
pub struct ScreeningDetail {
    pub screening: Value,
    pub fields: Vec<DetailField>,
    pub answers: Vec<AnswerRow>,
}

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerUpdate {
    pub answer: String,
}

/// GET /dashboard/doctor
pub async fn dashboard(
    RequireDoctor(user): RequireDoctor,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let list = user.backend.screenings_carstensz(&params.normalized()).await?;
    Ok(Json(DataResponse::new(list)))
}

/// GET /dashboard/doctor/detail/{uuid}
///
/// The record may arrive bare or wrapped in `data`.
pub async fn detail(
    RequireDoctor(user): RequireDoctor,
    Path(uuid): Path<String>,
) -> AppResult<Json<DataResponse<ScreeningDetail>>> {
    let body = user.backend.screening_detail_carstensz(&uuid).await?;
    let record = match body.get("data") {
        Some(inner) if inner.is_object() => inner.clone(),
        _ => body,
    };

    let answers = record_answer_rows(&record).map_err(|e| {
        tracing::warn!(uuid = %uuid, error = %e, "Screening answers could not be read");
        ClientError::Decode(format!("screening answers: {e}"))
    })?;

    Ok(Json(DataResponse::new(ScreeningDetail {
        fields: detail_fields(&record),
        answers,
        screening: record,
    })))
}

/// GET /dashboard/doctor/export?search=
pub async fn export(
    RequireDoctor(user): RequireDoctor,
    Query(params): Query<ExportParams>,
) -> AppResult<Attachment> {
    let raw = user
        .backend
        .export_screenings_csv(params.search.as_deref())
        .await?;
    Ok(Attachment {
        download: Download::screenings_csv(chrono::Utc::now().date_naive()),
        body: raw.body,
    })
}

/// PUT /dashboard/doctor/answers/{id}
pub async fn update_answer(
    RequireDoctor(user): RequireDoctor,
    Path(id): Path<DbId>,
    Json(body): Json<AnswerUpdate>,
) -> AppResult<Json<DataResponse<Value>>> {
    Ok(replied(user.backend.update_answer(id, &body.answer).await?))
}

/// PUT /dashboard/doctor/patients/{uuid}
pub async fn update_patient(
    RequireDoctor(user): RequireDoctor,
    Path(uuid): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<Json<DataResponse<Value>>> {
    Ok(replied(user.backend.update_patient(&uuid, &body).await?))
}
