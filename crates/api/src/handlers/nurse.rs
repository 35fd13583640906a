//! Handlers for the nurse dashboard (`/dashboard/nurse`).

use axum::extract::{Path, Query};
use axum::Json;
use klinik_core::nurse::{NurseStats, PhysicalExamination, PhysicalExaminationUpdate};
use klinik_core::screening::ListParams;
use klinik_core::types::DbId;
use serde::Serialize;
use serde_json::Value;

use super::admin::replied;
use crate::error::AppResult;
use crate::middleware::rbac::RequireNurse;
use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct NurseDashboard {
    pub overview: Value,
    pub waiting_list: Value,
}

/// GET /dashboard/nurse
pub async fn dashboard(
    RequireNurse(user): RequireNurse,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<NurseDashboard>>> {
    let params = params.normalized();
    let (overview, waiting_list) = tokio::join!(
        user.backend.nurse_overview(),
        user.backend.nurse_waiting_list(&params),
    );

    Ok(Json(DataResponse::new(NurseDashboard {
        overview: overview?,
        waiting_list: waiting_list?,
    })))
}

/// POST /dashboard/nurse/examinations
///
/// The examining nurse is the signed-in user when the backend reports an id.
pub async fn submit_examination(
    RequireNurse(user): RequireNurse,
    Json(body): Json<PhysicalExamination>,
) -> AppResult<Json<DataResponse<Value>>> {
    let mut exam = body.normalized();
    if let Some(id) = user.user.id {
        exam.paramedis_id = id;
    }

    let reply = user.backend.submit_physical_examination(&exam).await?;
    tracing::info!(
        patient_id = exam.patient_id,
        paramedis_id = exam.paramedis_id,
        status = ?exam.health_status,
        "Physical examination submitted"
    );
    Ok(replied(reply))
}

/// PUT /dashboard/nurse/examinations/{id}
pub async fn update_examination(
    RequireNurse(user): RequireNurse,
    Path(id): Path<DbId>,
    Json(body): Json<PhysicalExaminationUpdate>,
) -> AppResult<Json<DataResponse<Value>>> {
    Ok(replied(user.backend.update_physical_examination(id, &body).await?))
}

/// POST /dashboard/nurse/ai-analysis
pub async fn ai_analysis(
    RequireNurse(user): RequireNurse,
    Json(stats): Json<NurseStats>,
) -> AppResult<Json<DataResponse<Value>>> {
    Ok(replied(user.backend.request_ai_analysis(&stats).await?))
}
