//! Handlers for the admin dashboard (`/dashboard/admin`).

use axum::extract::{Path, Query};
use axum::Json;
use klinik_client::Reply;
use klinik_core::management::{AmountServiceInput, Mountain, NewMountain, NewQuestion, NewStaff, QuestionQuery};
use klinik_core::payment::AmountService;
use klinik_core::screening::{ListParams, Paginated};
use klinik_core::types::DbId;
use serde::Serialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;

#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub staff: Paginated<Value>,
    pub amount_services: Vec<AmountService>,
    pub mountains: Vec<Mountain>,
    /// Backend build information; absent when the backend does not report it.
    pub version: Option<Value>,
}

/// Wrap a mutating call's reply with its notice.
pub(crate) fn replied<T: Serialize>(reply: Reply<T>) -> Json<DataResponse<T>> {
    Json(DataResponse::with_notice(reply.data, reply.notice))
}

/// GET /dashboard/admin
pub async fn dashboard(
    RequireAdmin(user): RequireAdmin,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<AdminDashboard>>> {
    let backend = &user.backend;
    let params = params.normalized();

    let (staff, amount_services, mountains, version) = tokio::join!(
        backend.staff(&params),
        backend.amount_services(),
        backend.mountains(),
        backend.version(),
    );

    let version = version
        .inspect_err(|e| tracing::warn!(error = %e, "Backend version unavailable"))
        .ok();

    Ok(Json(DataResponse::new(AdminDashboard {
        staff: staff?,
        amount_services: amount_services?,
        mountains: mountains?,
        version,
    })))
}

/// POST /dashboard/admin/staff
pub async fn create_staff(
    RequireAdmin(user): RequireAdmin,
    Json(body): Json<NewStaff>,
) -> AppResult<Json<DataResponse<Value>>> {
    let reply = user.backend.create_staff(&body).await?;
    tracing::info!(role = %body.role, "Staff account created");
    Ok(replied(reply))
}

/// POST /dashboard/admin/amount-services
pub async fn create_amount_service(
    RequireAdmin(user): RequireAdmin,
    Json(body): Json<AmountServiceInput>,
) -> AppResult<Json<DataResponse<Value>>> {
    Ok(replied(user.backend.create_amount_service(&body).await?))
}

/// PUT /dashboard/admin/amount-services/{id}
pub async fn update_amount_service(
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
    Json(body): Json<AmountServiceInput>,
) -> AppResult<Json<DataResponse<Value>>> {
    Ok(replied(user.backend.update_amount_service(id, &body).await?))
}

/// DELETE /dashboard/admin/amount-services/{id}
pub async fn delete_amount_service(
    RequireAdmin(user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Value>>> {
    Ok(replied(user.backend.delete_amount_service(id).await?))
}

/// POST /dashboard/admin/mountains
pub async fn create_mountain(
    RequireAdmin(user): RequireAdmin,
    Json(body): Json<NewMountain>,
) -> AppResult<Json<DataResponse<Value>>> {
    Ok(replied(user.backend.create_mountain(&body.name).await?))
}

/// GET /dashboard/admin/questions?mountain_id=&locale=
pub async fn questions(
    RequireAdmin(user): RequireAdmin,
    Query(query): Query<QuestionQuery>,
) -> AppResult<Json<DataResponse<Value>>> {
    let questions = user.backend.questions_by_locale(&query).await?;
    Ok(Json(DataResponse::new(questions)))
}

/// POST /dashboard/admin/questions
pub async fn create_question(
    RequireAdmin(user): RequireAdmin,
    Json(body): Json<NewQuestion>,
) -> AppResult<Json<DataResponse<Value>>> {
    Ok(replied(user.backend.create_question(&body).await?))
}
