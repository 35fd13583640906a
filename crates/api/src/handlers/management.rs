//! Handlers for the shared management pages (`/dashboard/management`),
//! open to every staff role.

use axum::extract::{Path, Query};
use axum::Json;
use klinik_core::management::ChartParams;
use klinik_core::nurse::ActivityParams;
use klinik_core::screening::{ListParams, Paginated, ScreeningAnalysis};
use serde_json::Value;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;

/// GET /dashboard/management/activity/cashier
pub async fn cashier_activity(
    RequireStaff(user): RequireStaff,
    Query(params): Query<ActivityParams>,
) -> AppResult<Json<DataResponse<Paginated<Value>>>> {
    let page = user.backend.payment_activities(&params).await?;
    Ok(Json(DataResponse::new(page)))
}

/// GET /dashboard/management/activity/nurse
pub async fn nurse_activity(
    RequireStaff(user): RequireStaff,
    Query(params): Query<ActivityParams>,
) -> AppResult<Json<DataResponse<Paginated<Value>>>> {
    let page = user.backend.examination_activities(&params).await?;
    Ok(Json(DataResponse::new(page)))
}

/// GET /dashboard/management/analysis
///
/// Never fails on the backend side; an unavailable analysis is empty.
pub async fn analysis(RequireStaff(user): RequireStaff) -> Json<DataResponse<ScreeningAnalysis>> {
    Json(DataResponse::new(user.backend.screening_analysis().await))
}

/// GET /dashboard/management/users
pub async fn users(
    RequireStaff(user): RequireStaff,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Paginated<Value>>>> {
    let page = user.backend.user_information(&params.normalized()).await?;
    Ok(Json(DataResponse::new(page)))
}

/// GET /dashboard/management/users/chart
pub async fn users_chart(
    RequireStaff(user): RequireStaff,
    Query(params): Query<ChartParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let chart = user.backend.user_information_chart(&params).await?;
    Ok(Json(DataResponse::new(chart)))
}

/// GET /dashboard/management/screenings
pub async fn screenings(
    RequireStaff(user): RequireStaff,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let list = user.backend.screenings(&params.normalized()).await?;
    Ok(Json(DataResponse::new(list)))
}

/// GET /dashboard/management/screenings/archive
pub async fn screenings_archive(
    RequireStaff(user): RequireStaff,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let list = user.backend.screenings_archive(&params.normalized()).await?;
    Ok(Json(DataResponse::new(list)))
}

/// GET /dashboard/management/screenings/completed
pub async fn screenings_completed(
    RequireStaff(user): RequireStaff,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Value>>> {
    let list = user.backend.screenings_completed(&params.normalized()).await?;
    Ok(Json(DataResponse::new(list)))
}

/// GET /dashboard/management/screenings/detail/{uuid}
pub async fn screening_detail(
    RequireStaff(user): RequireStaff,
    Path(uuid): Path<String>,
) -> AppResult<Json<DataResponse<Value>>> {
    let detail = user.backend.screening_detail(&uuid).await?;
    Ok(Json(DataResponse::new(detail)))
}
