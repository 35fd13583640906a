//! Handlers for the cashier dashboard (`/dashboard/cashier`).

use axum::extract::{Multipart, Query};
use axum::Json;
use klinik_core::export::Download;
use klinik_core::payment::{AmountService, PaymentReportRequest};
use klinik_core::screening::ListParams;
use serde::Serialize;
use serde_json::Value;

use super::admin::replied;
use crate::error::AppResult;
use crate::middleware::rbac::RequireCashier;
use crate::response::{Attachment, DataResponse};
use crate::upload::MultipartForm;

#[derive(Debug, Serialize)]
pub struct CashierDashboard {
    /// Screenings waiting for payment.
    pub payments: Value,
    pub amount_services: Vec<AmountService>,
}

/// GET /dashboard/cashier
pub async fn dashboard(
    RequireCashier(user): RequireCashier,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<CashierDashboard>>> {
    let params = params.normalized();
    let (payments, amount_services) = tokio::join!(
        user.backend.screenings_payment(&params),
        user.backend.amount_services(),
    );

    Ok(Json(DataResponse::new(CashierDashboard {
        payments: payments?,
        amount_services: amount_services?,
    })))
}

/// POST /dashboard/cashier/payments
///
/// The multipart body (payment fields and proof of payment) is forwarded
/// as received.
pub async fn submit_payment(
    RequireCashier(user): RequireCashier,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Value>>> {
    let form = MultipartForm::read(multipart).await?;
    tracing::debug!(fields = form.fields.len(), files = form.files.len(), "Forwarding payment");
    Ok(replied(user.backend.submit_payment(form.into_reqwest()).await?))
}

/// GET /dashboard/cashier/report?period_type=&format=&start_date=&end_date=
pub async fn report(
    RequireCashier(user): RequireCashier,
    Query(request): Query<PaymentReportRequest>,
) -> AppResult<Attachment> {
    let raw = user.backend.payment_report(&request).await?;
    tracing::info!(
        period = request.period_type.as_str(),
        format = request.format.as_str(),
        bytes = raw.body.len(),
        "Payment report downloaded"
    );
    Ok(Attachment {
        download: Download::payment_report(request.format),
        body: raw.body,
    })
}
