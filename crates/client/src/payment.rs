use klinik_core::nurse::ActivityParams;
use klinik_core::payment::{AmountService, PaymentReportRequest};
use klinik_core::screening::{Envelope, Paginated};
use reqwest::multipart::Form;
use reqwest::Method;
use serde_json::Value;

use crate::backend::{text_form, BackendClient, RawReply, Reply, NO_QUERY};
use crate::error::ClientError;

impl BackendClient {
    /// `GET /amount`: priced services, unwrapped from the envelope.
    pub async fn amount_services(&self) -> Result<Vec<AmountService>, ClientError> {
        let env: Envelope<Vec<AmountService>> = self.get_json("/amount", NO_QUERY).await?;
        Ok(env.data)
    }

    /// `POST /screening/payment/service`. The form is built by the caller
    /// (fields and proof-of-payment file).
    pub async fn submit_payment(&self, form: Form) -> Result<Reply<Value>, ClientError> {
        self.post_multipart("/screening/payment/service", form).await
    }

    /// `GET /management/activity/cashier`, returned as `{ status, data, meta }`.
    pub async fn payment_activities(
        &self,
        params: &ActivityParams,
    ) -> Result<Paginated<Value>, ClientError> {
        let env: Envelope<Vec<Value>> = self
            .get_json("/management/activity/cashier", params)
            .await?;
        Ok(Paginated {
            data: env.data,
            meta: env.meta.unwrap_or(Value::Null),
        })
    }

    /// `POST /screening/cashier/office`: the report file as raw bytes.
    /// The request is validated before anything is sent.
    pub async fn payment_report(&self, request: &PaymentReportRequest) -> Result<RawReply, ClientError> {
        request.validate()?;

        let path = "/screening/cashier/office";
        let req = self
            .request(Method::POST, path)
            .multipart(text_form(request.form_fields()));
        self.execute(&Method::POST, path, req).await
    }
}
