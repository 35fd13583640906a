use klinik_core::nurse::{ActivityParams, NurseStats, PhysicalExamination, PhysicalExaminationUpdate};
use klinik_core::screening::{ListParams, Paginated};
use klinik_core::types::DbId;
use reqwest::Method;
use serde_json::Value;

use crate::backend::{BackendClient, Reply, NO_QUERY};
use crate::error::ClientError;

impl BackendClient {
    pub async fn nurse_overview(&self) -> Result<Value, ClientError> {
        self.get_json("/nurse/overview", NO_QUERY).await
    }

    pub async fn nurse_waiting_list(&self, params: &ListParams) -> Result<Value, ClientError> {
        self.get_json("/nurse/waiting-list", params).await
    }

    /// `POST /nurse/ai-analysis` with the dashboard counters.
    pub async fn request_ai_analysis(&self, stats: &NurseStats) -> Result<Reply<Value>, ClientError> {
        self.send_json(Method::POST, "/nurse/ai-analysis", Some(stats))
            .await
    }

    pub async fn submit_physical_examination(
        &self,
        exam: &PhysicalExamination,
    ) -> Result<Reply<Value>, ClientError> {
        self.send_json(Method::POST, "/screening/physical-examination", Some(exam))
            .await
    }

    pub async fn update_physical_examination(
        &self,
        id: DbId,
        update: &PhysicalExaminationUpdate,
    ) -> Result<Reply<Value>, ClientError> {
        self.send_json(
            Method::PUT,
            &format!("/screening/update/patient/physical-examination/{id}"),
            Some(update),
        )
        .await
    }

    /// `GET /management/activity/nurse`. The backend puts pagination keys
    /// next to `data`; they are gathered into `meta`.
    pub async fn examination_activities(
        &self,
        params: &ActivityParams,
    ) -> Result<Paginated<Value>, ClientError> {
        let body: Value = self.get_json("/management/activity/nurse", params).await?;
        split_paginator(body)
    }
}

/// Split a Laravel paginator object (`{ data, current_page, ... }`) into
/// rows and the remaining keys.
pub(crate) fn split_paginator(body: Value) -> Result<Paginated<Value>, ClientError> {
    let Value::Object(mut map) = body else {
        return Err(ClientError::Decode("expected a paginated object".into()));
    };
    let data = match map.remove("data") {
        Some(Value::Array(rows)) => rows,
        Some(Value::Null) | None => Vec::new(),
        Some(_) => return Err(ClientError::Decode("paginated data is not a list".into())),
    };
    Ok(Paginated {
        data,
        meta: Value::Object(map),
    })
}
