use klinik_core::management::{
    AmountServiceInput, ChartParams, Mountain, NewMountain, NewQuestion, NewStaff, QuestionQuery,
};
use klinik_core::screening::{Envelope, ListParams, Paginated};
use klinik_core::types::DbId;
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;

use crate::backend::{BackendClient, Reply, NO_QUERY};
use crate::error::ClientError;
use crate::nurse::split_paginator;

/// `GET /screening/mountains` answers `{ mountain: [...] }`.
#[derive(Debug, Deserialize)]
struct MountainList {
    #[serde(default)]
    mountain: Vec<Mountain>,
}

impl BackendClient {
    pub async fn staff(&self, params: &ListParams) -> Result<Paginated<Value>, ClientError> {
        let env: Envelope<Vec<Value>> = self.get_json("/staff", params).await?;
        Ok(Paginated {
            data: env.data,
            meta: env.meta.unwrap_or(Value::Null),
        })
    }

    pub async fn create_staff(&self, staff: &NewStaff) -> Result<Reply<Value>, ClientError> {
        staff.check()?;
        self.send_json(Method::POST, "/staff", Some(staff)).await
    }

    /// `GET /user/information`. The Laravel paginator sits under `data`.
    pub async fn user_information(&self, params: &ListParams) -> Result<Paginated<Value>, ClientError> {
        let env: Envelope<Value> = self.get_json("/user/information", params).await?;
        split_paginator(env.data)
    }

    pub async fn user_information_chart(&self, params: &ChartParams) -> Result<Value, ClientError> {
        let env: Envelope<Value> = self.get_json("/user/information/chart", params).await?;
        Ok(env.data)
    }

    pub async fn create_amount_service(
        &self,
        input: &AmountServiceInput,
    ) -> Result<Reply<Value>, ClientError> {
        input.check()?;
        self.send_json(Method::POST, "/amount", Some(input)).await
    }

    pub async fn update_amount_service(
        &self,
        id: DbId,
        input: &AmountServiceInput,
    ) -> Result<Reply<Value>, ClientError> {
        input.check()?;
        self.send_json(
            Method::PUT,
            &format!("/admin/amount-services/{id}"),
            Some(input),
        )
        .await
    }

    pub async fn delete_amount_service(&self, id: DbId) -> Result<Reply<Value>, ClientError> {
        self.send_json(
            Method::DELETE,
            &format!("/admin/amount-services/{id}"),
            None::<&()>,
        )
        .await
    }

    /// `GET /version`: backend build information, passed through.
    pub async fn version(&self) -> Result<Value, ClientError> {
        self.get_json("/version", NO_QUERY).await
    }

    pub async fn mountains(&self) -> Result<Vec<Mountain>, ClientError> {
        let list: MountainList = self.get_json("/screening/mountains", NO_QUERY).await?;
        Ok(list.mountain)
    }

    pub async fn create_mountain(&self, name: &str) -> Result<Reply<Value>, ClientError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::Invalid("Nama gunung wajib diisi".into()));
        }
        let body = NewMountain {
            name: name.to_string(),
        };
        self.send_json(Method::POST, "/screening/mountains/new", Some(&body))
            .await
    }

    /// `GET /screening/questions/locale`, unwrapped from `{ data }`.
    pub async fn questions_by_locale(&self, query: &QuestionQuery) -> Result<Value, ClientError> {
        let env: Envelope<Value> = self
            .get_json("/screening/questions/locale", query)
            .await?;
        Ok(env.data)
    }

    pub async fn create_question(&self, question: &NewQuestion) -> Result<Reply<Value>, ClientError> {
        let payload = question.payload()?;
        self.send_json(Method::POST, "/screening/questions/locale", Some(&payload))
            .await
    }
}
