//! Screening lists, details, submissions and the questionnaire.

use klinik_core::questionnaire::{AnswerSheet, Question};
use klinik_core::screening::{ListParams, ScreeningAnalysis};
use klinik_core::types::DbId;
use klinik_core::upload::UploadedFile;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::backend::{text_form, BackendClient, RawReply, Reply, NO_QUERY};
use crate::error::ClientError;

/// Everything the screening submit sends as `multipart/form-data`.
#[derive(Debug, Clone)]
pub struct ScreeningSubmission<'a> {
    pub fields: Vec<(&'static str, String)>,
    /// Multipart field name and the identity-document photo.
    pub attachment: Option<(&'static str, &'a UploadedFile)>,
    pub answers: &'a AnswerSheet,
}

impl ScreeningSubmission<'_> {
    /// Text fields, then the photo, then `answers` as a JSON string.
    pub fn into_form(self) -> Form {
        let mut form = text_form(self.fields);
        if let Some((name, file)) = self.attachment {
            form = form.part(name, file_part(file));
        }
        form.text("answers", self.answers.to_form_value())
    }
}

/// A multipart part for an in-memory upload. An unparsable content type
/// is dropped rather than failing the submit.
pub fn file_part(file: &UploadedFile) -> Part {
    let untyped = || Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
    untyped()
        .mime_str(&file.content_type)
        .unwrap_or_else(|_| untyped())
}

#[derive(Debug, Deserialize)]
struct QuestionList {
    #[serde(default)]
    data: Option<Value>,
}

impl BackendClient {
    /// `GET /screening/list`
    pub async fn screenings(&self, params: &ListParams) -> Result<Value, ClientError> {
        self.get_json("/screening/list", params).await
    }

    /// `GET /screening/archive`
    pub async fn screenings_archive(&self, params: &ListParams) -> Result<Value, ClientError> {
        self.get_json("/screening/archive", params).await
    }

    /// `GET /screening/completed`
    pub async fn screenings_completed(&self, params: &ListParams) -> Result<Value, ClientError> {
        self.get_json("/screening/completed", params).await
    }

    /// `GET /screening/payment`: every screening, as the cashier sees them.
    pub async fn screenings_payment(&self, params: &ListParams) -> Result<Value, ClientError> {
        self.get_json("/screening/payment", params).await
    }

    /// `GET /screening/cartensz/list`
    pub async fn screenings_carstensz(&self, params: &ListParams) -> Result<Value, ClientError> {
        self.get_json("/screening/cartensz/list", params).await
    }

    pub async fn screening_detail(&self, uuid: &str) -> Result<Value, ClientError> {
        self.get_json(&format!("/screening/detail/{uuid}"), NO_QUERY).await
    }

    pub async fn screening_detail_carstensz(&self, uuid: &str) -> Result<Value, ClientError> {
        self.get_json(&format!("/screening/cartensz/detail/{uuid}"), NO_QUERY)
            .await
    }

    pub async fn patient_success(&self, uuid: &str) -> Result<Value, ClientError> {
        self.get_json(&format!("/screening/success/{uuid}"), NO_QUERY).await
    }

    pub async fn patient_success_carstensz(&self, uuid: &str) -> Result<Value, ClientError> {
        self.get_json(&format!("/screening/cartensz/success/{uuid}"), NO_QUERY)
            .await
    }

    /// `POST /screening` (citizen form).
    pub async fn submit_screening(
        &self,
        submission: ScreeningSubmission<'_>,
    ) -> Result<Reply<Value>, ClientError> {
        self.post_multipart("/screening", submission.into_form()).await
    }

    /// `POST /screening/cartensz` (foreign-national form).
    pub async fn submit_screening_carstensz(
        &self,
        submission: ScreeningSubmission<'_>,
    ) -> Result<Reply<Value>, ClientError> {
        self.post_multipart("/screening/cartensz", submission.into_form())
            .await
    }

    pub async fn update_patient(&self, uuid: &str, data: &Value) -> Result<Reply<Value>, ClientError> {
        self.send_json(
            Method::PUT,
            &format!("/screening/update/patient/{uuid}"),
            Some(data),
        )
        .await
    }

    pub async fn update_answer(&self, answer_id: DbId, answer: &str) -> Result<Reply<Value>, ClientError> {
        let body = json!({ "answer": answer });
        self.send_json(
            Method::PUT,
            &format!("/screening/update/answer/{answer_id}"),
            Some(&body),
        )
        .await
    }

    /// `GET /screenings/questionnaires`
    pub async fn questions(&self) -> Result<Vec<Question>, ClientError> {
        let list: QuestionList = self.get_json("/screenings/questionnaires", NO_QUERY).await?;
        questions_from(list)
    }

    /// `GET /screenings/questionnaires/carstensz`
    pub async fn questions_carstensz(&self) -> Result<Vec<Question>, ClientError> {
        let list: QuestionList = self
            .get_json("/screenings/questionnaires/carstensz", NO_QUERY)
            .await?;
        questions_from(list)
    }

    /// `GET /management/analysis/screening`. Any failure yields the empty
    /// analysis so the dashboard still renders.
    pub async fn screening_analysis(&self) -> ScreeningAnalysis {
        match self
            .get_json("/management/analysis/screening", NO_QUERY)
            .await
        {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch screening analysis");
                ScreeningAnalysis::default()
            }
        }
    }

    /// `GET /screening/cartensz/export` as raw CSV bytes.
    pub async fn export_screenings_csv(&self, search: Option<&str>) -> Result<RawReply, ClientError> {
        let query: Vec<(&str, &str)> = search
            .filter(|s| !s.is_empty())
            .map(|s| vec![("search", s)])
            .unwrap_or_default();
        self.get_bytes("/screening/cartensz/export", &query).await
    }
}

/// The questionnaire is usable only when `data` is an array.
fn questions_from(list: QuestionList) -> Result<Vec<Question>, ClientError> {
    match list.data {
        Some(data @ Value::Array(_)) => {
            serde_json::from_value(data).map_err(|e| ClientError::Decode(e.to_string()))
        }
        _ => Err(ClientError::Decode("questionnaire data is not a list".into())),
    }
}
