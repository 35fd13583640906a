//! Read-only screening projections and the backend's list envelopes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::questionnaire::display_answer;
use crate::types::DbId;

/// Rows per page on the staff dashboards.
pub const DEFAULT_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreeningStatus {
    Pending,
    Completed,
    Failed,
    /// A status this service does not know yet; kept verbatim.
    #[serde(untagged)]
    Other(String),
}

/// Answer row as returned inside a screening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningAnswer {
    #[serde(alias = "questioner_id")]
    pub question_id: DbId,
    #[serde(default, alias = "question")]
    pub question_text: Option<String>,
    #[serde(default)]
    pub answer: Value,
}

impl ScreeningAnswer {
    pub fn display(&self) -> String {
        display_answer(&self.answer)
    }

    /// Prompt text, or a numbered placeholder when the backend omitted it.
    pub fn prompt(&self) -> String {
        match self.question_text.as_deref() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => format!("Question {}", self.question_id),
        }
    }
}

/// One question/answer line of the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRow {
    pub question_id: DbId,
    pub question: String,
    pub answer: String,
}

/// Patient fields shown on the detail view, with their labels.
const DETAIL_LABELS: &[(&str, &str)] = &[
    ("name", "Nama"),
    ("email", "Email"),
    ("contact", "Nomor Telepon"),
    ("date_of_birth", "Tanggal Lahir"),
    ("gender", "Jenis Kelamin"),
    ("nationality", "Kewarganegaraan"),
    ("passport_number", "No. Paspor"),
];

/// A labelled patient field of the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailField {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// Labelled patient fields present in a raw screening record, in label order.
/// Null values render as `-`.
pub fn detail_fields(record: &Value) -> Vec<DetailField> {
    DETAIL_LABELS
        .iter()
        .filter_map(|&(key, label)| {
            let value = match record.get(key)? {
                Value::Null => "-".to_string(),
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some(DetailField { key, label, value })
        })
        .collect()
}

/// Dashboard projection of one screening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screening {
    pub id: DbId,
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub passport_number: Option<String>,
    #[serde(default)]
    pub nik: Option<String>,
    #[serde(default)]
    pub screening_status: Option<ScreeningStatus>,
    #[serde(default)]
    pub queue: Option<i64>,
    #[serde(default)]
    pub screening_date: Option<String>,
    #[serde(default)]
    pub answers: Vec<ScreeningAnswer>,
}

impl Screening {
    pub fn answer_rows(&self) -> Vec<AnswerRow> {
        rows(&self.answers)
    }
}

/// Answer rows of a raw screening record, read from its `answers` array
/// alone. A record without answers has no rows; a malformed array is an
/// error.
pub fn record_answer_rows(record: &Value) -> Result<Vec<AnswerRow>, serde_json::Error> {
    match record.get("answers") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(raw) => {
            let answers = Vec::<ScreeningAnswer>::deserialize(raw)?;
            Ok(rows(&answers))
        }
    }
}

fn rows(answers: &[ScreeningAnswer]) -> Vec<AnswerRow> {
    answers
        .iter()
        .map(|a| AnswerRow {
            question_id: a.question_id,
            question: a.prompt(),
            answer: a.display(),
        })
        .collect()
}

/// `?page=&per_page=&search=` for list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ListParams {
    /// Fill in dashboard defaults and drop an empty search term.
    pub fn normalized(mut self) -> Self {
        self.page = Some(self.page.unwrap_or(1).max(1));
        self.per_page = Some(self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, 100));
        self.search = self
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }
}

/// `{ status, data, meta, message }` envelope used by most backend responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

/// A page of rows plus its pagination block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Value,
}

/// Response of `/management/analysis/screening`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningAnalysis {
    #[serde(default)]
    pub patients_per_date: BTreeMap<String, u64>,
    #[serde(default)]
    pub meta: AnalysisMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisMeta {
    #[serde(default)]
    pub total_patients: u64,
}

/// Where the front-end goes after a screening was accepted.
pub fn success_path(carstensz: bool, uuid: &str) -> String {
    if carstensz {
        "/carstensz/thanks".to_string()
    } else {
        format!("/screening/success/{uuid}")
    }
}

/// Pull the new patient's uuid out of a submit response
/// (`{ status: "success", data: { patient: { uuid } } }`).
pub fn submitted_patient_uuid(response: &Value) -> Option<String> {
    if response.get("status").and_then(Value::as_str) != Some("success") {
        return None;
    }
    response
        .pointer("/data/patient/uuid")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_answers_are_read_without_the_rest_of_the_record() {
        let record = json!({
            "uuid": "u-1",
            "name": "Anna",
            "answers": [{ "question_id": 3, "question_text": "Asma?", "answer": "Ya" }]
        });

        let rows = record_answer_rows(&record).unwrap();
        assert_eq!(
            rows,
            vec![AnswerRow {
                question_id: 3,
                question: "Asma?".into(),
                answer: "Ya".into(),
            }]
        );
    }

    #[test]
    fn record_without_answers_has_no_rows() {
        assert!(record_answer_rows(&json!({ "uuid": "u-1" })).unwrap().is_empty());
        assert!(record_answer_rows(&json!({ "answers": null })).unwrap().is_empty());
    }

    #[test]
    fn malformed_record_answers_are_an_error() {
        assert!(record_answer_rows(&json!({ "answers": "Ya" })).is_err());
        assert!(record_answer_rows(&json!({ "answers": [{ "answer": "Ya" }] })).is_err());
    }

    #[test]
    fn screening_row_deserializes() {
        let s: Screening = serde_json::from_value(json!({
            "id": 12,
            "uuid": "9b2f6c1e-7a40-4a57-9e0e-2a3c1b6f8d11",
            "name": "Anna Schmidt",
            "email": "anna@example.de",
            "contact": "+49 170 1234567",
            "passport_number": "C01X00T47",
            "screening_status": "pending",
            "queue": 4,
            "screening_date": "2025-07-25",
            "answers": [{"question_id": 1, "answer": "[\"Asma\"]"}]
        }))
        .unwrap();
        assert_eq!(s.screening_status, Some(ScreeningStatus::Pending));
        assert_eq!(s.answers[0].display(), "Asma");
    }

    #[test]
    fn answer_rows_fall_back_to_numbered_prompt() {
        let s: Screening = serde_json::from_value(json!({
            "id": 1, "uuid": "u", "name": "A",
            "answers": [
                {"question_id": 4, "question_text": "Riwayat asma?", "answer": "Tidak"},
                {"question_id": 5, "answer": {"options": ["Ya"], "textarea": "lutut"}}
            ]
        }))
        .unwrap();
        let rows = s.answer_rows();
        assert_eq!(rows[0].question, "Riwayat asma?");
        assert_eq!(rows[1].question, "Question 5");
        assert_eq!(rows[1].answer, "Ya (lutut)");
    }

    #[test]
    fn detail_fields_follow_label_order() {
        let record = json!({
            "passport_number": "C01X00T47",
            "name": "Anna Schmidt",
            "gender": null,
            "queue": 3
        });
        let fields = detail_fields(&record);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].label, "Nama");
        assert_eq!(fields[1].value, "-");
        assert_eq!(fields[2].label, "No. Paspor");
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status: ScreeningStatus = serde_json::from_value(json!("archived")).unwrap();
        assert_eq!(status, ScreeningStatus::Other("archived".into()));
    }

    #[test]
    fn list_params_normalize() {
        let p = ListParams {
            page: Some(0),
            per_page: None,
            search: Some("  ".into()),
        }
        .normalized();
        assert_eq!(p.page, Some(1));
        assert_eq!(p.per_page, Some(DEFAULT_PER_PAGE));
        assert_eq!(p.search, None);
    }

    #[test]
    fn submit_response_needs_status_and_uuid() {
        let ok = json!({"status": "success", "data": {"patient": {"uuid": "u-1"}}});
        assert_eq!(submitted_patient_uuid(&ok), Some("u-1".into()));

        let no_uuid = json!({"status": "success", "data": {"patient": {}}});
        assert_eq!(submitted_patient_uuid(&no_uuid), None);

        let failed = json!({"status": "error", "data": {"patient": {"uuid": "u-1"}}});
        assert_eq!(submitted_patient_uuid(&failed), None);
    }

    #[test]
    fn success_paths() {
        assert_eq!(success_path(true, "u-1"), "/carstensz/thanks");
        assert_eq!(success_path(false, "u-1"), "/screening/success/u-1");
    }

    #[test]
    fn analysis_defaults_to_empty() {
        let a = ScreeningAnalysis::default();
        assert!(a.patients_per_date.is_empty());
        assert_eq!(a.meta.total_patients, 0);
    }
}
