//! Admin and management records: staff accounts, mountains, questions,
//! service prices and the user-information filters.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::locale::Locale;
use crate::questionnaire::AnswerType;
use crate::roles::Role;
use crate::types::{DbId, IsoDate};

/// Staff account form posted to `/staff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewStaff {
    #[validate(length(min = 1, message = "Nama wajib diisi"))]
    pub name: String,
    #[validate(email(message = "Email tidak valid"))]
    pub email: String,
    #[validate(custom(function = "staff_role"))]
    pub role: String,
    #[validate(length(min = 8, message = "Password minimal 8 karakter"))]
    pub password: String,
}

impl NewStaff {
    /// Run the field rules and fold the first failure into a [`CoreError`].
    pub fn check(&self) -> Result<(), CoreError> {
        let trimmed = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            role: self.role.clone(),
            password: self.password.clone(),
        };
        trimmed.validate().map_err(|errors| {
            let message = errors
                .field_errors()
                .into_iter()
                .min_by_key(|(field, _)| field_order(field))
                .and_then(|(_, errs)| errs.first())
                .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "Data staf tidak valid".to_string());
            CoreError::Validation(message)
        })
    }
}

fn field_order(field: &str) -> usize {
    ["name", "email", "role", "password"]
        .iter()
        .position(|f| *f == field)
        .unwrap_or(usize::MAX)
}

fn staff_role(role: &str) -> Result<(), ValidationError> {
    match Role::from_name(role) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("role").with_message("Peran tidak dikenal".into())),
    }
}

/// A mountain route with its own questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mountain {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMountain {
    pub name: String,
}

/// Admin input for a new localized question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub mountain_id: DbId,
    pub locale: Locale,
    pub question_text: String,
    pub answer_type: AnswerType,
}

/// Wire shape of `POST /screening/questions/locale`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPayload {
    pub mountain_id: DbId,
    pub answer_type: AnswerType,
    pub translations: Vec<QuestionTranslation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionTranslation {
    pub locale: Locale,
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl NewQuestion {
    /// A question is created with exactly one translation and no options;
    /// options are added afterwards.
    pub fn payload(&self) -> Result<QuestionPayload, CoreError> {
        let text = self.question_text.trim();
        if text.is_empty() {
            return Err(CoreError::Validation("Teks pertanyaan wajib diisi".into()));
        }
        Ok(QuestionPayload {
            mountain_id: self.mountain_id,
            answer_type: self.answer_type,
            translations: vec![QuestionTranslation {
                locale: self.locale,
                question_text: text.to_string(),
                options: Vec::new(),
            }],
        })
    }
}

/// `?mountain_id=&locale=` for `GET /screening/questions/locale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionQuery {
    pub mountain_id: DbId,
    pub locale: Locale,
}

/// Create/update body of an amount service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountServiceInput {
    #[serde(rename = "type")]
    pub service_type: String,
    pub amount: f64,
}

impl AmountServiceInput {
    pub fn check(&self) -> Result<(), CoreError> {
        if self.service_type.trim().is_empty() {
            return Err(CoreError::Validation("Jenis layanan wajib diisi".into()));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(CoreError::Validation("Nominal tidak valid".into()));
        }
        Ok(())
    }
}

/// `?patient_id=&start_date=&end_date=` for the user-information chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<IsoDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<IsoDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn staff() -> NewStaff {
        NewStaff {
            name: "Sari Wulandari".into(),
            email: "sari@klinikgunung.id".into(),
            role: "nurse".into(),
            password: "rahasia123".into(),
        }
    }

    #[test]
    fn valid_staff_passes() {
        assert!(staff().check().is_ok());
    }

    #[test]
    fn staff_rules() {
        let blank = NewStaff { name: "  ".into(), ..staff() };
        assert_matches!(blank.check(), Err(CoreError::Validation(m)) if m == "Nama wajib diisi");

        let bad_email = NewStaff { email: "sari".into(), ..staff() };
        assert_matches!(bad_email.check(), Err(CoreError::Validation(m)) if m == "Email tidak valid");

        let bad_role = NewStaff { role: "janitor".into(), ..staff() };
        assert_matches!(bad_role.check(), Err(CoreError::Validation(m)) if m == "Peran tidak dikenal");

        let short = NewStaff { password: "1234567".into(), ..staff() };
        assert_matches!(short.check(), Err(CoreError::Validation(m)) if m.contains("8"));
    }

    #[test]
    fn first_failing_field_wins() {
        let s = NewStaff {
            name: String::new(),
            password: "x".into(),
            ..staff()
        };
        assert_matches!(s.check(), Err(CoreError::Validation(m)) if m == "Nama wajib diisi");
    }

    #[test]
    fn question_payload_has_single_translation() {
        let q = NewQuestion {
            mountain_id: 2,
            locale: Locale::En,
            question_text: " Any heart condition? ".into(),
            answer_type: AnswerType::Select,
        };
        assert_eq!(
            serde_json::to_value(q.payload().unwrap()).unwrap(),
            json!({
                "mountain_id": 2,
                "answer_type": "select",
                "translations": [
                    {"locale": "en", "question_text": "Any heart condition?", "options": []}
                ]
            })
        );
    }

    #[test]
    fn empty_question_rejected() {
        let q = NewQuestion {
            mountain_id: 2,
            locale: Locale::Id,
            question_text: "".into(),
            answer_type: AnswerType::Text,
        };
        assert_matches!(q.payload(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn amount_input_uses_type_key() {
        let input = AmountServiceInput {
            service_type: "screening".into(),
            amount: 150000.0,
        };
        assert!(input.check().is_ok());
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({"type": "screening", "amount": 150000.0})
        );

        let negative = AmountServiceInput { amount: -1.0, ..input };
        assert_matches!(negative.check(), Err(CoreError::Validation(_)));
    }
}
