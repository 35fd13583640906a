//! Screening questionnaire: questions fetched from the backend and the
//! answers collected before submit.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::DbId;

/// Marker text of the "none of the above" checkbox option.
pub const NONE_OF_THE_ABOVE: &str = "Tidak ada";

/// The only `checkbox_textarea` option that keeps its free-text detail.
pub const DETAIL_OPTION: &str = "Ya";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerType {
    Text,
    Number,
    Date,
    Checkbox,
    Select,
    CheckboxTextarea,
    Textarea,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: DbId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: DbId,
    #[serde(default)]
    pub section: Option<String>,
    pub question: String,
    #[serde(rename = "type")]
    pub answer_type: AnswerType,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

/// An answer, shaped by the question's [`AnswerType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// text, number, date, select, textarea
    Text(String),
    /// checkbox
    Choices(Vec<String>),
    /// checkbox_textarea
    Detailed {
        options: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        textarea: Option<String>,
    },
}

/// One entry of the submitted `answers` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub questioner_id: DbId,
    pub answer: AnswerValue,
}

/// Answers keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    answers: BTreeMap<DbId, AnswerValue>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: DbId) -> Option<&AnswerValue> {
        self.answers.get(&question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Replace the answer of a question.
    pub fn set(&mut self, question_id: DbId, value: AnswerValue) {
        self.answers.insert(question_id, value);
    }

    /// Set a free-text or single-choice answer.
    pub fn set_text(&mut self, question_id: DbId, value: impl Into<String>) {
        self.set(question_id, AnswerValue::Text(value.into()));
    }

    /// Check or uncheck a `checkbox` option.
    ///
    /// Checking the "none of the above" option clears every other choice;
    /// checking any other option drops "none of the above".
    pub fn toggle_choice(&mut self, question_id: DbId, option: &str, checked: bool) {
        let current = match self.answers.get(&question_id) {
            Some(AnswerValue::Choices(c)) => c.clone(),
            _ => Vec::new(),
        };

        let updated = if checked && option.contains(NONE_OF_THE_ABOVE) {
            vec![option.to_string()]
        } else if checked {
            let mut kept: Vec<String> = current
                .into_iter()
                .filter(|a| !a.contains(NONE_OF_THE_ABOVE))
                .collect();
            kept.push(option.to_string());
            kept
        } else {
            current.into_iter().filter(|a| a != option).collect()
        };

        self.set(question_id, AnswerValue::Choices(updated));
    }

    /// Check or uncheck a `checkbox_textarea` option.
    ///
    /// At most one option is selected. The detail text survives only while
    /// the selected option is [`DETAIL_OPTION`].
    pub fn toggle_detailed(&mut self, question_id: DbId, option: &str, checked: bool) {
        let detail = match self.answers.get(&question_id) {
            Some(AnswerValue::Detailed { textarea, .. }) => textarea.clone().unwrap_or_default(),
            _ => String::new(),
        };
        let options = if checked {
            vec![option.to_string()]
        } else {
            Vec::new()
        };
        let textarea = if option == DETAIL_OPTION {
            detail
        } else {
            String::new()
        };
        self.set(
            question_id,
            AnswerValue::Detailed {
                options,
                textarea: Some(textarea),
            },
        );
    }

    /// Update the detail text of a `checkbox_textarea` answer, keeping the
    /// selected option.
    pub fn set_detail_text(&mut self, question_id: DbId, text: impl Into<String>) {
        let options = match self.answers.get(&question_id) {
            Some(AnswerValue::Detailed { options, .. }) => options.clone(),
            _ => Vec::new(),
        };
        self.set(
            question_id,
            AnswerValue::Detailed {
                options,
                textarea: Some(text.into()),
            },
        );
    }

    /// Answers in question-id order, as the backend expects them.
    pub fn submission(&self) -> Vec<Answer> {
        self.answers
            .iter()
            .map(|(&questioner_id, answer)| Answer {
                questioner_id,
                answer: answer.clone(),
            })
            .collect()
    }

    /// The `answers` multipart field: the submission as a JSON string.
    pub fn to_form_value(&self) -> String {
        serde_json::to_string(&self.submission()).unwrap_or_else(|_| "[]".to_string())
    }
}

impl FromIterator<Answer> for AnswerSheet {
    /// A later answer to the same question replaces the earlier one.
    fn from_iter<I: IntoIterator<Item = Answer>>(iter: I) -> Self {
        Self {
            answers: iter
                .into_iter()
                .map(|a| (a.questioner_id, a.answer))
                .collect(),
        }
    }
}

impl AnswerSheet {
    /// Parse the submitted `answers` JSON: the `[{questioner_id, answer}]`
    /// array, or an object keyed by question id.
    pub fn from_submission(raw: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str::<Value>(raw)? {
            list @ Value::Array(_) => {
                let answers: Vec<Answer> = serde_json::from_value(list)?;
                Ok(answers.into_iter().collect())
            }
            other => serde_json::from_value(other),
        }
    }
}

/// Render a stored answer for the screening detail view.
///
/// The backend stores answers either as JSON values or as JSON-encoded
/// strings. Lists are joined with `", "`; a `{options, textarea}` object
/// becomes `"a, b (detail)"`; anything else is shown as is.
pub fn display_answer(raw: &Value) -> String {
    match raw {
        Value::Null => "-".to_string(),
        Value::String(s) if s.is_empty() => "-".to_string(),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed @ (Value::Array(_) | Value::Object(_))) => display_answer(&parsed),
            _ => s.clone(),
        },
        Value::Array(items) => join_strings(items),
        Value::Object(map) => match map.get("options") {
            Some(Value::Array(items)) => {
                let opts = join_strings(items);
                match map.get("textarea").and_then(Value::as_str) {
                    Some(detail) if !detail.is_empty() => format!("{opts} ({detail})"),
                    _ => opts,
                }
            }
            _ => raw.to_string(),
        },
        other => other.to_string(),
    }
}

fn join_strings(items: &[Value]) -> String {
    items
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
