//! Handlers for the public screening flows: the citizen form under
//! `/screening` and the foreign-national (Carstensz) form under `/carstensz`.

use axum::extract::{Multipart, Path, State};
use axum::http::header::USER_AGENT;
use axum::http::HeaderMap;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::NaiveDate;
use klinik_client::screening::ScreeningSubmission;
use klinik_client::{AnalyzeError, BackendClient, ClientError};
use klinik_core::error::CoreError;
use klinik_core::locale::{Locale, Message};
use klinik_core::notice::Notice;
use klinik_core::patient::{PatientData, PatientDataWna, KTP_IMAGE_FIELD, PASSPORT_IMAGE_FIELD};
use klinik_core::questionnaire::{AnswerSheet, Question};
use klinik_core::screening::{submitted_patient_uuid, success_path};
use klinik_core::upload::{is_mobile_user_agent, UploadedFile};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::upload::MultipartForm;

/// Multipart field of the document photo on the analyze endpoints.
const DOCUMENT_FIELD: &str = "file";

/// Multipart field carrying the answers as JSON.
const ANSWERS_FIELD: &str = "answers";

// ---------------------------------------------------------------------------
// Patient forms
// ---------------------------------------------------------------------------

/// What the two patient forms have in common.
trait PatientForm: Default + Serialize {
    const LOCALE: Locale;
    const IMAGE_FIELD: &'static str;
    const CARSTENSZ: bool;

    /// Set one field; `false` when the field is unknown or the value ignored.
    fn apply(&mut self, field: &str, value: &str, today: NaiveDate) -> bool;

    fn validate(&self) -> Result<(), CoreError>;

    fn form_fields(&self) -> Vec<(&'static str, String)>;

    /// Fill the form from the text fields of a multipart body.
    fn from_multipart(form: &MultipartForm, today: NaiveDate) -> Self {
        let mut patient = Self::default();
        for (field, value) in &form.fields {
            if field != ANSWERS_FIELD && !patient.apply(field, value, today) {
                tracing::debug!(field = %field, "Ignoring patient form field");
            }
        }
        patient
    }
}

impl PatientForm for PatientData {
    const LOCALE: Locale = Locale::Id;
    const IMAGE_FIELD: &'static str = KTP_IMAGE_FIELD;
    const CARSTENSZ: bool = false;

    fn apply(&mut self, field: &str, value: &str, today: NaiveDate) -> bool {
        self.set(field, value, today).is_ok()
    }

    fn validate(&self) -> Result<(), CoreError> {
        PatientData::validate(self)
    }

    fn form_fields(&self) -> Vec<(&'static str, String)> {
        PatientData::form_fields(self)
    }
}

impl PatientForm for PatientDataWna {
    const LOCALE: Locale = Locale::En;
    const IMAGE_FIELD: &'static str = PASSPORT_IMAGE_FIELD;
    const CARSTENSZ: bool = true;

    fn apply(&mut self, field: &str, value: &str, _today: NaiveDate) -> bool {
        matches!(self.set(field, value), Ok(true))
    }

    fn validate(&self) -> Result<(), CoreError> {
        PatientDataWna::validate(self)
    }

    fn form_fields(&self) -> Vec<(&'static str, String)> {
        PatientDataWna::form_fields(self)
    }
}

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

/// An empty screening form with its questionnaire.
#[derive(Debug, Serialize)]
pub struct FormView<P> {
    pub patient: P,
    pub questions: Vec<Question>,
    pub answers: AnswerSheet,
    /// Multipart field the document photo goes under on submit.
    pub image_field: &'static str,
    pub document_endpoint: &'static str,
}

/// A processed document photo, ready to attach to the submit.
#[derive(Debug, Serialize)]
pub struct FileView {
    pub file_name: String,
    pub content_type: String,
    pub size: u64,
    /// File contents, base64 encoded.
    pub data: String,
}

impl From<&UploadedFile> for FileView {
    fn from(file: &UploadedFile) -> Self {
        Self {
            file_name: file.file_name.clone(),
            content_type: file.content_type.clone(),
            size: file.size(),
            data: STANDARD.encode(&file.bytes),
        }
    }
}

/// Result of the upload-and-analyze flow.
#[derive(Debug, Serialize)]
pub struct DocumentView<P> {
    /// The form with the recognised fields filled in.
    pub patient: P,
    pub file: FileView,
    /// `false` when analysis failed and the form must be filled by hand.
    pub analyzed: bool,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResult {
    pub uuid: String,
    pub redirect: String,
}

#[derive(Debug, Serialize)]
pub struct CarstenszLanding {
    pub form: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ThanksView {
    pub message: &'static str,
    pub home: &'static str,
}

// ---------------------------------------------------------------------------
// Citizen flow
// ---------------------------------------------------------------------------

/// GET /screening/form
pub async fn citizen_form(
    State(state): State<AppState>,
) -> Json<DataResponse<FormView<PatientData>>> {
    let backend = state.backend_for(None);
    Json(form_view(backend.questions().await, "/screening/form/document"))
}

/// POST /screening/form/document
pub async fn citizen_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<DocumentView<PatientData>>>> {
    let today = today();
    let (mut patient, upload) = read_document::<PatientData>(multipart, today).await?;

    let outcome = state
        .analyzer
        .analyze_ktp(upload, is_mobile(&headers))
        .await
        .map(|doc| {
            doc.fields.apply_to(&mut patient, today);
            (doc.file, doc.notices)
        });

    document_view(patient, outcome)
}

/// POST /screening/form
pub async fn citizen_submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<SubmitResult>>> {
    let backend = state.backend_for(None);
    submit::<PatientData>(&backend, multipart).await
}

/// GET /screening/success/{uuid}
pub async fn citizen_success(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> AppResult<Json<DataResponse<Value>>> {
    let result = state.backend_for(None).patient_success(&uuid).await;
    Ok(Json(DataResponse::new(patient_record(result, &uuid, Locale::Id)?)))
}

// ---------------------------------------------------------------------------
// Carstensz (foreign national) flow
// ---------------------------------------------------------------------------

/// GET /carstensz
pub async fn carstensz_landing() -> Json<DataResponse<CarstenszLanding>> {
    Json(DataResponse::new(CarstenszLanding {
        form: "/carstensz/form",
    }))
}

/// GET /carstensz/form
pub async fn carstensz_form(
    State(state): State<AppState>,
) -> Json<DataResponse<FormView<PatientDataWna>>> {
    let backend = state.backend_for(None).with_locale(Locale::En);
    Json(form_view(
        backend.questions_carstensz().await,
        "/carstensz/form/document",
    ))
}

/// POST /carstensz/form/document
pub async fn carstensz_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<DocumentView<PatientDataWna>>>> {
    let (mut patient, upload) = read_document::<PatientDataWna>(multipart, today()).await?;

    let outcome = state
        .analyzer
        .analyze_passport(upload, is_mobile(&headers))
        .await
        .map(|doc| {
            doc.fields.apply_to(&mut patient);
            (doc.file, doc.notices)
        });

    document_view(patient, outcome)
}

/// POST /carstensz/form
pub async fn carstensz_submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<SubmitResult>>> {
    let backend = state.backend_for(None).with_locale(Locale::En);
    submit::<PatientDataWna>(&backend, multipart).await
}

/// GET /carstensz/form/{uuid}
pub async fn carstensz_success(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> AppResult<Json<DataResponse<Value>>> {
    let result = state
        .backend_for(None)
        .with_locale(Locale::En)
        .patient_success_carstensz(&uuid)
        .await;
    Ok(Json(DataResponse::new(patient_record(result, &uuid, Locale::En)?)))
}

/// GET /carstensz/thanks
pub async fn carstensz_thanks() -> Json<DataResponse<ThanksView>> {
    Json(DataResponse::new(ThanksView {
        message: "Thank you. Your screening has been submitted.",
        home: "/carstensz",
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn is_mobile(headers: &HeaderMap) -> bool {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(is_mobile_user_agent)
}

/// An empty form; a missing questionnaire becomes an error notice.
fn form_view<P: PatientForm>(
    questions: Result<Vec<Question>, ClientError>,
    document_endpoint: &'static str,
) -> DataResponse<FormView<P>> {
    let (questions, notice) = match questions {
        Ok(questions) => (questions, None),
        Err(e) => {
            tracing::warn!(error = %e, "Questionnaire unavailable");
            (
                Vec::new(),
                Some(Notice::error(Message::QuestionnaireUnavailable.text(P::LOCALE))),
            )
        }
    };

    DataResponse::with_notice(
        FormView {
            patient: P::default(),
            questions,
            answers: AnswerSheet::new(),
            image_field: P::IMAGE_FIELD,
            document_endpoint,
        },
        notice,
    )
}

/// The form fields already entered and the uploaded photo.
async fn read_document<P: PatientForm>(
    multipart: Multipart,
    today: NaiveDate,
) -> AppResult<(P, UploadedFile)> {
    let mut form = MultipartForm::read(multipart).await?;
    let upload = form
        .take_file(DOCUMENT_FIELD)
        .or_else(|| form.take_file(P::IMAGE_FIELD))
        .ok_or_else(|| {
            AppError::BadRequest(format!("Missing required '{DOCUMENT_FIELD}' field"))
        })?;
    Ok((P::from_multipart(&form, today), upload))
}

/// A failed analysis still returns the processed file so the form can be
/// completed by hand; other failures are errors.
fn document_view<P: PatientForm>(
    patient: P,
    outcome: Result<(UploadedFile, Vec<Notice>), AnalyzeError>,
) -> AppResult<Json<DataResponse<DocumentView<P>>>> {
    match outcome {
        Ok((file, notices)) => {
            let notice = notices.last().cloned();
            Ok(Json(DataResponse::with_notice(
                DocumentView {
                    patient,
                    file: FileView::from(&file),
                    analyzed: true,
                    notices,
                },
                notice,
            )))
        }
        Err(err) => {
            let Some(file) = err.processed_file() else {
                return Err(err.into());
            };
            let notice = err.notice();
            Ok(Json(DataResponse::with_notice(
                DocumentView {
                    patient,
                    file: FileView::from(file),
                    analyzed: false,
                    notices: vec![notice.clone()],
                },
                Some(notice),
            )))
        }
    }
}

/// Validate the form, forward it, and point the browser at the next page.
async fn submit<P: PatientForm>(
    backend: &BackendClient,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<SubmitResult>>> {
    let mut form = MultipartForm::read(multipart).await?;
    let attachment = form.take_file(P::IMAGE_FIELD);
    let patient = P::from_multipart(&form, today());
    patient.validate()?;

    let answers: AnswerSheet = match form.text(ANSWERS_FIELD).filter(|s| !s.trim().is_empty()) {
        Some(raw) => AnswerSheet::from_submission(raw)
            .map_err(|e| AppError::BadRequest(format!("Invalid answers: {e}")))?,
        None => AnswerSheet::new(),
    };

    let submission = ScreeningSubmission {
        fields: patient.form_fields(),
        attachment: attachment.as_ref().map(|file| (P::IMAGE_FIELD, file)),
        answers: &answers,
    };

    let reply = if P::CARSTENSZ {
        backend.submit_screening_carstensz(submission).await?
    } else {
        backend.submit_screening(submission).await?
    };

    let uuid = submitted_patient_uuid(&reply.data).ok_or_else(|| {
        tracing::warn!(response = %reply.data, "Screening accepted without a patient uuid");
        AppError::Client(ClientError::Api {
            status: 502,
            message: Message::SubmitFailed.text(P::LOCALE).to_string(),
        })
    })?;

    tracing::info!(uuid = %uuid, carstensz = P::CARSTENSZ, answers = answers.len(), "Screening submitted");

    Ok(Json(DataResponse::with_notice(
        SubmitResult {
            redirect: success_path(P::CARSTENSZ, &uuid),
            uuid,
        },
        reply.notice,
    )))
}

/// A patient record for a success page. A 404 reads "not found", any other
/// backend failure "could not load".
fn patient_record(
    result: Result<Value, ClientError>,
    uuid: &str,
    locale: Locale,
) -> AppResult<Value> {
    result.map_err(|err| match err {
        ClientError::Api { status: 404, .. } => AppError::Client(ClientError::Api {
            status: 404,
            message: Message::PatientNotFound.text(locale).to_string(),
        }),
        ClientError::Api { status, .. } => {
            tracing::warn!(uuid, status, "Failed to load patient");
            AppError::Client(ClientError::Api {
                status,
                message: Message::PatientLoadFailed.text(locale).to_string(),
            })
        }
        other => other.into(),
    })
}
