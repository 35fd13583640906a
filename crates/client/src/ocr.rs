//! Client for the OCR microservice.

use async_trait::async_trait;
use klinik_core::ocr::{HeicConversion, HeicConversionEnvelope, KtpAnalysis, OcrEnvelope, PassportAnalysis};
use klinik_core::upload::UploadedFile;
use reqwest::multipart::Form;
use serde::de::DeserializeOwned;

use crate::screening::file_part;

/// Errors from the OCR service layer.
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    /// No response (connect, DNS, timeout).
    #[error("OCR request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("OCR service error ({status}): {body}")]
    Status { status: u16, body: String },

    /// A 2xx response with an unexpected body.
    #[error("OCR response could not be decoded: {0}")]
    Decode(String),
}

/// The three operations of the OCR service.
#[async_trait]
pub trait DocumentOcr: Send + Sync {
    async fn convert_heic(&self, file: &UploadedFile) -> Result<HeicConversion, OcrError>;

    async fn analyze_ktp(
        &self,
        file: &UploadedFile,
        mobile: bool,
    ) -> Result<OcrEnvelope<KtpAnalysis>, OcrError>;

    async fn analyze_passport(
        &self,
        file: &UploadedFile,
        mobile: bool,
    ) -> Result<OcrEnvelope<PassportAnalysis>, OcrError>;
}

/// HTTP implementation of [`DocumentOcr`].
#[derive(Debug, Clone)]
pub struct OcrClient {
    client: reqwest::Client,
    api_url: String,
}

impl OcrClient {
    /// * `api_url` - Base URL, e.g. `http://localhost:8001/api/v1`.
    pub fn new(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post_form<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, OcrError> {
        let response = self
            .client
            .post(format!("{}{}", self.api_url, path))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(path, status = status.as_u16(), "OCR call failed");
            return Err(OcrError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| OcrError::Decode(e.to_string()))
    }

    fn analysis_form(file: &UploadedFile, mobile: bool) -> Form {
        Form::new()
            .part("file", file_part(file))
            .text("mobile_optimization", mobile.to_string())
    }
}

#[async_trait]
impl DocumentOcr for OcrClient {
    async fn convert_heic(&self, file: &UploadedFile) -> Result<HeicConversion, OcrError> {
        let form = Form::new().part("file", file_part(file));
        let env: HeicConversionEnvelope = self.post_form("/convert-heic", form).await?;
        Ok(env.data)
    }

    async fn analyze_ktp(
        &self,
        file: &UploadedFile,
        mobile: bool,
    ) -> Result<OcrEnvelope<KtpAnalysis>, OcrError> {
        self.post_form("/analyze-ktp", Self::analysis_form(file, mobile))
            .await
    }

    async fn analyze_passport(
        &self,
        file: &UploadedFile,
        mobile: bool,
    ) -> Result<OcrEnvelope<PassportAnalysis>, OcrError> {
        self.post_form("/analyze-passport", Self::analysis_form(file, mobile))
            .await
    }
}
