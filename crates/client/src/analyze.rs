//! Upload-and-analyze flow for identity documents.
//!
//! Inspect the upload, convert HEIC to JPEG, send the image to the OCR
//! service. Each step can fail with a localized message; nothing is
//! retried and the caller falls back to manual entry.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use klinik_core::locale::{Locale, Message};
use klinik_core::notice::Notice;
use klinik_core::ocr::{KtpAnalysis, OcrEnvelope, PassportAnalysis};
use klinik_core::upload::{inspect, UploadKind, UploadRejection, UploadedFile};

use crate::ocr::{DocumentOcr, OcrError};

/// Content type of a converted HEIC image.
const JPEG_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    /// Type or size check failed; nothing was sent.
    #[error("{message}")]
    Rejected {
        reason: UploadRejection,
        message: String,
    },

    /// The HEIC conversion call failed or returned unusable data.
    #[error("{message}")]
    ConversionFailed { message: String },

    /// The analysis call failed. The processed file is still usable as the
    /// form's attachment.
    #[error("{message}")]
    AnalysisFailed {
        message: String,
        file: Box<UploadedFile>,
    },
}

impl AnalyzeError {
    pub fn notice(&self) -> Notice {
        Notice::error(self.to_string())
    }

    /// The file to keep attached to the form, if processing got that far.
    pub fn processed_file(&self) -> Option<&UploadedFile> {
        match self {
            Self::AnalysisFailed { file, .. } => Some(file.as_ref()),
            _ => None,
        }
    }
}

/// A successfully analyzed document.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedDocument<T> {
    /// The file to attach to the form (the JPEG when HEIC was converted).
    pub file: UploadedFile,
    pub fields: T,
    /// Notices raised along the way, in order.
    pub notices: Vec<Notice>,
}

/// Runs the upload-and-analyze flow against any [`DocumentOcr`].
#[derive(Debug, Clone)]
pub struct DocumentAnalyzer<O> {
    ocr: O,
}

impl<O: DocumentOcr> DocumentAnalyzer<O> {
    pub fn new(ocr: O) -> Self {
        Self { ocr }
    }

    pub fn ocr(&self) -> &O {
        &self.ocr
    }

    /// KTP flow; messages are Indonesian.
    pub async fn analyze_ktp(
        &self,
        upload: UploadedFile,
        mobile: bool,
    ) -> Result<AnalyzedDocument<KtpAnalysis>, AnalyzeError> {
        let locale = Locale::Id;
        let (file, mut notices) = self.prepare(upload, locale).await?;
        let result = self.ocr.analyze_ktp(&file, mobile).await;
        let fields = finish(result, &file, locale)?;
        notices.push(Notice::success(Message::AnalysisSucceeded.text(locale)));
        Ok(AnalyzedDocument { file, fields, notices })
    }

    /// Passport flow; messages are English.
    pub async fn analyze_passport(
        &self,
        upload: UploadedFile,
        mobile: bool,
    ) -> Result<AnalyzedDocument<PassportAnalysis>, AnalyzeError> {
        let locale = Locale::En;
        let (file, mut notices) = self.prepare(upload, locale).await?;
        let result = self.ocr.analyze_passport(&file, mobile).await;
        let fields = finish(result, &file, locale)?;
        notices.push(Notice::success(Message::AnalysisSucceeded.text(locale)));
        Ok(AnalyzedDocument { file, fields, notices })
    }

    /// Inspect the upload and convert HEIC images.
    async fn prepare(
        &self,
        upload: UploadedFile,
        locale: Locale,
    ) -> Result<(UploadedFile, Vec<Notice>), AnalyzeError> {
        let kind = inspect(&upload).map_err(|reason| AnalyzeError::Rejected {
            reason,
            message: reason.message(locale).to_string(),
        })?;

        match kind {
            UploadKind::Standard => Ok((upload, Vec::new())),
            UploadKind::Heic => {
                let converted = self.convert(&upload, locale).await?;
                tracing::debug!(
                    from = %upload.file_name,
                    to = %converted.file_name,
                    "HEIC upload converted"
                );
                Ok((
                    converted,
                    vec![Notice::success(Message::HeicConverted.text(locale))],
                ))
            }
        }
    }

    async fn convert(&self, upload: &UploadedFile, locale: Locale) -> Result<UploadedFile, AnalyzeError> {
        let failed = || AnalyzeError::ConversionFailed {
            message: Message::HeicConversionFailed.text(locale).to_string(),
        };

        let conversion = self.ocr.convert_heic(upload).await.map_err(|e| {
            tracing::warn!(error = %e, file = %upload.file_name, "HEIC conversion failed");
            failed()
        })?;

        let bytes = STANDARD.decode(conversion.jpeg_base64.trim()).map_err(|e| {
            tracing::warn!(error = %e, "HEIC conversion returned invalid base64");
            failed()
        })?;

        Ok(UploadedFile::new(
            conversion.converted_filename,
            JPEG_CONTENT_TYPE,
            bytes,
        ))
    }
}

/// Turn the analysis outcome into fields or a localized failure.
fn finish<T>(
    result: Result<OcrEnvelope<T>, OcrError>,
    file: &UploadedFile,
    locale: Locale,
) -> Result<T, AnalyzeError> {
    let failed = |message: Message| AnalyzeError::AnalysisFailed {
        message: message.text(locale).to_string(),
        file: Box::new(file.clone()),
    };

    match result {
        Ok(envelope) => envelope.into_fields().ok_or_else(|| {
            tracing::warn!(file = %file.file_name, "OCR returned no usable fields");
            failed(Message::AnalysisFailed)
        }),
        Err(OcrError::Status { status: 429, .. }) => Err(failed(Message::AnalysisRateLimited)),
        Err(OcrError::Request(e)) => {
            tracing::warn!(error = %e, "OCR service unreachable");
            Err(failed(Message::AnalysisConnection))
        }
        Err(e) => {
            tracing::warn!(error = %e, "OCR analysis failed");
            Err(failed(Message::AnalysisFailed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use klinik_core::ocr::HeicConversion;

    /// Records every call and the file each call received.
    #[derive(Default)]
    struct RecordingOcr {
        calls: Mutex<Vec<(&'static str, String)>>,
        fail_conversion: bool,
        analysis_status: Option<u16>,
        analysis_success: bool,
    }

    impl RecordingOcr {
        fn ok() -> Self {
            Self {
                analysis_success: true,
                ..Self::default()
            }
        }

        fn record(&self, op: &'static str, file: &UploadedFile) {
            self.calls.lock().unwrap().push((op, file.file_name.clone()));
        }

        fn calls(&self) -> Vec<(&'static str, String)> {
            self.calls.lock().unwrap().clone()
        }

        fn envelope<T>(&self, fields: T) -> Result<OcrEnvelope<T>, OcrError> {
            if let Some(status) = self.analysis_status {
                return Err(OcrError::Status {
                    status,
                    body: String::new(),
                });
            }
            Ok(OcrEnvelope {
                success: self.analysis_success,
                data: Some(fields),
            })
        }
    }

    #[async_trait]
    impl DocumentOcr for RecordingOcr {
        async fn convert_heic(&self, file: &UploadedFile) -> Result<HeicConversion, OcrError> {
            self.record("convert", file);
            if self.fail_conversion {
                return Err(OcrError::Status {
                    status: 500,
                    body: "boom".into(),
                });
            }
            Ok(HeicConversion {
                jpeg_base64: STANDARD.encode(b"jpeg-bytes"),
                converted_filename: "IMG_0001.jpg".into(),
            })
        }

        async fn analyze_ktp(
            &self,
            file: &UploadedFile,
            _mobile: bool,
        ) -> Result<OcrEnvelope<KtpAnalysis>, OcrError> {
            self.record("ktp", file);
            self.envelope(KtpAnalysis {
                nik: Some("3507123456780001".into()),
                ..KtpAnalysis::default()
            })
        }

        async fn analyze_passport(
            &self,
            file: &UploadedFile,
            _mobile: bool,
        ) -> Result<OcrEnvelope<PassportAnalysis>, OcrError> {
            self.record("passport", file);
            self.envelope(PassportAnalysis {
                passport_number: Some("C01X00T47".into()),
                ..PassportAnalysis::default()
            })
        }
    }

    fn jpeg() -> UploadedFile {
        UploadedFile::new("ktp.jpg", "image/jpeg", vec![1, 2, 3])
    }

    fn heic() -> UploadedFile {
        UploadedFile::new("IMG_0001.HEIC", "image/heic", vec![9; 16])
    }

    #[tokio::test]
    async fn standard_image_goes_straight_to_analysis() {
        let analyzer = DocumentAnalyzer::new(RecordingOcr::ok());
        let doc = analyzer.analyze_ktp(jpeg(), false).await.unwrap();

        assert_eq!(analyzer.ocr().calls(), vec![("ktp", "ktp.jpg".to_string())]);
        assert_eq!(doc.fields.nik.as_deref(), Some("3507123456780001"));
        assert_eq!(doc.file, jpeg());
        assert_eq!(doc.notices.len(), 1);
    }

    #[tokio::test]
    async fn heic_is_converted_before_analysis() {
        let analyzer = DocumentAnalyzer::new(RecordingOcr::ok());
        let doc = analyzer.analyze_passport(heic(), true).await.unwrap();

        assert_eq!(
            analyzer.ocr().calls(),
            vec![
                ("convert", "IMG_0001.HEIC".to_string()),
                ("passport", "IMG_0001.jpg".to_string()),
            ]
        );
        assert_eq!(doc.file.content_type, "image/jpeg");
        assert_eq!(doc.file.bytes, b"jpeg-bytes");
        assert_eq!(doc.notices[0].message, "HEIC file successfully converted");
    }

    #[tokio::test]
    async fn rejected_upload_makes_no_calls() {
        let analyzer = DocumentAnalyzer::new(RecordingOcr::ok());
        let pdf = UploadedFile::new("ktp.pdf", "application/pdf", vec![0; 4]);
        let err = analyzer.analyze_ktp(pdf, false).await.unwrap_err();

        assert_matches!(
            err,
            AnalyzeError::Rejected { reason: UploadRejection::UnsupportedType, .. }
        );
        assert!(analyzer.ocr().calls().is_empty());
    }

    #[tokio::test]
    async fn failed_conversion_stops_the_flow() {
        let analyzer = DocumentAnalyzer::new(RecordingOcr {
            fail_conversion: true,
            ..RecordingOcr::ok()
        });
        let err = analyzer.analyze_ktp(heic(), false).await.unwrap_err();

        assert_matches!(err, AnalyzeError::ConversionFailed { .. });
        assert_eq!(
            err.to_string(),
            "Gagal mengkonversi HEIC. Silakan gunakan format JPG atau PNG."
        );
        assert_eq!(analyzer.ocr().calls().len(), 1);
    }

    #[tokio::test]
    async fn unsuccessful_analysis_keeps_the_file() {
        let analyzer = DocumentAnalyzer::new(RecordingOcr::default());
        let err = analyzer.analyze_ktp(jpeg(), false).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Gagal menganalisis KTP. Silakan isi data secara manual."
        );
        assert_eq!(err.processed_file(), Some(&jpeg()));
    }

    #[tokio::test]
    async fn rate_limit_has_its_own_message() {
        let analyzer = DocumentAnalyzer::new(RecordingOcr {
            analysis_status: Some(429),
            ..RecordingOcr::ok()
        });
        let err = analyzer.analyze_passport(jpeg(), false).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Too many requests. Please wait a moment and try again."
        );
    }
}
