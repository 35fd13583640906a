//! User-facing message catalog.
//!
//! The citizen (KTP) flow and the staff dashboards speak Indonesian; the
//! foreign-national (passport) flow speaks English.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Id,
    En,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::En => "en",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    OperationSucceeded,
    GenericError,
    SessionExpired,
    ServerUnreachable,
    Unexpected,
    UnsupportedFileType,
    FileTooLarge,
    HeicConverted,
    HeicConversionFailed,
    AnalysisSucceeded,
    AnalysisFailed,
    AnalysisRateLimited,
    AnalysisConnection,
    QuestionnaireUnavailable,
    SubmitFailed,
    PatientNotFound,
    PatientLoadFailed,
}

impl Message {
    pub fn text(self, locale: Locale) -> &'static str {
        use Locale::{En, Id};
        match (self, locale) {
            (Self::OperationSucceeded, Id) => "Operasi berhasil",
            (Self::OperationSucceeded, En) => "Operation succeeded",
            (Self::GenericError, Id) => "Terjadi kesalahan",
            (Self::GenericError, En) => "An error occurred",
            (Self::SessionExpired, Id) => "Sesi Anda telah berakhir. Silakan login kembali.",
            (Self::SessionExpired, En) => "Your session has expired. Please log in again.",
            (Self::ServerUnreachable, Id) => "Tidak dapat terhubung ke server",
            (Self::ServerUnreachable, En) => "Unable to reach the server",
            (Self::Unexpected, Id) => "Terjadi kesalahan yang tidak terduga",
            (Self::Unexpected, En) => "An unexpected error occurred",
            (Self::UnsupportedFileType, Id) => {
                "Format file tidak didukung. Gunakan JPG, PNG, WebP, atau HEIC."
            }
            (Self::UnsupportedFileType, En) => {
                "File format not supported. Use JPG, PNG, WebP, or HEIC."
            }
            (Self::FileTooLarge, Id) => "Ukuran file maksimal 20MB",
            (Self::FileTooLarge, En) => "Maximum file size is 20MB.",
            (Self::HeicConverted, Id) => "File HEIC berhasil dikonversi",
            (Self::HeicConverted, En) => "HEIC file successfully converted",
            (Self::HeicConversionFailed, Id) => {
                "Gagal mengkonversi HEIC. Silakan gunakan format JPG atau PNG."
            }
            (Self::HeicConversionFailed, En) => "Failed to convert HEIC. Please use JPG or PNG.",
            (Self::AnalysisSucceeded, Id) => {
                "KTP berhasil dianalisis! Silakan cek data yang terisi."
            }
            (Self::AnalysisSucceeded, En) => {
                "Passport successfully analyzed! Please review the filled data."
            }
            (Self::AnalysisFailed, Id) => {
                "Gagal menganalisis KTP. Silakan isi data secara manual."
            }
            (Self::AnalysisFailed, En) => {
                "Failed to analyze Passport. Please fill in the data manually."
            }
            (Self::AnalysisRateLimited, Id) => {
                "Terlalu banyak permintaan. Silakan tunggu sebentar dan coba lagi."
            }
            (Self::AnalysisRateLimited, En) => {
                "Too many requests. Please wait a moment and try again."
            }
            (Self::AnalysisConnection, Id) => "Koneksi bermasalah. Pastikan internet stabil.",
            (Self::AnalysisConnection, En) => "Connection issue. Please ensure stable internet.",
            (Self::QuestionnaireUnavailable, Id) => {
                "Gagal memuat kuesioner. Silakan refresh halaman."
            }
            (Self::QuestionnaireUnavailable, En) => {
                "Failed to load the questionnaire. Please refresh the page."
            }
            (Self::SubmitFailed, Id) => "Gagal mengirim data. Silakan coba lagi.",
            (Self::SubmitFailed, En) => "Failed to submit data. Please try again.",
            (Self::PatientNotFound, Id) => "Data pasien tidak ditemukan.",
            (Self::PatientNotFound, En) => "Patient data not found.",
            (Self::PatientLoadFailed, Id) => "Gagal memuat data pasien.",
            (Self::PatientLoadFailed, En) => "Failed to load patient data.",
        }
    }
}
