//! Guards for identity-document uploads (KTP and passport photos).

use std::sync::LazyLock;

use regex::Regex;

use crate::locale::{Locale, Message};

/// Largest accepted upload (20 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

/// Accepted MIME types.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/heic",
    "image/heif",
];

/// Accepted file extensions (lowercase, without the dot).
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "heic", "heif"];

const HEIC_EXTENSIONS: &[&str] = &["heic", "heif"];

static MOBILE_UA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)iPhone|iPad|iPod|Android").expect("mobile user-agent pattern is valid")
});

/// An uploaded file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lowercased extension after the last dot, or `""`.
    pub fn extension(&self) -> String {
        extension_of(&self.file_name)
    }
}

/// How an accepted upload must be processed before analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Can be sent to the analyzer as is.
    Standard,
    /// Must be converted to JPEG first.
    Heic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("unsupported file type")]
    UnsupportedType,
    #[error("file exceeds {MAX_UPLOAD_BYTES} bytes")]
    TooLarge,
}

impl UploadRejection {
    pub fn message(self, locale: Locale) -> &'static str {
        match self {
            Self::UnsupportedType => Message::UnsupportedFileType.text(locale),
            Self::TooLarge => Message::FileTooLarge.text(locale),
        }
    }
}

/// Check type and size, and tell whether HEIC conversion is needed.
///
/// A file passes the type check when either its MIME type or its
/// extension is on the allow list.
pub fn inspect(file: &UploadedFile) -> Result<UploadKind, UploadRejection> {
    let ext = file.extension();
    let content_type = file.content_type.to_ascii_lowercase();

    let type_ok = ALLOWED_CONTENT_TYPES.contains(&content_type.as_str())
        || ALLOWED_EXTENSIONS.contains(&ext.as_str());
    if !type_ok {
        return Err(UploadRejection::UnsupportedType);
    }

    if file.size() > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge);
    }

    let is_heic = content_type.contains("heic")
        || content_type.contains("heif")
        || HEIC_EXTENSIONS.contains(&ext.as_str());

    Ok(if is_heic {
        UploadKind::Heic
    } else {
        UploadKind::Standard
    })
}

/// Whether the user agent belongs to a phone or tablet.
///
/// The OCR service uses this hint to tune preprocessing for camera photos.
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    MOBILE_UA.is_match(user_agent)
}

fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default()
}
