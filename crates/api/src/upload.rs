//! Buffering of incoming `multipart/form-data` bodies.

use axum::extract::Multipart;
use klinik_client::screening::file_part;
use klinik_core::upload::UploadedFile;

use crate::error::{AppError, AppResult};

/// Content type assumed for file parts that do not declare one.
const DEFAULT_FILE_TYPE: &str = "application/octet-stream";

/// A multipart body read fully into memory, in field order.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, UploadedFile)>,
}

impl MultipartForm {
    /// Read every part. Parts with a file name are files, the rest text.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or(DEFAULT_FILE_TYPE)
                        .to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.files.push((
                        name,
                        UploadedFile::new(file_name, content_type, data.to_vec()),
                    ));
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    form.fields.push((name, text));
                }
            }
        }

        Ok(form)
    }

    /// Last value of a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Remove and return the first file sent under `name`.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        let index = self.files.iter().position(|(key, _)| key == name)?;
        Some(self.files.remove(index).1)
    }

    /// Rebuild the body for forwarding upstream.
    pub fn into_reqwest(self) -> reqwest::multipart::Form {
        let form = self
            .fields
            .into_iter()
            .fold(reqwest::multipart::Form::new(), |form, (k, v)| form.text(k, v));
        self.files
            .iter()
            .fold(form, |form, (name, file)| form.part(name.clone(), file_part(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_text_value_wins() {
        let form = MultipartForm {
            fields: vec![
                ("name".into(), "Budi".into()),
                ("name".into(), "Budi Santoso".into()),
            ],
            files: Vec::new(),
        };
        assert_eq!(form.text("name"), Some("Budi Santoso"));
        assert_eq!(form.text("email"), None);
    }

    #[test]
    fn take_file_removes_it() {
        let mut form = MultipartForm {
            fields: Vec::new(),
            files: vec![(
                "ktp_images".into(),
                UploadedFile::new("ktp.jpg", "image/jpeg", vec![1]),
            )],
        };
        assert!(form.take_file("ktp_images").is_some());
        assert!(form.take_file("ktp_images").is_none());
    }
}
