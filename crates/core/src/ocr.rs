//! Payloads of the OCR service and how they fill the screening forms.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::patient::{PatientData, PatientDataWna};

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("ISO date pattern is valid"));

static DMY_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2})-(\d{2})-(\d{4})").expect("DMY date pattern is valid"));

/// `{ success, data }` wrapper returned by the analysis endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OcrEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
}

impl<T> OcrEnvelope<T> {
    /// The extracted fields, when the service reports success.
    pub fn into_fields(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

/// `{ data: { jpeg_base64, converted_filename } }` from `/convert-heic`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeicConversionEnvelope {
    pub data: HeicConversion,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HeicConversion {
    pub jpeg_base64: String,
    pub converted_filename: String,
}

/// Fields read from an Indonesian identity card (KTP).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct KtpAnalysis {
    #[serde(rename = "NIK", default)]
    pub nik: Option<String>,
    #[serde(rename = "Nama", default)]
    pub name: Option<String>,
    #[serde(rename = "Tempat Lahir", default)]
    pub place_of_birth: Option<String>,
    #[serde(rename = "Tanggal Lahir", default)]
    pub date_of_birth: Option<String>,
    #[serde(rename = "Jenis Kelamin", default)]
    pub gender: Option<String>,
    #[serde(rename = "Alamat", default)]
    pub address: Option<String>,
    #[serde(rename = "RT/RW", default)]
    pub rt_rw: Option<String>,
    #[serde(rename = "Kelurahan/Desa", default)]
    pub village: Option<String>,
    #[serde(rename = "Kecamatan", default)]
    pub district: Option<String>,
    #[serde(rename = "Agama", default)]
    pub religion: Option<String>,
    #[serde(rename = "Status Perkawinan", default)]
    pub marital_status: Option<String>,
    #[serde(rename = "Pekerjaan", default)]
    pub occupation: Option<String>,
    #[serde(rename = "Kewarganegaraan", default)]
    pub nationality: Option<String>,
    #[serde(rename = "Berlaku Hingga", default)]
    pub valid_until: Option<String>,
    #[serde(rename = "Golongan Darah", default)]
    pub blood_type: Option<String>,
}

impl KtpAnalysis {
    /// Copy every recognised field into the citizen form. Missing fields are
    /// cleared, like a fresh scan would. The KTP writes gender as
    /// `LAKI-LAKI` / `PEREMPUAN`; the form uses the lowercase spelling.
    pub fn apply_to(&self, patient: &mut PatientData, today: chrono::NaiveDate) {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();

        patient.nik = text(&self.nik);
        patient.name = text(&self.name);
        patient.place_of_birth = text(&self.place_of_birth);
        patient.date_of_birth = parse_date_to_iso(&text(&self.date_of_birth));
        patient.age = crate::patient::calculate_age(&patient.date_of_birth, today);
        patient.gender = text(&self.gender).to_lowercase();
        patient.address = text(&self.address);
        patient.rt_rw = text(&self.rt_rw);
        patient.village = text(&self.village);
        patient.district = text(&self.district);
        patient.religion = text(&self.religion);
        patient.marital_status = text(&self.marital_status);
        patient.occupation = text(&self.occupation);
        patient.nationality = text(&self.nationality);
        patient.valid_until = text(&self.valid_until);
        patient.blood_type = text(&self.blood_type);
    }
}

/// Fields read from a passport's machine-readable page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PassportAnalysis {
    #[serde(rename = "Passport Number", default)]
    pub passport_number: Option<String>,
    #[serde(rename = "Full Name", default)]
    pub full_name: Option<String>,
    #[serde(rename = "Date of Birth", default)]
    pub date_of_birth: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Nationality", default)]
    pub nationality: Option<String>,
}

impl PassportAnalysis {
    /// Copy the recognised fields into the WNA form. A gender the form does
    /// not accept is left unchanged.
    pub fn apply_to(&self, patient: &mut PatientDataWna) {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();

        patient.passport_number = text(&self.passport_number);
        patient.name = text(&self.full_name);
        patient.date_of_birth = parse_date_to_iso(&text(&self.date_of_birth));
        // Invalid genders are ignored by `set`; unknown fields cannot occur here.
        let _ = patient.set("gender", text(&self.gender).to_lowercase());
        patient.nationality = text(&self.nationality);
    }
}

/// Normalise an OCR date to `YYYY-MM-DD`.
///
/// ISO dates pass through, the first `DD-MM-YYYY` occurrence is reordered,
/// and anything else is returned unchanged.
pub fn parse_date_to_iso(raw: &str) -> String {
    if raw.is_empty() || ISO_DATE.is_match(raw) {
        return raw.to_string();
    }
    match DMY_DATE.captures(raw) {
        Some(c) => format!("{}-{}-{}", &c[3], &c[2], &c[1]),
        None => raw.to_string(),
    }
}
