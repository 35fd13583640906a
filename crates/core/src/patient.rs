//! Screening form state for the two patient types.
//!
//! [`PatientData`] is the Indonesian citizen form (identity from the KTP card),
//! [`PatientDataWna`] the foreign-national form (identity from the passport).
//! Both start empty, change one field at a time, and are validated once
//! before the multipart submit.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::upload::UploadedFile;

/// A required form field and the label shown when it is missing.
#[derive(Debug, Clone, Copy)]
struct RequiredField {
    key: &'static str,
    label: &'static str,
}

const CITIZEN_REQUIRED: &[RequiredField] = &[
    RequiredField { key: "nik", label: "NIK" },
    RequiredField { key: "name", label: "Nama" },
    RequiredField { key: "place_of_birth", label: "Tempat Lahir" },
    RequiredField { key: "date_of_birth", label: "Tanggal Lahir" },
    RequiredField { key: "gender", label: "Jenis Kelamin" },
    RequiredField { key: "address", label: "Alamat" },
    RequiredField { key: "email", label: "Email" },
    RequiredField { key: "contact", label: "Nomor Telepon" },
];

const WNA_REQUIRED: &[RequiredField] = &[
    RequiredField { key: "passport_number", label: "Passport number" },
    RequiredField { key: "name", label: "Full Name" },
    RequiredField { key: "date_of_birth", label: "Date Of Birth" },
    RequiredField { key: "gender", label: "Gender" },
    RequiredField { key: "email", label: "Email" },
];

/// Accepted WNA gender values; `""` means "not chosen yet".
pub const WNA_GENDERS: &[&str] = &["male", "female", ""];

/// Multipart field carrying the citizen's KTP photo.
pub const KTP_IMAGE_FIELD: &str = "ktp_images";

/// Multipart field carrying the foreign national's passport photo.
pub const PASSPORT_IMAGE_FIELD: &str = "passport_images";

// ---------------------------------------------------------------------------
// Citizen
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientData {
    pub nik: String,
    pub name: String,
    pub email: String,
    pub age: String,
    pub gender: String,
    pub contact: String,
    pub place_of_birth: String,
    pub date_of_birth: String,
    pub address: String,
    pub rt_rw: String,
    pub village: String,
    pub district: String,
    pub religion: String,
    pub marital_status: String,
    pub occupation: String,
    pub nationality: String,
    pub valid_until: String,
    pub blood_type: String,
    pub tinggi_badan: String,
    pub berat_badan: String,
    #[serde(skip)]
    pub ktp_images: Option<UploadedFile>,
}

impl PatientData {
    /// Update a single field by its wire name.
    ///
    /// Setting `date_of_birth` also recomputes `age` as of `today`.
    pub fn set(
        &mut self,
        field: &str,
        value: impl Into<String>,
        today: NaiveDate,
    ) -> Result<(), CoreError> {
        let value = value.into();
        if field == "date_of_birth" {
            self.age = calculate_age(&value, today);
        }
        let slot = self
            .field_mut(field)
            .ok_or_else(|| CoreError::UnknownField(field.to_string()))?;
        *slot = value;
        Ok(())
    }

    /// Check the required fields. The error lists every missing label.
    pub fn validate(&self) -> Result<(), CoreError> {
        let missing = missing_labels(CITIZEN_REQUIRED, |key| self.field(key));
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Silakan lengkapi data: {}",
                missing.join(", ")
            )))
        }
    }

    /// Text fields in submit order. The photo travels separately under
    /// [`KTP_IMAGE_FIELD`].
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        CITIZEN_FIELDS
            .iter()
            .map(|&key| (key, self.field(key).unwrap_or_default().to_string()))
            .collect()
    }

    fn field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "nik" => &self.nik,
            "name" => &self.name,
            "email" => &self.email,
            "age" => &self.age,
            "gender" => &self.gender,
            "contact" => &self.contact,
            "place_of_birth" => &self.place_of_birth,
            "date_of_birth" => &self.date_of_birth,
            "address" => &self.address,
            "rt_rw" => &self.rt_rw,
            "village" => &self.village,
            "district" => &self.district,
            "religion" => &self.religion,
            "marital_status" => &self.marital_status,
            "occupation" => &self.occupation,
            "nationality" => &self.nationality,
            "valid_until" => &self.valid_until,
            "blood_type" => &self.blood_type,
            "tinggi_badan" => &self.tinggi_badan,
            "berat_badan" => &self.berat_badan,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        Some(match key {
            "nik" => &mut self.nik,
            "name" => &mut self.name,
            "email" => &mut self.email,
            "age" => &mut self.age,
            "gender" => &mut self.gender,
            "contact" => &mut self.contact,
            "place_of_birth" => &mut self.place_of_birth,
            "date_of_birth" => &mut self.date_of_birth,
            "address" => &mut self.address,
            "rt_rw" => &mut self.rt_rw,
            "village" => &mut self.village,
            "district" => &mut self.district,
            "religion" => &mut self.religion,
            "marital_status" => &mut self.marital_status,
            "occupation" => &mut self.occupation,
            "nationality" => &mut self.nationality,
            "valid_until" => &mut self.valid_until,
            "blood_type" => &mut self.blood_type,
            "tinggi_badan" => &mut self.tinggi_badan,
            "berat_badan" => &mut self.berat_badan,
            _ => return None,
        })
    }
}

const CITIZEN_FIELDS: &[&str] = &[
    "nik",
    "name",
    "email",
    "age",
    "gender",
    "contact",
    "place_of_birth",
    "date_of_birth",
    "address",
    "rt_rw",
    "village",
    "district",
    "religion",
    "marital_status",
    "occupation",
    "nationality",
    "valid_until",
    "blood_type",
    "tinggi_badan",
    "berat_badan",
];

// ---------------------------------------------------------------------------
// Foreign national (WNA)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientDataWna {
    pub passport_number: String,
    pub name: String,
    pub email: String,
    pub date_of_birth: String,
    pub gender: String,
    pub nationality: String,
    pub contact: String,
    #[serde(skip)]
    pub passport_images: Option<UploadedFile>,
}

const WNA_FIELDS: &[&str] = &[
    "passport_number",
    "name",
    "email",
    "date_of_birth",
    "gender",
    "nationality",
    "contact",
];

impl PatientDataWna {
    /// Update a single field by its wire name.
    ///
    /// Returns `Ok(false)` when a gender outside [`WNA_GENDERS`] was ignored.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<bool, CoreError> {
        let value = value.into();
        if field == "gender" && !WNA_GENDERS.contains(&value.as_str()) {
            return Ok(false);
        }
        let slot = self
            .field_mut(field)
            .ok_or_else(|| CoreError::UnknownField(field.to_string()))?;
        *slot = value;
        Ok(true)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let missing = missing_labels(WNA_REQUIRED, |key| self.field(key));
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Please complete the data {}",
                missing.join(", ")
            )))
        }
    }

    /// Text fields in submit order. The photo travels separately under
    /// [`PASSPORT_IMAGE_FIELD`].
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        WNA_FIELDS
            .iter()
            .map(|&key| (key, self.field(key).unwrap_or_default().to_string()))
            .collect()
    }

    fn field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "passport_number" => &self.passport_number,
            "name" => &self.name,
            "email" => &self.email,
            "date_of_birth" => &self.date_of_birth,
            "gender" => &self.gender,
            "nationality" => &self.nationality,
            "contact" => &self.contact,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut String> {
        Some(match key {
            "passport_number" => &mut self.passport_number,
            "name" => &mut self.name,
            "email" => &mut self.email,
            "date_of_birth" => &mut self.date_of_birth,
            "gender" => &mut self.gender,
            "nationality" => &mut self.nationality,
            "contact" => &mut self.contact,
            _ => return None,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn missing_labels<'a>(
    required: &[RequiredField],
    lookup: impl Fn(&str) -> Option<&'a str>,
) -> Vec<&'static str> {
    required
        .iter()
        .filter(|f| lookup(f.key).map_or(true, |v| v.trim().is_empty()))
        .map(|f| f.label)
        .collect()
}

/// Whole years between `date_of_birth` (`YYYY-MM-DD`) and `today`.
///
/// Returns `""` for an empty or unparsable date.
pub fn calculate_age(date_of_birth: &str, today: NaiveDate) -> String {
    let Ok(dob) = NaiveDate::parse_from_str(date_of_birth, "%Y-%m-%d") else {
        return String::new();
    };
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age.to_string()
}
