//! Nurse dashboard records: physical examinations and overview counters.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, IsoDate};

/// Outcome of a physical examination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Sehat,
    TidakSehatDenganPendamping,
    TidakSehat,
}

impl HealthStatus {
    /// Only "fit with escort" requires choosing who accompanies the climber.
    pub fn needs_accompaniment(self) -> bool {
        matches!(self, Self::TidakSehatDenganPendamping)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicalAccompaniment {
    PendampinganPerawat,
    PendampinganParamedis,
    PendampinganDokter,
}

/// Body of `POST /screening/physical-examination`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalExamination {
    pub paramedis_id: DbId,
    pub patient_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respiratory_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_assessment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_advice: Option<String>,
    pub health_status: HealthStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_accompaniment: Option<MedicalAccompaniment>,
}

impl PhysicalExamination {
    /// Drop an accompaniment that the chosen status does not call for.
    pub fn normalized(mut self) -> Self {
        if !self.health_status.needs_accompaniment() {
            self.medical_accompaniment = None;
        }
        self
    }
}

/// Body of `PUT /screening/update/patient/physical-examination/{id}`.
/// Every field is optional; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicalExaminationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paramedis_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respiratory_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_assessment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_advice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_status: Option<HealthStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medical_accompaniment: Option<MedicalAccompaniment>,
}

/// Counters sent to `POST /nurse/ai-analysis`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NurseStats {
    pub waiting_count: u64,
    pub sehat_count: u64,
    pub tidak_sehat_count: u64,
    pub finished_count: u64,
    pub today_count: u64,
    pub week_count: u64,
    pub month_count: u64,
    pub total_count: u64,
}

/// Filters of the activity logs (`/management/activity/*`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<IsoDate>,
}
