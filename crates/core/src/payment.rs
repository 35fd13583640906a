//! Cashier records: service prices and payment reports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, IsoDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    Today,
    ThisWeek,
    ThisMonth,
    LastMonth,
    Custom,
}

impl PeriodType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::ThisWeek => "this_week",
            Self::ThisMonth => "this_month",
            Self::LastMonth => "last_month",
            Self::Custom => "custom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Pdf,
    Excel,
}

impl ReportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Excel => "excel",
        }
    }
}

/// Form posted to `/screening/cashier/office`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReportRequest {
    pub period_type: PeriodType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<IsoDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<IsoDate>,
    pub format: ReportFormat,
}

impl PaymentReportRequest {
    /// A custom period needs both bounds, in order.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.period_type != PeriodType::Custom {
            return Ok(());
        }

        let (Some(start), Some(end)) = (non_empty(&self.start_date), non_empty(&self.end_date))
        else {
            return Err(CoreError::Validation(
                "Tanggal mulai dan tanggal akhir wajib diisi".into(),
            ));
        };

        let start = parse_iso(start)?;
        let end = parse_iso(end)?;
        if start > end {
            return Err(CoreError::Validation(
                "Tanggal mulai tidak boleh setelah tanggal akhir".into(),
            ));
        }
        Ok(())
    }

    /// Form fields in send order. Dates go out only for a custom period.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("period_type", self.period_type.as_str().to_string()),
            ("format", self.format.as_str().to_string()),
        ];
        if self.period_type == PeriodType::Custom {
            fields.push(("start_date", self.start_date.clone().unwrap_or_default()));
            fields.push(("end_date", self.end_date.clone().unwrap_or_default()));
        }
        fields
    }
}

/// A priced service as listed by `GET /amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountService {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub screening_id: Option<DbId>,
    #[serde(default, rename = "type")]
    pub service_type: Option<String>,
    pub amount: f64,
}

fn non_empty(value: &Option<IsoDate>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_iso(value: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| CoreError::Validation(format!("Format tanggal tidak valid: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn custom(start: Option<&str>, end: Option<&str>) -> PaymentReportRequest {
        PaymentReportRequest {
            period_type: PeriodType::Custom,
            start_date: start.map(Into::into),
            end_date: end.map(Into::into),
            format: ReportFormat::Excel,
        }
    }

    #[test]
    fn fixed_periods_need_no_dates() {
        let req = PaymentReportRequest {
            period_type: PeriodType::LastMonth,
            start_date: None,
            end_date: None,
            format: ReportFormat::Pdf,
        };
        assert!(req.validate().is_ok());
        assert_eq!(
            req.form_fields(),
            vec![
                ("period_type", "last_month".to_string()),
                ("format", "pdf".to_string()),
            ]
        );
    }

    #[test]
    fn custom_period_requires_both_dates() {
        assert_matches!(custom(Some("2025-07-01"), None).validate(), Err(CoreError::Validation(_)));
        assert_matches!(custom(None, Some("2025-07-01")).validate(), Err(CoreError::Validation(_)));
        assert_matches!(custom(Some(" "), Some("2025-07-01")).validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn custom_period_must_be_ordered() {
        assert!(custom(Some("2025-07-01"), Some("2025-07-01")).validate().is_ok());
        assert!(custom(Some("2025-07-01"), Some("2025-07-31")).validate().is_ok());
        assert_matches!(
            custom(Some("2025-08-01"), Some("2025-07-31")).validate(),
            Err(CoreError::Validation(msg)) if msg.contains("setelah")
        );
        assert_matches!(
            custom(Some("01-07-2025"), Some("2025-07-31")).validate(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn custom_form_fields_carry_dates() {
        let fields = custom(Some("2025-07-01"), Some("2025-07-31")).form_fields();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[1], ("format", "excel".to_string()));
        assert_eq!(fields[3], ("end_date", "2025-07-31".to_string()));
    }

    #[test]
    fn amount_service_accepts_both_listing_shapes() {
        let cashier: AmountService =
            serde_json::from_str(r#"{"screening_id": 5, "amount": 150000}"#).unwrap();
        assert_eq!(cashier.screening_id, Some(5));

        let admin: AmountService =
            serde_json::from_str(r#"{"id": 2, "type": "konsultasi", "amount": 75000.5}"#).unwrap();
        assert_eq!(admin.service_type.as_deref(), Some("konsultasi"));
    }
}
