//! File names and MIME types of the downloads the dashboards offer.

use chrono::NaiveDate;

use crate::payment::ReportFormat;

pub const CSV_CONTENT_TYPE: &str = "text/csv";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A file handed to the browser as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub content_type: &'static str,
}

impl Download {
    /// The Carstensz screening export, stamped with the export day.
    pub fn screenings_csv(today: NaiveDate) -> Self {
        Self {
            filename: format!("screenings_{}.csv", today.format("%Y-%m-%d")),
            content_type: CSV_CONTENT_TYPE,
        }
    }

    pub fn payment_report(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Pdf => Self {
                filename: "laporan_pembayaran.pdf".to_string(),
                content_type: PDF_CONTENT_TYPE,
            },
            ReportFormat::Excel => Self {
                filename: "laporan_pembayaran.xlsx".to_string(),
                content_type: XLSX_CONTENT_TYPE,
            },
        }
    }

    /// `Content-Disposition` header value.
    pub fn content_disposition(&self) -> String {
        let safe: String = self
            .filename
            .chars()
            .map(|c| if c == '"' || c.is_control() { '_' } else { c })
            .collect();
        format!("attachment; filename=\"{safe}\"")
    }
}
