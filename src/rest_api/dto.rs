//! Response bodies for the REST API

use serde::{Deserialize, Serialize};

pub const REPORT_UPLOADED_MESSAGE: &str = "Emissions report generated and uploaded successfully.";
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload data to Azure Blob Storage.";
pub const RENDER_FAILED_MESSAGE: &str = "Failed to generate emissions report.";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Successful report acknowledgement
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub message: String,
    pub file_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Query string of `GET /api/emission/{activity}`
#[derive(Debug, Deserialize)]
pub struct EmissionQuery {
    /// A missing value is treated as zero and rejected
    #[serde(rename = "usageValue", alias = "usagevalue", default)]
    pub usage_value: Option<f64>,
}
