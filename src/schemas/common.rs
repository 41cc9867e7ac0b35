use std::collections::BTreeMap;

use poem_openapi::Object;

/// Outcome envelope shared by both generate endpoints.
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct ReportResponse {
    pub success: bool,
    pub message: String,
    #[oai(skip_serializing_if_is_none)]
    pub report_id: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub output_path: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub output_format: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub generation_time_ms: Option<u64>,
    #[oai(skip_serializing_if_is_none)]
    pub download_url: Option<String>,
    #[oai(skip_serializing_if_is_none)]
    pub error: Option<String>,
}

impl ReportResponse {
    pub fn success(
        report_id: &str,
        output_path: &str,
        format: &str,
        time_ms: u64,
        download_url: &str,
    ) -> Self {
        Self {
            success: true,
            message: "Report generated successfully".to_string(),
            report_id: Some(report_id.to_string()),
            output_path: Some(output_path.to_string()),
            output_format: Some(format.to_string()),
            generation_time_ms: Some(time_ms),
            download_url: Some(download_url.to_string()),
            error: None,
        }
    }

    pub fn error(message: &str, error: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            report_id: None,
            output_path: None,
            output_format: None,
            generation_time_ms: None,
            download_url: None,
            error: Some(error.to_string()),
        }
    }
}

/// Rejection listing every offending field with its reason.
#[derive(Object, Debug, Clone)]
pub struct ValidationErrorResponse {
    pub success: bool,
    pub message: String,
    pub errors: BTreeMap<String, String>,
}

impl ValidationErrorResponse {
    pub fn new(errors: BTreeMap<String, String>) -> Self {
        Self {
            success: false,
            message: "Validation failed".to_string(),
            errors,
        }
    }
}
