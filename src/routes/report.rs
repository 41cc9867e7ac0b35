use std::sync::Arc;
use std::time::{Duration, Instant};

use poem::web::Data;
use poem_openapi::{
    OpenApi, Tags,
    param::Path,
    payload::{Json, PlainText},
};
use uuid::Uuid;

use crate::{
    AppState,
    core::{
        error::EngineError,
        registry::TEMPLATE_CATALOG,
        validation::{Validate, ValidationErrors},
    },
    schemas::{
        common::{ReportResponse, ValidationErrorResponse},
        report::{
            DeleteAck, DynamicReportRequest, GenerateReportResponse, ReportRequest, ReportStatus,
            TemplateList,
        },
    },
};

#[derive(Tags)]
enum ApiReportTags {
    /// Generating and managing reports
    Reports,
}

pub struct ApiReport;

fn rejected(function: &str, errors: ValidationErrors) -> GenerateReportResponse {
    tracing::warn!("route.report::{} rejected request: {}", function, errors);
    GenerateReportResponse::BadRequest(Json(ValidationErrorResponse::new(errors.into_map())))
}

fn failed(function: &str, err: EngineError) -> GenerateReportResponse {
    let err = match err {
        EngineError::Invalid(errors) => return rejected(function, errors),
        other => other,
    };
    let message = if matches!(err, EngineError::Io { .. }) {
        "Report generation failed"
    } else {
        "Internal server error"
    };
    tracing::error!("error: on route.report::{} error: {}", function, err);
    GenerateReportResponse::InternalServerError(Json(ReportResponse::error(
        message,
        &err.to_string(),
    )))
}

#[OpenApi()]
impl ApiReport {
    /// Generate dynamic report from library
    ///
    /// Builds a report design from components of a report library (datasource,
    /// datasets, parameters, tables and charts), then renders it in the
    /// requested format.
    ///
    /// # Example Request
    /// ```json
    /// {
    ///   "libraryPath": "reports/library/common.rptlibrary",
    ///   "reportName": "sales",
    ///   "outputFormat": "pdf",
    ///   "datasetNames": ["SalesDataset"],
    ///   "components": {
    ///     "title": { "text": "Monthly Sales" },
    ///     "tables": [{
    ///       "datasetName": "SalesDataset",
    ///       "title": "Sales by Region",
    ///       "columns": [{ "name": "region", "label": "Region" }]
    ///     }]
    ///   }
    /// }
    /// ```
    #[oai(
        path = "/reports/generate-dynamic",
        method = "post",
        tag = "ApiReportTags::Reports"
    )]
    async fn generate_dynamic(
        &self,
        Json(json): Json<DynamicReportRequest>,
        state: Data<&Arc<AppState>>,
    ) -> GenerateReportResponse {
        tracing::info!(
            "Generating dynamic report from library: {}",
            json.library_path.as_deref().unwrap_or_default()
        );

        if let Err(errors) = json.validate() {
            return rejected("generate_dynamic", errors);
        }

        let report = match state.engine.generate(json).await {
            Ok(report) => report,
            Err(e) => return failed("generate_dynamic", e),
        };

        let report_id = report.report_id.to_string();
        let elapsed_ms = report.elapsed.as_millis() as u64;
        tracing::info!(
            "Dynamic report generated successfully: {} in {}ms",
            report_id,
            elapsed_ms
        );

        GenerateReportResponse::Ok(Json(ReportResponse::success(
            &report_id,
            &report.output_path.display().to_string(),
            &report.format,
            elapsed_ms,
            &state.config.download_url(&report_id),
        )))
    }

    /// Generate a report
    ///
    /// Simulated generation of a named report in any supported format. No
    /// files are written.
    #[oai(path = "/reports/generate", method = "post", tag = "ApiReportTags::Reports")]
    async fn generate(
        &self,
        Json(json): Json<ReportRequest>,
        state: Data<&Arc<AppState>>,
    ) -> GenerateReportResponse {
        tracing::info!(
            "Generating report: {} in format: {}",
            json.report_name.as_deref().unwrap_or_default(),
            json.output_format.as_deref().unwrap_or_default()
        );

        if let Err(errors) = json.validate() {
            return rejected("generate", errors);
        }
        tracing::debug!(
            "locale={:?} page_range={:?} output_file_name={:?} parameters={}",
            json.locale,
            json.page_range,
            json.output_file_name,
            json.parameters.as_ref().map_or(0, |p| p.len())
        );

        let started = Instant::now();
        let report_id = Uuid::new_v4();
        let format = json.output_format.unwrap_or_default();

        tokio::time::sleep(Duration::from_millis(state.config.simulated_delay_ms)).await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let report_id_str = report_id.to_string();
        tracing::info!("Report generated successfully: {}", report_id_str);

        GenerateReportResponse::Ok(Json(ReportResponse::success(
            &report_id_str,
            &state
                .engine
                .output_path(&report_id, &format)
                .display()
                .to_string(),
            &format,
            elapsed_ms,
            &state.config.download_url(&report_id_str),
        )))
    }

    /// Get report status
    #[oai(path = "/reports/status/:id", method = "get", tag = "ApiReportTags::Reports")]
    async fn status(&self, id: Path<String>) -> Json<ReportStatus> {
        tracing::info!("Checking status for report: {}", id.0);

        Json(ReportStatus {
            report_id: id.0,
            status: "COMPLETED".to_string(),
            progress: 100,
            message: "Report generation completed".to_string(),
        })
    }

    /// Download generated report
    #[oai(path = "/reports/download/:id", method = "get", tag = "ApiReportTags::Reports")]
    async fn download(&self, id: Path<String>) -> PlainText<String> {
        tracing::info!("Downloading report: {}", id.0);

        PlainText(format!(
            "Report download would happen here. Report ID: {}",
            id.0
        ))
    }

    /// List available report templates
    #[oai(path = "/reports/templates", method = "get", tag = "ApiReportTags::Reports")]
    async fn templates(&self) -> Json<TemplateList> {
        tracing::info!("Listing available report templates");

        let templates: Vec<String> = TEMPLATE_CATALOG.iter().map(|t| t.to_string()).collect();
        Json(TemplateList {
            count: templates.len(),
            templates,
        })
    }

    /// Health check
    #[oai(path = "/reports/health", method = "get", tag = "ApiReportTags::Reports")]
    async fn health(&self, state: Data<&Arc<AppState>>) -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "UP",
            "service": "Report Engine",
            "version": env!("CARGO_PKG_VERSION"),
            "renderer": state.engine.renderer_name(),
        }))
    }

    /// Delete a report
    #[oai(path = "/reports/:id", method = "delete", tag = "ApiReportTags::Reports")]
    async fn delete(&self, id: Path<String>) -> Json<DeleteAck> {
        tracing::info!("Deleting report: {}", id.0);

        Json(DeleteAck {
            message: "Report deleted successfully".to_string(),
            report_id: id.0,
        })
    }
}
