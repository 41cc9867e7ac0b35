use std::collections::BTreeMap;

use poem_openapi::{
    ApiResponse, Object,
    payload::Json,
};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::common::{ReportResponse, ValidationErrorResponse};

/// Report generated from components of a report library
#[derive(Object, Deserialize, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct DynamicReportRequest {
    /// Path to the .rptlibrary file holding datasources, datasets and parameters
    pub library_path: Option<String>,

    /// Name for the generated report
    pub report_name: Option<String>,

    /// Output format (pdf, html, xls, xlsx, doc, docx)
    pub output_format: Option<String>,

    /// Data source name from the library
    pub data_source_name: Option<String>,

    /// Dataset names from the library, at least one
    pub dataset_names: Option<Vec<String>>,

    /// Report parameters with their values
    pub parameters: Option<BTreeMap<String, JsonValue>>,

    /// Layout of the report body
    pub components: Option<ReportComponents>,
}

#[derive(Object, Deserialize, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct ReportComponents {
    pub title: Option<TitleSection>,
    pub tables: Option<Vec<TableConfig>>,
    pub charts: Option<Vec<ChartConfig>>,
    pub footer: Option<String>,

    /// portrait / landscape
    pub page_orientation: Option<String>,

    /// A4 / Letter / Legal
    pub page_size: Option<String>,
}

#[derive(Object, Deserialize, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct TitleSection {
    /// Title text, e.g. "Monthly Sales Report"
    pub text: Option<String>,
    pub font_size: Option<i32>,

    /// left / center / right
    pub alignment: Option<String>,
    pub include_date: Option<bool>,
}

#[derive(Object, Deserialize, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    pub dataset_name: Option<String>,
    pub title: Option<String>,
    pub columns: Option<Vec<ColumnConfig>>,
    pub enable_grouping: Option<bool>,
    pub group_by_column: Option<String>,
    pub include_totals: Option<bool>,
}

#[derive(Object, Deserialize, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    /// Column name in the dataset
    pub name: Option<String>,

    /// Display label
    pub label: Option<String>,

    /// Width in pixels
    pub width: Option<i32>,

    /// string / integer / decimal / date
    pub data_type: Option<String>,

    /// Format pattern, e.g. "#,##0.00"
    pub format: Option<String>,

    /// left / center / right
    pub alignment: Option<String>,
}

#[derive(Object, Deserialize, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub dataset_name: Option<String>,
    pub title: Option<String>,

    /// bar / line / pie / area
    pub chart_type: Option<String>,
    pub category_column: Option<String>,
    pub value_column: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub show_legend: Option<bool>,
}

/// Simple generation request against a named report
#[derive(Object, Deserialize, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub report_name: Option<String>,

    /// Output format (pdf, html, xls, xlsx, doc, docx, ppt, pptx, xml)
    pub output_format: Option<String>,
    pub parameters: Option<BTreeMap<String, JsonValue>>,
    pub output_file_name: Option<String>,
    pub locale: Option<String>,

    /// Page range for paginated formats
    pub page_range: Option<String>,
}

#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct ReportStatus {
    pub report_id: String,
    pub status: String,
    pub progress: u8,
    pub message: String,
}

#[derive(Object, Debug)]
pub struct TemplateList {
    pub templates: Vec<String>,
    pub count: usize,
}

#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct DeleteAck {
    pub message: String,
    pub report_id: String,
}

#[derive(ApiResponse)]
pub enum GenerateReportResponse {
    /// Report generated
    #[oai(status = 200)]
    Ok(Json<ReportResponse>),

    /// Invalid request
    #[oai(status = 400)]
    BadRequest(Json<ValidationErrorResponse>),

    /// Generation failed
    #[oai(status = 500)]
    InternalServerError(Json<ReportResponse>),
}
