use std::collections::BTreeMap;
use std::fmt;

use crate::schemas::report::{
    ChartConfig, ColumnConfig, DynamicReportRequest, ReportComponents, ReportRequest,
    TableConfig, TitleSection,
};

/// Formats accepted by the dynamic (library based) endpoint.
pub const DYNAMIC_OUTPUT_FORMATS: &[&str] = &["pdf", "html", "xls", "xlsx", "doc", "docx"];

/// Formats accepted by the simple endpoint.
pub const OUTPUT_FORMATS: &[&str] = &[
    "pdf", "html", "xls", "xlsx", "doc", "docx", "ppt", "pptx", "xml",
];

pub const ALIGNMENTS: &[&str] = &["left", "center", "right"];
pub const DATA_TYPES: &[&str] = &["string", "integer", "decimal", "date"];
pub const CHART_TYPES: &[&str] = &["bar", "line", "pie", "area"];
pub const PAGE_ORIENTATIONS: &[&str] = &["portrait", "landscape"];
pub const PAGE_SIZES: &[&str] = &["A4", "Letter", "Legal"];

/// Every violated field of a request, keyed by its JSON path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Records a violation. The first reason reported for a field wins.
    pub fn add_error(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.fields.entry(field.into()).or_insert_with(|| reason.into());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn reason(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.fields
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .fields
            .iter()
            .map(|(field, reason)| format!("{}: {}", field, reason))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

impl std::error::Error for ValidationErrors {}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn require_text(errors: &mut ValidationErrors, field: &str, value: &Option<String>, reason: &str) {
    if is_blank(value) {
        errors.add_error(field, reason);
    }
}

fn check_choice(
    errors: &mut ValidationErrors,
    field: &str,
    value: &Option<String>,
    allowed: &[&str],
    what: &str,
) {
    if let Some(value) = value {
        if !allowed.contains(&value.as_str()) {
            errors.add_error(
                field,
                format!("Invalid {}. Supported: {}", what, allowed.join(", ")),
            );
        }
    }
}

fn check_size(errors: &mut ValidationErrors, field: &str, value: Option<i32>) {
    if value.is_some_and(|v| v < 0) {
        errors.add_error(field, "Must not be negative");
    }
}

fn check_output_format(errors: &mut ValidationErrors, value: &Option<String>, allowed: &[&str]) {
    if is_blank(value) {
        errors.add_error("outputFormat", "Output format is required");
    } else {
        check_choice(errors, "outputFormat", value, allowed, "output format");
    }
}

impl Validate for DynamicReportRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        require_text(&mut errors, "libraryPath", &self.library_path, "Library path is required");
        require_text(&mut errors, "reportName", &self.report_name, "Report name is required");
        check_output_format(&mut errors, &self.output_format, DYNAMIC_OUTPUT_FORMATS);

        match self.dataset_names.as_deref() {
            None | Some([]) => {
                errors.add_error("datasetNames", "At least one dataset is required");
            }
            Some(names) => {
                for (idx, name) in names.iter().enumerate() {
                    if name.trim().is_empty() {
                        errors.add_error(
                            format!("datasetNames[{}]", idx),
                            "Dataset name must not be blank",
                        );
                    }
                }
            }
        }

        if let Some(components) = &self.components {
            validate_components(&mut errors, components);
        }

        errors.into_result()
    }
}

impl Validate for ReportRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require_text(&mut errors, "reportName", &self.report_name, "Report name is required");
        check_output_format(&mut errors, &self.output_format, OUTPUT_FORMATS);
        errors.into_result()
    }
}

fn validate_components(errors: &mut ValidationErrors, components: &ReportComponents) {
    check_choice(
        errors,
        "components.pageOrientation",
        &components.page_orientation,
        PAGE_ORIENTATIONS,
        "page orientation",
    );
    check_choice(
        errors,
        "components.pageSize",
        &components.page_size,
        PAGE_SIZES,
        "page size",
    );

    if let Some(title) = &components.title {
        validate_title(errors, title);
    }
    for (idx, table) in components.tables.iter().flatten().enumerate() {
        validate_table(errors, &format!("components.tables[{}]", idx), table);
    }
    for (idx, chart) in components.charts.iter().flatten().enumerate() {
        validate_chart(errors, &format!("components.charts[{}]", idx), chart);
    }
}

fn validate_title(errors: &mut ValidationErrors, title: &TitleSection) {
    check_choice(
        errors,
        "components.title.alignment",
        &title.alignment,
        ALIGNMENTS,
        "alignment",
    );
    check_size(errors, "components.title.fontSize", title.font_size);
}

fn validate_table(errors: &mut ValidationErrors, path: &str, table: &TableConfig) {
    for (idx, column) in table.columns.iter().flatten().enumerate() {
        validate_column(errors, &format!("{}.columns[{}]", path, idx), column);
    }
}

fn validate_column(errors: &mut ValidationErrors, path: &str, column: &ColumnConfig) {
    check_size(errors, &format!("{}.width", path), column.width);
    check_choice(
        errors,
        &format!("{}.dataType", path),
        &column.data_type,
        DATA_TYPES,
        "data type",
    );
    check_choice(
        errors,
        &format!("{}.alignment", path),
        &column.alignment,
        ALIGNMENTS,
        "alignment",
    );
}

fn validate_chart(errors: &mut ValidationErrors, path: &str, chart: &ChartConfig) {
    check_choice(
        errors,
        &format!("{}.chartType", path),
        &chart.chart_type,
        CHART_TYPES,
        "chart type",
    );
    check_size(errors, &format!("{}.width", path), chart.width);
    check_size(errors, &format!("{}.height", path), chart.height);
}
