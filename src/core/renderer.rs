use crate::core::error::Result;
use crate::core::{output, template};
use crate::schemas::report::DynamicReportRequest;

/// The two files produced for every report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Design-time template describing the report layout
    pub design: String,
    /// Run-time output of the report
    pub output: String,
}

/// Turns a validated request into its artifacts. A real report engine plugs
/// in here without changing storage or dispatch.
pub trait ReportRenderer: Send + Sync {
    fn name(&self) -> &'static str;

    fn render(&self, request: &DynamicReportRequest) -> Result<Artifacts>;
}

/// Placeholder renderer. Describes the report as text instead of laying out
/// real data.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRenderer;

impl ReportRenderer for MockRenderer {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn render(&self, request: &DynamicReportRequest) -> Result<Artifacts> {
        let design = template::generate_design(request);
        let output = output::generate_summary(request);

        tracing::debug!(
            "Mock render: {} datasets, {} tables, {} charts",
            request.dataset_names.as_ref().map_or(0, Vec::len),
            request
                .components
                .as_ref()
                .and_then(|c| c.tables.as_ref())
                .map_or(0, Vec::len),
            request
                .components
                .as_ref()
                .and_then(|c| c.charts.as_ref())
                .map_or(0, Vec::len),
        );

        Ok(Artifacts { design, output })
    }
}
