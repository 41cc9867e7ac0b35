//! Rendered output artifact: a plain-text stand-in for the finished report.

use std::fmt::Write as _;

use crate::core::template::parameter_text;
use crate::schemas::report::{ChartConfig, DynamicReportRequest, TableConfig};

const WIDTH: usize = 80;

fn rule(out: &mut String, c: char) {
    out.extend(std::iter::repeat_n(c, WIDTH));
    out.push('\n');
}

pub fn generate_summary(request: &DynamicReportRequest) -> String {
    let mut out = String::new();

    rule(&mut out, '=');
    let name = request.report_name.as_deref().unwrap_or_default();
    let _ = writeln!(out, "REPORT - {}", name.to_uppercase());
    rule(&mut out, '=');
    out.push('\n');

    if let Some(format) = &request.output_format {
        let _ = writeln!(out, "Format: {}", format.to_uppercase());
    }
    if let Some(library) = &request.library_path {
        let _ = writeln!(out, "Library: {}", library);
    }
    if let Some(source) = &request.data_source_name {
        let _ = writeln!(out, "Data Source: {}", source);
    }
    out.push('\n');

    if let Some(datasets) = request.dataset_names.as_ref().filter(|d| !d.is_empty()) {
        out.push_str("Datasets Used:\n");
        for dataset in datasets {
            let _ = writeln!(out, "  - {}", dataset);
        }
        out.push('\n');
    }

    if let Some(parameters) = request.parameters.as_ref().filter(|p| !p.is_empty()) {
        out.push_str("Parameters:\n");
        for (name, value) in parameters {
            let _ = writeln!(out, "  {} = {}", name, parameter_text(value));
        }
        out.push('\n');
    }

    if let Some(components) = &request.components {
        if let Some(text) = components.title.as_ref().and_then(|t| t.text.as_ref()) {
            out.push('\n');
            rule(&mut out, '-');
            let _ = writeln!(out, "{}", text);
            rule(&mut out, '-');
            out.push('\n');
        }

        for table in components.tables.iter().flatten() {
            write_table(&mut out, table);
        }
        for chart in components.charts.iter().flatten() {
            write_chart(&mut out, chart);
        }

        if let Some(footer) = &components.footer {
            let _ = writeln!(out, "Footer: {}", footer);
        }
    }

    out.push('\n');
    rule(&mut out, '=');
    out.push_str("Report generated successfully (mock renderer)\n");
    out.push_str("Note: no rendering engine attached, layout is described as text only\n");
    rule(&mut out, '=');
    out
}

fn write_table(out: &mut String, table: &TableConfig) {
    match &table.title {
        Some(title) => {
            let _ = writeln!(out, "TABLE: {}", title);
        }
        None => out.push_str("TABLE\n"),
    }
    if let Some(dataset) = &table.dataset_name {
        let _ = writeln!(out, "Dataset: {}", dataset);
    }
    let labels: Vec<&str> = table
        .columns
        .iter()
        .flatten()
        .filter_map(|c| c.label.as_deref().or(c.name.as_deref()))
        .collect();
    if !labels.is_empty() {
        let _ = writeln!(out, "Columns: {}", labels.join(" | "));
    }
    if let Some(group_by) = table.group_by_column.as_ref().filter(|_| table.enable_grouping == Some(true)) {
        let _ = writeln!(out, "Grouped by: {}", group_by);
    }
    out.push_str("[Mock Data Would Appear Here]\n");
    if table.include_totals == Some(true) {
        out.push_str("[Totals Row Would Appear Here]\n");
    }
    out.push('\n');
}

fn write_chart(out: &mut String, chart: &ChartConfig) {
    match &chart.title {
        Some(title) => {
            let _ = writeln!(out, "CHART: {}", title);
        }
        None => out.push_str("CHART\n"),
    }
    if let Some(kind) = &chart.chart_type {
        let _ = writeln!(out, "Type: {}", kind);
    }
    if let Some(dataset) = &chart.dataset_name {
        let _ = writeln!(out, "Dataset: {}", dataset);
    }
    let axes: Vec<String> = [
        chart.category_column.as_ref().map(|c| format!("Category: {}", c)),
        chart.value_column.as_ref().map(|v| format!("Value: {}", v)),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !axes.is_empty() {
        let _ = writeln!(out, "{}", axes.join(", "));
    }
    out.push_str("[Mock Chart Would Appear Here]\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::report::{ColumnConfig, ReportComponents, TitleSection};

    fn request() -> DynamicReportRequest {
        DynamicReportRequest {
            library_path: Some("lib/common.rptlibrary".to_string()),
            report_name: Some("sales".to_string()),
            output_format: Some("pdf".to_string()),
            dataset_names: Some(vec!["DS1".to_string(), "DS2".to_string()]),
            ..Default::default()
        }
    }

    #[test]
    fn banner_names_report_and_format() {
        let text = generate_summary(&request());
        assert!(text.starts_with(&"=".repeat(80)));
        assert!(text.contains("REPORT - SALES\n"));
        assert!(text.contains("Format: PDF\n"));
        assert!(text.contains("Datasets Used:\n  - DS1\n  - DS2\n"));
        assert!(text.contains("(mock renderer)"));
        assert!(!text.contains("Data Source:"));
        assert!(!text.contains("Parameters:"));
    }

    #[test]
    fn tables_and_charts_get_sections() {
        let request = DynamicReportRequest {
            components: Some(ReportComponents {
                title: Some(TitleSection {
                    text: Some("Monthly Sales".to_string()),
                    ..Default::default()
                }),
                tables: Some(vec![TableConfig {
                    title: Some("T1".to_string()),
                    dataset_name: Some("DS1".to_string()),
                    columns: Some(vec![
                        ColumnConfig {
                            name: Some("x".to_string()),
                            label: Some("X".to_string()),
                            ..Default::default()
                        },
                        ColumnConfig {
                            name: Some("y".to_string()),
                            ..Default::default()
                        },
                    ]),
                    ..Default::default()
                }]),
                charts: Some(vec![ChartConfig {
                    title: Some("Trend".to_string()),
                    chart_type: Some("line".to_string()),
                    category_column: Some("month".to_string()),
                    value_column: Some("total".to_string()),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
            ..request()
        };
        let text = generate_summary(&request);

        assert!(text.contains("Monthly Sales\n"));
        assert!(text.contains("TABLE: T1\nDataset: DS1\nColumns: X | y\n[Mock Data Would Appear Here]\n"));
        assert!(text.contains("CHART: Trend\nType: line\nCategory: month, Value: total\n[Mock Chart Would Appear Here]\n"));
    }

    #[test]
    fn absent_components_leave_no_trace() {
        let text = generate_summary(&request());
        for marker in ["TABLE", "CHART", "Footer:", "Mock Data", "Mock Chart", "-----", "null", "None"] {
            assert!(!text.contains(marker), "unexpected {} in {}", marker, text);
        }
    }

    #[test]
    fn grouping_and_totals_lines() {
        let request = DynamicReportRequest {
            components: Some(ReportComponents {
                tables: Some(vec![TableConfig {
                    title: Some("By Region".to_string()),
                    enable_grouping: Some(true),
                    group_by_column: Some("region".to_string()),
                    include_totals: Some(true),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
            ..request()
        };
        let text = generate_summary(&request);
        assert!(text.contains(
            "TABLE: By Region\nGrouped by: region\n[Mock Data Would Appear Here]\n[Totals Row Would Appear Here]\n"
        ));
    }

    #[test]
    fn group_column_without_grouping_is_not_listed() {
        let request = DynamicReportRequest {
            components: Some(ReportComponents {
                tables: Some(vec![TableConfig {
                    group_by_column: Some("region".to_string()),
                    include_totals: Some(false),
                    ..Default::default()
                }]),
                ..Default::default()
            }),
            ..request()
        };
        let text = generate_summary(&request);
        assert!(!text.contains("Grouped by:"));
        assert!(!text.contains("Totals Row"));
    }

    #[test]
    fn footer_line_when_present() {
        let request = DynamicReportRequest {
            components: Some(ReportComponents {
                footer: Some("Confidential".to_string()),
                ..Default::default()
            }),
            ..request()
        };
        assert!(generate_summary(&request).contains("\nFooter: Confidential\n"));
    }
}
