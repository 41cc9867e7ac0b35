//! Design template artifact: an XML description of the requested report.

use std::fmt::Write as _;

use quick_xml::escape::escape;
use serde_json::Value as JsonValue;

use crate::schemas::report::{ChartConfig, DynamicReportRequest, TableConfig, TitleSection};

const DESIGN_NAMESPACE: &str = "http://www.eclipse.org/birt/2005/design";

/// Text form of a parameter value. Strings are emitted bare, everything
/// else in its JSON notation.
pub(crate) fn parameter_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// ` key="value"` when the value is present, nothing otherwise.
fn attr(key: &str, value: Option<&str>) -> String {
    value
        .map(|v| format!(" {}=\"{}\"", key, escape(v)))
        .unwrap_or_default()
}

fn element(xml: &mut String, indent: usize, tag: &str, value: impl ToString) {
    let _ = writeln!(
        xml,
        "{:indent$}<{tag}>{}</{tag}>",
        "",
        escape(&value.to_string()),
    );
}

fn title_is_set(title: &TitleSection) -> bool {
    title.text.is_some()
        || title.font_size.is_some()
        || title.alignment.is_some()
        || title.include_date.is_some()
}

fn has_body(request: &DynamicReportRequest) -> bool {
    request.components.as_ref().is_some_and(|c| {
        c.title.as_ref().is_some_and(title_is_set)
            || c.tables.as_ref().is_some_and(|t| !t.is_empty())
            || c.charts.as_ref().is_some_and(|t| !t.is_empty())
    })
}

pub fn generate_design(request: &DynamicReportRequest) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(xml, "<report xmlns=\"{}\">", DESIGN_NAMESPACE);

    if let Some(name) = &request.report_name {
        let _ = writeln!(
            xml,
            "  <property name=\"reportName\">{}</property>",
            escape(name)
        );
    }

    if let Some(library) = &request.library_path {
        xml.push_str("  <library-include>\n");
        element(&mut xml, 4, "libraryPath", library);
        xml.push_str("  </library-include>\n");
    }

    if let Some(source) = &request.data_source_name {
        xml.push_str("  <data-sources>\n");
        let _ = writeln!(
            xml,
            "    <data-source{} library=\"true\"/>",
            attr("name", Some(source.as_str()))
        );
        xml.push_str("  </data-sources>\n");
    }

    if let Some(datasets) = request.dataset_names.as_ref().filter(|d| !d.is_empty()) {
        xml.push_str("  <data-sets>\n");
        for dataset in datasets {
            let _ = writeln!(
                xml,
                "    <data-set{} library=\"true\"/>",
                attr("name", Some(dataset.as_str()))
            );
        }
        xml.push_str("  </data-sets>\n");
    }

    if let Some(parameters) = request.parameters.as_ref().filter(|p| !p.is_empty()) {
        xml.push_str("  <parameters>\n");
        for (name, value) in parameters {
            let _ = writeln!(
                xml,
                "    <parameter{}{}/>",
                attr("name", Some(name.as_str())),
                attr("value", Some(parameter_text(value).as_str()))
            );
        }
        xml.push_str("  </parameters>\n");
    }

    if let Some(components) = &request.components {
        if components.page_orientation.is_some() || components.page_size.is_some() {
            let _ = writeln!(
                xml,
                "  <page-setup{}{}/>",
                attr("orientation", components.page_orientation.as_deref()),
                attr("size", components.page_size.as_deref())
            );
        }

        if has_body(request) {
            xml.push_str("  <body>\n");
            if let Some(title) = components.title.as_ref().filter(|t| title_is_set(t)) {
                write_title(&mut xml, title);
            }
            for table in components.tables.iter().flatten() {
                write_table(&mut xml, table);
            }
            for chart in components.charts.iter().flatten() {
                write_chart(&mut xml, chart);
            }
            xml.push_str("  </body>\n");
        }

        if let Some(footer) = &components.footer {
            xml.push_str("  <footer>\n");
            element(&mut xml, 4, "text", footer);
            xml.push_str("  </footer>\n");
        }
    }

    xml.push_str("</report>\n");
    xml
}

fn write_title(xml: &mut String, title: &TitleSection) {
    xml.push_str("    <label name=\"title\">\n");
    if let Some(text) = &title.text {
        element(xml, 6, "text", text);
    }
    if let Some(size) = title.font_size {
        element(xml, 6, "fontSize", size);
    }
    if let Some(alignment) = &title.alignment {
        element(xml, 6, "alignment", alignment);
    }
    if let Some(include_date) = title.include_date {
        element(xml, 6, "includeDate", include_date);
    }
    xml.push_str("    </label>\n");
}

fn write_table(xml: &mut String, table: &TableConfig) {
    let _ = writeln!(xml, "    <table{}>", attr("name", table.title.as_deref()));
    if let Some(dataset) = &table.dataset_name {
        element(xml, 6, "dataSet", dataset);
    }
    if let Some(grouping) = table.enable_grouping {
        element(xml, 6, "enableGrouping", grouping);
    }
    if let Some(group_by) = &table.group_by_column {
        element(xml, 6, "groupByColumn", group_by);
    }
    if let Some(totals) = table.include_totals {
        element(xml, 6, "includeTotals", totals);
    }
    if let Some(columns) = &table.columns {
        xml.push_str("      <columns>\n");
        for column in columns {
            let width = column.width.map(|w| w.to_string());
            let _ = writeln!(
                xml,
                "        <column{}{}{}{}{}{}/>",
                attr("name", column.name.as_deref()),
                attr("label", column.label.as_deref()),
                attr("width", width.as_deref()),
                attr("dataType", column.data_type.as_deref()),
                attr("format", column.format.as_deref()),
                attr("alignment", column.alignment.as_deref()),
            );
        }
        xml.push_str("      </columns>\n");
    }
    xml.push_str("    </table>\n");
}

fn write_chart(xml: &mut String, chart: &ChartConfig) {
    let _ = writeln!(xml, "    <chart{}>", attr("name", chart.title.as_deref()));
    if let Some(kind) = &chart.chart_type {
        element(xml, 6, "type", kind);
    }
    if let Some(dataset) = &chart.dataset_name {
        element(xml, 6, "dataSet", dataset);
    }
    if let Some(category) = &chart.category_column {
        element(xml, 6, "categoryColumn", category);
    }
    if let Some(value) = &chart.value_column {
        element(xml, 6, "valueColumn", value);
    }
    if let Some(width) = chart.width {
        element(xml, 6, "width", width);
    }
    if let Some(height) = chart.height {
        element(xml, 6, "height", height);
    }
    if let Some(legend) = chart.show_legend {
        element(xml, 6, "showLegend", legend);
    }
    xml.push_str("    </chart>\n");
}
