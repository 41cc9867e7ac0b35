/// Report designs bundled with the service.
pub const TEMPLATE_CATALOG: &[&str] = &[
    "sales-report.rptdesign",
    "inventory-report.rptdesign",
    "customer-report.rptdesign",
];
