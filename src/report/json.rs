use serde::Serialize;

use super::AggregateReport;

#[derive(Serialize)]
struct ReportJson<'report> {
    interrupted: bool,
    success_rate: u64,
    read_rate: u64,
    write_rate: u64,
    #[serde(flatten)]
    report: &'report AggregateReport,
}

/// Renders the report as a single JSON object.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn render_json(
    report: &AggregateReport,
    interrupted: bool,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ReportJson {
        interrupted,
        success_rate: report.success_rate(),
        read_rate: report.read_rate(),
        write_rate: report.write_rate(),
        report,
    })
}
