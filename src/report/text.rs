use crossterm::style::Stylize;

use super::{AggregateReport, format_count};

/// Label column width, so the values line up.
const LABEL_WIDTH: usize = 32;
/// Right-aligned value column width.
const VALUE_WIDTH: usize = 10;

fn report_line(label: &str, value: u64, unit: &str) -> String {
    format!(
        "{:<label_width$}{:>value_width$} {}",
        label,
        format_count(value),
        unit,
        label_width = LABEL_WIDTH,
        value_width = VALUE_WIDTH,
    )
}

fn emphasize(line: String, use_color: bool) -> String {
    if use_color {
        line.magenta().bold().to_string()
    } else {
        line
    }
}

/// Renders the human-readable report. Failure lines are emphasized only when
/// their counter is nonzero; the numbers themselves never change.
#[must_use]
pub fn render_text(report: &AggregateReport, interrupted: bool, use_color: bool) -> String {
    let totals = &report.totals;
    let mut lines = Vec::with_capacity(14);

    lines.push(String::new());
    if interrupted {
        lines.push(emphasize(
            "Interrupted: totals are a best-effort snapshot.".to_owned(),
            use_color,
        ));
        lines.push(String::new());
    }
    lines.push(report_line(
        "Successful requests rate:",
        report.success_rate(),
        "hits/sec",
    ));
    lines.push(String::new());
    lines.push(report_line("Requests:", totals.requests_attempted, "hits"));
    lines.push(report_line("Successful requests:", totals.success, "hits"));
    lines.push(String::new());

    let network_line = report_line("Network failed:", totals.network_failed, "hits");
    lines.push(emphasize(network_line, use_color && totals.network_failed > 0));
    let status_line = report_line("Bad requests failed (status):", totals.bad_status, "hits");
    lines.push(emphasize(status_line, use_color && totals.bad_status > 0));
    lines.push(String::new());

    lines.push(report_line("Read throughput:", report.read_rate(), "bytes/sec"));
    lines.push(report_line("Write throughput:", report.write_rate(), "bytes/sec"));
    lines.push(report_line("Test time:", report.elapsed_secs, "sec"));

    lines.join("\n")
}

/// One-line announcement printed before workers start.
#[must_use]
pub fn summary_line(operation: &str, requests: u64, url: &str, clients: usize) -> String {
    format!(
        "{} {} from {} with {} clients",
        format_count(requests),
        operation,
        url,
        format_count(u64::try_from(clients).unwrap_or(u64::MAX))
    )
}
