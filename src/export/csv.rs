// src/export/csv.rs
// =============================================================================
// CSV rendering for the results table.
//
// Shape: one header row, then one row per checked URL:
//
//   URL,Status,Other Active Countries
//   https://example.com,Active (Direct),
//   https://example.org,"Active (Other Countries)","USA, Germany"
//
// Fields are quoted only when they contain a comma, quote, or newline;
// embedded quotes are doubled. Every line ends with \n, so a report of N
// rows exports as exactly N+1 lines.
// =============================================================================

use anyhow::{Context, Result};
use std::path::Path;

use crate::checker::UrlReport;

const CSV_HEADER: &str = "URL,Status,Other Active Countries";

/// Renders the reports as a CSV document with a header row.
pub fn to_csv(reports: &[UrlReport]) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');

    for report in reports {
        out.push_str(&escape_field(&report.url));
        out.push(',');
        out.push_str(&escape_field(report.outcome.label()));
        out.push(',');
        out.push_str(&escape_field(&report.outcome.countries_joined()));
        out.push('\n');
    }

    out
}

/// Writes the CSV document to a file.
pub fn write_csv(path: &Path, reports: &[UrlReport]) -> Result<()> {
    std::fs::write(path, to_csv(reports))
        .with_context(|| format!("Failed to write CSV to {}", path.display()))
}

// Quote a field only when it needs it; double any embedded quotes
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
