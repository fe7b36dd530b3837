//! CSV output format for outlier reports
//!
//! `--format csv` implementation for spreadsheet analysis and machine
//! parsing. Missing durations are emitted as empty fields.

use crate::outlier::OutlierReport;

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    // If field contains comma, quote, or newline, wrap in quotes and escape quotes
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render an outlier report as CSV
pub fn to_csv(report: &OutlierReport) -> String {
    let mut output = String::new();
    output.push_str("record_id,duration_hours\n");

    for record in &report.records {
        output.push_str(&escape_field(&record.record_id));
        output.push(',');
        if let Some(hours) = record.duration_hours {
            output.push_str(&format!("{}", hours));
        }
        output.push('\n');
    }

    output
}
