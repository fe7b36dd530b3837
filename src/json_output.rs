//! JSON output format for outlier reports
//!
//! `--format json` implementation: a serde mirror of the classification
//! result carrying enough context (columns, method parameters) for machine
//! consumers to reproduce the run.

use crate::outlier::{DetectionSummary, OutlierReport};
use serde::Serialize;

/// A single classified outlier
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutlierRecord {
    /// Record identifier (source field: epic order)
    pub record_id: String,
    /// Elapsed hours; absent when the stage never completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
    /// True when this row was flagged for a missing endpoint
    pub missing: bool,
}

/// Top-level JSON report
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutlierReport {
    /// Start timestamp column name
    pub start_column: String,
    /// End timestamp column name
    pub end_column: String,
    /// Method parameters and computed bounds
    pub detection: DetectionSummary,
    /// Classified outliers: low rows first, then high, then missing
    pub outliers: Vec<JsonOutlierRecord>,
    pub low_count: usize,
    pub high_count: usize,
    pub missing_count: usize,
}

impl JsonOutlierReport {
    /// Build the JSON mirror of a classification result
    pub fn from_report(report: &OutlierReport, start_column: &str, end_column: &str) -> Self {
        Self {
            start_column: start_column.to_string(),
            end_column: end_column.to_string(),
            detection: report.summary.clone(),
            outliers: report
                .records
                .iter()
                .map(|r| JsonOutlierRecord {
                    record_id: r.record_id.clone(),
                    duration_hours: r.duration_hours,
                    missing: r.duration_hours.is_none(),
                })
                .collect(),
            low_count: report.low_count,
            high_count: report.high_count,
            missing_count: report.missing_count,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
