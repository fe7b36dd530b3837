//! Text table output for outlier reports and distribution summaries

use crate::duration::ElapsedSeries;
use crate::outlier::{DetectionSummary, OutlierReport};
use trueno::Vector;

/// Render the classification parameters and bounds as a header block
fn render_summary(summary: &DetectionSummary) -> String {
    match summary {
        DetectionSummary::Iqr {
            multiplier,
            q1,
            q3,
            low_bound,
            high_bound,
        } => format!(
            "IQR method (multiplier {multiplier})\n\
             Q1: {q1:.3} h  Q3: {q3:.3} h  bounds: [{low_bound:.3}, {high_bound:.3}] h"
        ),
        DetectionSummary::Zscore {
            threshold,
            mean,
            stddev,
        } => format!(
            "Z-score method (threshold {threshold})\n\
             Mean: {mean:.3} h  Std Dev: {stddev:.3} h"
        ),
    }
}

/// Render an outlier report as an aligned text table
///
/// Missing durations print as `NA` — a stage that never completed, not a
/// zero-hour stage.
pub fn render_report(report: &OutlierReport) -> String {
    let mut out = String::new();
    out.push_str(&render_summary(&report.summary));
    out.push('\n');
    out.push('\n');

    if report.records.is_empty() {
        out.push_str("No outliers detected.\n");
        return out;
    }

    out.push_str(&format!("{:<16} {:>14}\n", "record_id", "duration_hours"));
    out.push_str(&format!("{:-<16} {:-<14}\n", "", ""));
    for record in &report.records {
        let duration = match record.duration_hours {
            Some(hours) => format!("{:.3}", hours),
            None => "NA".to_string(),
        };
        out.push_str(&format!("{:<16} {:>14}\n", record.record_id, duration));
    }
    out.push_str(&format!(
        "\n{} outliers ({} low, {} high, {} missing)\n",
        report.records.len(),
        report.low_count,
        report.high_count,
        report.missing_count
    ));
    out
}

/// Render a distribution summary for one labeled elapsed-time series
///
/// Used by the `--groups` surface to compare stage-to-stage distributions
/// without a plotting layer.
pub fn render_distribution_summary(label: &str, series: &ElapsedSeries) -> String {
    let present: Vec<f64> = series.present().into_iter().map(|(_, v)| v).collect();
    let missing = series.len() - present.len();

    if present.is_empty() {
        return format!("{label}: no parseable durations ({missing} missing)\n");
    }

    let values_f32: Vec<f32> = present.iter().map(|&v| v as f32).collect();
    let v = Vector::from_slice(&values_f32);
    let mean = v.mean().unwrap_or(0.0);
    let min = v.min().unwrap_or(0.0);
    let max = v.max().unwrap_or(0.0);

    let n = present.len() as f64;
    let mean_f64 = f64::from(mean);
    let stddev = (present.iter().map(|&x| (x - mean_f64).powi(2)).sum::<f64>() / n).sqrt();

    let mut sorted = present.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let q1 = crate::outlier::percentile(&sorted, 25.0);
    let median = crate::outlier::percentile(&sorted, 50.0);
    let q3 = crate::outlier::percentile(&sorted, 75.0);

    let mut out = String::new();
    out.push_str(&format!("{} ({} records, {} missing):\n", label, series.len(), missing));
    out.push_str(&format!("  Mean:         {:.3} h\n", mean));
    out.push_str(&format!("  Std Dev:      {:.3} h\n", stddev));
    out.push_str(&format!("  Min:          {:.3} h\n", min));
    out.push_str(&format!("  Q1:           {:.3} h\n", q1));
    out.push_str(&format!("  Median (P50): {:.3} h\n", median));
    out.push_str(&format!("  Q3:           {:.3} h\n", q3));
    out.push_str(&format!("  Max:          {:.3} h\n", max));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outlier::detect_outliers_iqr;

    fn report() -> OutlierReport {
        let series = ElapsedSeries::new(vec![Some(2.0), Some(2.1), Some(1.9), None, Some(50.0)]);
        let ids: Vec<String> = (1..=5).map(|i| format!("{:03}", i)).collect();
        detect_outliers_iqr(&series, &ids, 0.5).unwrap()
    }

    #[test]
    fn test_render_report_contains_records() {
        let text = render_report(&report());
        assert!(text.contains("record_id"));
        assert!(text.contains("005"));
        assert!(text.contains("50.000"));
    }

    #[test]
    fn test_render_report_missing_as_na() {
        let text = render_report(&report());
        assert!(text.contains("004"));
        assert!(text.contains("NA"));
    }

    #[test]
    fn test_render_report_counts_line() {
        let text = render_report(&report());
        assert!(text.contains("2 outliers (0 low, 1 high, 1 missing)"));
    }

    #[test]
    fn test_render_report_empty() {
        let series = ElapsedSeries::new(vec![Some(5.0); 4]);
        let ids: Vec<String> = (1..=4).map(|i| format!("{:03}", i)).collect();
        let report = detect_outliers_iqr(&series, &ids, 0.5).unwrap();
        let text = render_report(&report);
        assert!(text.contains("No outliers detected."));
    }

    #[test]
    fn test_distribution_summary_fields() {
        let series = ElapsedSeries::new(vec![Some(1.0), Some(2.0), Some(3.0), None]);
        let text = render_distribution_summary("exp1_start_time-specimen_collected", &series);
        assert!(text.contains("exp1_start_time-specimen_collected (4 records, 1 missing):"));
        assert!(text.contains("Mean:         2.000 h"));
        assert!(text.contains("Median (P50): 2.000 h"));
    }

    #[test]
    fn test_distribution_summary_all_missing() {
        let series = ElapsedSeries::new(vec![None, None]);
        let text = render_distribution_summary("b-a", &series);
        assert!(text.contains("no parseable durations (2 missing)"));
    }
}
