//! Duration-outlier classification
//!
//! Two detection methods over an elapsed-time series: an interquartile-range
//! rule and a z-score rule, each driven by a caller-supplied sensitivity
//! parameter. Both share one pipeline: partition present from missing rows,
//! compute bounds over present values only, then classify.
//!
//! Missing rows carry meaning here: a stage that never completed implies an
//! unboundedly long duration, so every missing row lands in the high outlier
//! set. Missing rows never appear in the low set and are excluded from the
//! bound computation itself.

use crate::duration::ElapsedSeries;
use crate::error::AnalysisError;
use serde::Serialize;
use trueno::Vector;

/// One classified outlier, mapped back to its source record
///
/// `duration_hours` is `None` for rows flagged because their stage never
/// completed — consumers render these as a missing value, not as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierRecord {
    pub record_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<f64>,
}

/// Statistics behind a classification, for summary reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum DetectionSummary {
    Iqr {
        multiplier: f64,
        q1: f64,
        q3: f64,
        low_bound: f64,
        high_bound: f64,
    },
    Zscore {
        threshold: f64,
        mean: f64,
        stddev: f64,
    },
}

/// Ordered classification result
///
/// Records are ordered low outliers first (ascending row index), then high
/// outliers (ascending), then missing rows (ascending). The same inputs
/// always produce the same report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierReport {
    pub records: Vec<OutlierRecord>,
    pub low_count: usize,
    pub high_count: usize,
    pub missing_count: usize,
    pub summary: DetectionSummary,
}

/// Percentile over sorted data with linear interpolation
pub(crate) fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (p / 100.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

/// Partition the series, failing if nothing is present
fn partition(series: &ElapsedSeries) -> Result<(Vec<(usize, f64)>, Vec<usize>), AnalysisError> {
    let present = series.present();
    if present.is_empty() {
        return Err(AnalysisError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    Ok((present, series.missing_indices()))
}

/// Assemble the final report: low rows, then high rows, then missing rows
fn assemble_report(
    series: &ElapsedSeries,
    record_ids: &[String],
    low_ids: Vec<usize>,
    high_ids: Vec<usize>,
    missing_ids: Vec<usize>,
    summary: DetectionSummary,
) -> OutlierReport {
    let low_count = low_ids.len();
    let high_count = high_ids.len();
    let missing_count = missing_ids.len();

    let records = low_ids
        .into_iter()
        .chain(high_ids)
        .chain(missing_ids)
        .map(|row| OutlierRecord {
            record_id: record_ids.get(row).cloned().unwrap_or_default(),
            duration_hours: series.get(row),
        })
        .collect();

    OutlierReport {
        records,
        low_count,
        high_count,
        missing_count,
        summary,
    }
}

/// Classify outliers with the interquartile-range rule
///
/// Bounds are `Q1 - multiplier * IQR` and `Q3 + multiplier * IQR` over the
/// present values; rows strictly outside the bounds are flagged. When the
/// IQR collapses to zero, any deviation from the quartiles is flagged.
pub fn detect_outliers_iqr(
    series: &ElapsedSeries,
    record_ids: &[String],
    multiplier: f64,
) -> Result<OutlierReport, AnalysisError> {
    let (present, missing_ids) = partition(series)?;

    let mut sorted: Vec<f64> = present.iter().map(|&(_, v)| v).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = percentile(&sorted, 25.0);
    let q3 = percentile(&sorted, 75.0);
    let iqr = q3 - q1;
    let low_bound = q1 - multiplier * iqr;
    let high_bound = q3 + multiplier * iqr;

    let low_ids: Vec<usize> = present
        .iter()
        .filter(|&&(_, v)| v < low_bound)
        .map(|&(i, _)| i)
        .collect();
    let high_ids: Vec<usize> = present
        .iter()
        .filter(|&&(_, v)| v > high_bound)
        .map(|&(i, _)| i)
        .collect();

    tracing::debug!(
        q1,
        q3,
        low_bound,
        high_bound,
        low = low_ids.len(),
        high = high_ids.len(),
        missing = missing_ids.len(),
        "IQR classification"
    );

    Ok(assemble_report(
        series,
        record_ids,
        low_ids,
        high_ids,
        missing_ids,
        DetectionSummary::Iqr {
            multiplier,
            q1,
            q3,
            low_bound,
            high_bound,
        },
    ))
}

/// Classify outliers with the z-score rule
///
/// Mean comes from Trueno; the deviation is the population standard
/// deviation over the present values. If all present values are identical
/// the distribution is degenerate: every z-score is zero and only missing
/// rows are flagged — there is no division by zero and no error.
pub fn detect_outliers_zscore(
    series: &ElapsedSeries,
    record_ids: &[String],
    threshold: f64,
) -> Result<OutlierReport, AnalysisError> {
    let (present, missing_ids) = partition(series)?;

    let values_f32: Vec<f32> = present.iter().map(|&(_, v)| v as f32).collect();
    let v = Vector::from_slice(&values_f32);
    let mean = f64::from(v.mean().unwrap_or(0.0));

    // All present values identical: sigma is exactly zero, and rounding in
    // the mean must not manufacture a tiny nonzero deviation
    let degenerate = v.max().unwrap_or(0.0) == v.min().unwrap_or(0.0);
    let stddev = if degenerate {
        0.0
    } else {
        let n = present.len() as f64;
        (present.iter().map(|&(_, v)| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
    };

    let z = |v: f64| -> f64 {
        if stddev > 0.0 {
            (v - mean) / stddev
        } else {
            0.0
        }
    };

    let low_ids: Vec<usize> = present
        .iter()
        .filter(|&&(_, v)| z(v) < -threshold)
        .map(|&(i, _)| i)
        .collect();
    let high_ids: Vec<usize> = present
        .iter()
        .filter(|&&(_, v)| z(v) > threshold)
        .map(|&(i, _)| i)
        .collect();

    tracing::debug!(
        mean,
        stddev,
        low = low_ids.len(),
        high = high_ids.len(),
        missing = missing_ids.len(),
        "z-score classification"
    );

    Ok(assemble_report(
        series,
        record_ids,
        low_ids,
        high_ids,
        missing_ids,
        DetectionSummary::Zscore {
            threshold,
            mean,
            stddev,
        },
    ))
}
