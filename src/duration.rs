//! Elapsed-time derivation between procedure stages
//!
//! The duration calculator turns two timestamp columns into a row-aligned
//! series of elapsed hours. Alignment is the load-bearing invariant: entry
//! `i` of the series always describes row `i` of the dataset, so classifier
//! output can be mapped back to record identifiers by index.

use crate::dataset::Dataset;
use crate::error::AnalysisError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const SECONDS_PER_DAY: i64 = 86_400;

/// Per-record elapsed hours, aligned 1:1 with dataset row indices
///
/// `None` marks a record whose stage pair could not be timed: either
/// endpoint was absent or unparseable. Missing entries are tracked rather
/// than dropped because the classifier treats an un-elapsed stage as an
/// outlier signal in its own right.
#[derive(Debug, Clone, PartialEq)]
pub struct ElapsedSeries {
    values: Vec<Option<f64>>,
}

impl ElapsedSeries {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Duration in hours for a row, `None` if missing
    pub fn get(&self, row: usize) -> Option<f64> {
        self.values.get(row).copied().flatten()
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Rows with a real duration, as (row_index, hours) pairs, ascending
    pub fn present(&self) -> Vec<(usize, f64)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|hours| (i, hours)))
            .collect()
    }

    /// Rows without a duration, ascending
    pub fn missing_indices(&self) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| if v.is_none() { Some(i) } else { None })
            .collect()
    }
}

/// Parse a timestamp cell, accepting RFC 3339 and the common unzoned forms
fn parse_timestamp(cell: &str) -> Option<NaiveDateTime> {
    let cell = cell.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(cell) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(cell, format) {
            return Some(dt);
        }
    }
    // Date-only cells read as midnight
    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Elapsed hours between two parsed timestamps
///
/// Only the seconds-of-day component of the delta survives: whole seconds
/// are wrapped into [0, 86400) before converting to hours, so multi-day
/// deltas lose their day component and negative deltas wrap upward. This
/// matches the behavior of the tracking exports this tool was built against.
fn elapsed_hours(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let delta_seconds = (end - start).num_seconds();
    delta_seconds.rem_euclid(SECONDS_PER_DAY) as f64 / 3600.0
}

/// Derive the elapsed-time series for a pair of timestamp columns
///
/// Pure function of its inputs: the dataset is never mutated and the output
/// has exactly one entry per dataset row, in row order.
pub fn compute_duration(
    start_column: &str,
    end_column: &str,
    dat: &Dataset,
) -> Result<ElapsedSeries, AnalysisError> {
    let starts = dat.column(start_column)?;
    let ends = dat.column(end_column)?;

    let values: Vec<Option<f64>> = starts
        .iter()
        .zip(ends.iter())
        .map(|(start, end)| {
            let start = start.and_then(parse_timestamp)?;
            let end = end.and_then(parse_timestamp)?;
            Some(elapsed_hours(start, end))
        })
        .collect();

    tracing::debug!(
        start_column,
        end_column,
        rows = values.len(),
        missing = values.iter().filter(|v| v.is_none()).count(),
        "computed elapsed-time series"
    );

    Ok(ElapsedSeries::new(values))
}

/// Batch the duration calculator over a flat list of column pairs
///
/// Column names are consumed two at a time as (start, end); each resulting
/// series is labeled `"{end}-{start}"` for distribution comparison. An
/// odd-length list cannot be paired and is rejected.
pub fn build_groups(
    column_pairs: &[String],
    dat: &Dataset,
) -> Result<(Vec<ElapsedSeries>, Vec<String>), AnalysisError> {
    if column_pairs.len() % 2 != 0 {
        return Err(AnalysisError::InvalidPairing {
            count: column_pairs.len(),
        });
    }

    let mut series_group = Vec::with_capacity(column_pairs.len() / 2);
    let mut labels = Vec::with_capacity(column_pairs.len() / 2);
    for pair in column_pairs.chunks_exact(2) {
        series_group.push(compute_duration(&pair[0], &pair[1], dat)?);
        labels.push(format!("{}-{}", pair[1], pair[0]));
    }

    Ok((series_group, labels))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(rows: &[(&str, &str, &str)]) -> Dataset {
        let mut csv = String::from("epic_order,stage_start,stage_end\n");
        for (id, start, end) in rows {
            csv.push_str(&format!("{},{},{}\n", id, start, end));
        }
        Dataset::from_csv_str(&csv)
    }

    #[test]
    fn test_compute_duration_basic() {
        let dat = dataset(&[("001", "2022-01-03 08:00:00", "2022-01-03 10:30:00")]);
        let series = compute_duration("stage_start", "stage_end", &dat).unwrap();
        assert_eq!(series.len(), 1);
        assert!((series.get(0).unwrap() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_compute_duration_preserves_alignment() {
        let dat = dataset(&[
            ("001", "2022-01-03 08:00:00", "2022-01-03 09:00:00"),
            ("002", "", "2022-01-03 09:00:00"),
            ("003", "2022-01-03 08:00:00", "2022-01-03 11:00:00"),
        ]);
        let series = compute_duration("stage_start", "stage_end", &dat).unwrap();
        assert_eq!(series.len(), dat.len());
        assert_eq!(series.get(0), Some(1.0));
        assert_eq!(series.get(1), None);
        assert_eq!(series.get(2), Some(3.0));
    }

    #[test]
    fn test_missing_is_tracked_not_dropped() {
        let dat = dataset(&[
            ("001", "2022-01-03 08:00:00", ""),
            ("002", "not a date", "2022-01-03 09:00:00"),
        ]);
        let series = compute_duration("stage_start", "stage_end", &dat).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.missing_indices(), vec![0, 1]);
        assert!(series.present().is_empty());
    }

    #[test]
    fn test_multi_day_delta_keeps_only_time_of_day() {
        // 2 days 3 hours apart: the day component is discarded
        let dat = dataset(&[("001", "2022-01-01 06:00:00", "2022-01-03 09:00:00")]);
        let series = compute_duration("stage_start", "stage_end", &dat).unwrap();
        assert!((series.get(0).unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_delta_wraps() {
        // End one hour before start reads as 23 hours
        let dat = dataset(&[("001", "2022-01-03 10:00:00", "2022-01-03 09:00:00")]);
        let series = compute_duration("stage_start", "stage_end", &dat).unwrap();
        assert!((series.get(0).unwrap() - 23.0).abs() < 1e-9);
    }

    #[test]
    fn test_rfc3339_and_t_separator() {
        let dat = dataset(&[
            ("001", "2022-01-03T08:00:00", "2022-01-03T08:45:00"),
            ("002", "2022-01-03T08:00:00+00:00", "2022-01-03T09:00:00+00:00"),
        ]);
        let series = compute_duration("stage_start", "stage_end", &dat).unwrap();
        assert!((series.get(0).unwrap() - 0.75).abs() < 1e-9);
        assert!((series.get(1).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_date_only_reads_as_midnight() {
        let dat = dataset(&[("001", "2022-01-03", "2022-01-03 06:00:00")]);
        let series = compute_duration("stage_start", "stage_end", &dat).unwrap();
        assert!((series.get(0).unwrap() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_column_fails() {
        let dat = dataset(&[("001", "2022-01-03 08:00:00", "2022-01-03 09:00:00")]);
        let err = compute_duration("nope", "stage_end", &dat).unwrap_err();
        assert!(matches!(err, AnalysisError::ColumnNotFound { .. }));
    }

    #[test]
    fn test_build_groups_labels() {
        let dat = dataset(&[("001", "2022-01-03 08:00:00", "2022-01-03 09:00:00")]);
        let pairs: Vec<String> = ["stage_start", "stage_end", "stage_start", "stage_end"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (group, labels) = build_groups(&pairs, &dat).unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(labels, vec!["stage_end-stage_start", "stage_end-stage_start"]);
    }

    #[test]
    fn test_build_groups_odd_length_fails() {
        let dat = dataset(&[("001", "2022-01-03 08:00:00", "2022-01-03 09:00:00")]);
        let pairs: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let err = build_groups(&pairs, &dat).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidPairing { count: 3 }));
    }

    #[test]
    fn test_build_groups_empty_list() {
        let dat = dataset(&[("001", "2022-01-03 08:00:00", "2022-01-03 09:00:00")]);
        let (group, labels) = build_groups(&[], &dat).unwrap();
        assert!(group.is_empty());
        assert!(labels.is_empty());
    }

    #[test]
    fn test_series_partition_helpers() {
        let series = ElapsedSeries::new(vec![Some(1.0), None, Some(2.0), None]);
        assert_eq!(series.present(), vec![(0, 1.0), (2, 2.0)]);
        assert_eq!(series.missing_indices(), vec![1, 3]);
    }
}
