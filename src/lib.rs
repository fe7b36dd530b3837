//! Demora - Procedure-tracking duration analysis with statistical outlier detection
//!
//! This library derives elapsed-time series between timestamped process
//! stages and classifies records as duration outliers using IQR and z-score
//! rules, with explicit handling of records whose stage never completed.

pub mod cli;
pub mod csv_output;
pub mod dataset;
pub mod duration;
pub mod error;
pub mod json_output;
pub mod outlier;
pub mod table_output;

pub use dataset::Dataset;
pub use duration::{build_groups, compute_duration, ElapsedSeries};
pub use error::AnalysisError;
pub use outlier::{detect_outliers_iqr, detect_outliers_zscore, OutlierRecord, OutlierReport};
