//! Error taxonomy for the analysis pipeline

use thiserror::Error;

/// Errors surfaced by the duration and outlier pipeline
///
/// Every failure here is deterministic: the same inputs fail the same way,
/// so callers must not retry. A degenerate distribution (all present values
/// identical, σ = 0) is handled inside the z-score classifier and is
/// deliberately absent from this enum.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Column not found in dataset: {column}")]
    ColumnNotFound { column: String },

    #[error("Timestamp columns must come in pairs: got {count} column names")]
    InvalidPairing { count: usize },

    #[error("Insufficient data: need at least {required} present durations, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_not_found_message() {
        let err = AnalysisError::ColumnNotFound {
            column: "specimen_collected".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Column not found in dataset: specimen_collected"
        );
    }

    #[test]
    fn test_invalid_pairing_message() {
        let err = AnalysisError::InvalidPairing { count: 3 };
        assert!(err.to_string().contains("3 column names"));
    }

    #[test]
    fn test_insufficient_data_message() {
        let err = AnalysisError::InsufficientData {
            required: 1,
            actual: 0,
        };
        assert!(err.to_string().contains("got 0"));
    }
}
