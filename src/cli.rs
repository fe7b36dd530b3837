//! CLI argument parsing for Demora

use clap::{Parser, ValueEnum};

/// Output format for outlier reports
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text table (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

/// Outlier detection method
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DetectionMethod {
    /// Interquartile-range rule: flag outside [Q1 - k*IQR, Q3 + k*IQR]
    Iqr,
    /// Z-score rule: flag |z| above the threshold
    Zscore,
}

#[derive(Parser, Debug)]
#[command(name = "demora")]
#[command(version)]
#[command(about = "Procedure-tracking duration analysis with outlier detection", long_about = None)]
pub struct Cli {
    /// Input CSV file of timestamped procedure-tracking records
    pub input: std::path::PathBuf,

    /// Column holding the record identifier
    #[arg(long = "id-column", value_name = "COLUMN", default_value = "epic_order")]
    pub id_column: String,

    /// Timestamp column marking the start of the stage
    #[arg(short = 's', long = "start", value_name = "COLUMN")]
    pub start_column: Option<String>,

    /// Timestamp column marking the end of the stage
    #[arg(short = 'e', long = "end", value_name = "COLUMN")]
    pub end_column: Option<String>,

    /// Detection method
    #[arg(short = 'm', long = "method", value_enum, default_value = "iqr")]
    pub method: DetectionMethod,

    /// IQR multiplier (recommended range (0, 3.5])
    #[arg(long = "multiplier", value_name = "K", default_value = "0.5")]
    pub multiplier: f64,

    /// Z-score threshold in standard deviations (recommended range [0.5, 6])
    #[arg(long = "threshold", value_name = "SIGMA", default_value = "2.0")]
    pub threshold: f64,

    /// Comma-separated start,end column pairs for distribution summaries
    #[arg(short = 'g', long = "groups", value_name = "COLUMNS", value_delimiter = ',')]
    pub groups: Option<Vec<String>>,

    /// Output format (text, json, or csv)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
