//! In-memory tabular dataset for procedure-tracking records
//!
//! A `Dataset` is an ordered table of records loaded from a single delimited
//! file. Row indices are stable for the lifetime of the dataset: index `i`
//! always refers to the same source record, which is what lets the outlier
//! classifier map its row selections back to record identifiers.

use crate::error::AnalysisError;
use std::path::Path;

/// Ordered table of records with named columns
///
/// Cells are stored as raw strings; an empty cell means "missing". The
/// analysis core only reads from a `Dataset` — it is passed by shared
/// reference to every pipeline function and never mutated.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Build a dataset from a header and pre-split rows
    ///
    /// Short rows are padded with empty (missing) cells so every column
    /// lookup sees exactly one cell per row.
    pub fn new(columns: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self { columns, rows }
    }

    /// Parse CSV text (header row required) into a dataset
    pub fn from_csv_str(text: &str) -> Self {
        let mut records = parse_csv(text);
        if records.is_empty() {
            return Self::new(Vec::new(), Vec::new());
        }
        let columns = records.remove(0);
        Self::new(columns, records)
    }

    /// Load a dataset from a CSV file on disk
    pub fn from_csv_path(path: &Path) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_csv_str(&text))
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in source order
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Look up a column by name, row-index order
    ///
    /// Empty cells come back as `None` so downstream parsing can distinguish
    /// a missing timestamp from an unparseable one without re-checking.
    pub fn column(&self, name: &str) -> Result<Vec<Option<&str>>, AnalysisError> {
        let idx = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| AnalysisError::ColumnNotFound {
                column: name.to_string(),
            })?;
        Ok(self
            .rows
            .iter()
            .map(|row| {
                let cell = row[idx].trim();
                if cell.is_empty() {
                    None
                } else {
                    Some(row[idx].as_str())
                }
            })
            .collect())
    }

    /// Record identifiers from the given id column, row-index order
    ///
    /// Missing cells yield an empty identifier rather than failing — the
    /// classifier's row/identifier alignment matters more than id hygiene.
    pub fn record_ids(&self, id_column: &str) -> Result<Vec<String>, AnalysisError> {
        Ok(self
            .column(id_column)?
            .into_iter()
            .map(|cell| cell.unwrap_or("").trim().to_string())
            .collect())
    }
}

/// Split CSV text into records, honoring quoted fields
///
/// Handles the same dialect the formatter in `csv_output` emits: fields
/// containing commas, quotes, or newlines are wrapped in double quotes with
/// embedded quotes doubled.
fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                fields.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut fields));
            }
            '\n' => {
                fields.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut fields));
            }
            _ => field.push(c),
        }
    }

    // Trailing record without a final newline
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(fields);
    }

    // Drop fully blank lines
    records.retain(|r| !(r.len() == 1 && r[0].is_empty()));
    records
}
