//! Error types for loading the survey dataset and building filters.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that stop the dashboard from starting.
///
/// Every variant is fatal: without a clean dataset no view can be shown.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file extension is neither `.csv` nor `.parquet`.
    #[error("Unsupported file format: '{0}'. Supported formats: csv, parquet")]
    UnsupportedFormat(String),

    /// One or more required columns are absent from the input.
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The satisfaction column holds a value outside the known label set.
    #[error("Unknown satisfaction label '{0}' (expected 'satisfied', 'dissatisfied' or 'neutral or dissatisfied')")]
    UnknownSatisfactionLabel(String),

    /// No usable records remain after cleaning.
    #[error("Dataset is empty after cleaning")]
    EmptyDataset,

    /// Reading or transforming the table failed.
    #[error("Failed to read dataset: {0}")]
    Polars(#[from] PolarsError),
}

/// Errors raised when building filter criteria from user input.
#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("Age range is inverted: minimum {min} is greater than maximum {max}")]
    InvertedAgeRange { min: u32, max: u32 },
}
