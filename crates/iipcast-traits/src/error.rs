//! Error types for the iipcast pipeline.
//!
//! Every error is local to the computation that raised it: a failing model or
//! a stock without data never aborts the process, and callers decide whether
//! to omit the affected section or halt the current run.

use thiserror::Error;

/// The main error type for iipcast operations.
#[derive(Debug, Error)]
pub enum IipcastError {
    /// One or more required columns are absent from a loaded table.
    #[error("Missing required column(s) in {table}: {}", .columns.join(", "))]
    MissingColumn {
        /// Name of the table that failed validation.
        table: String,
        /// Every required column that was not found.
        columns: Vec<String>,
    },

    /// Too few aligned observations for the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A ratio would divide by zero (or by a non-finite denominator).
    #[error("Division by zero: {0}")]
    DivideByZero(String),

    /// A requested industry, stock, sheet, row or interpretation is absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Data is present but malformed or out of its valid range.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// An estimator failed to fit or produced non-finite output.
    #[error("{model} failed: {reason}")]
    ModelFit {
        /// Name of the estimator.
        model: String,
        /// Why fitting failed.
        reason: String,
    },

    /// Error reading a data file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error decoding an embedded or external JSON asset.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl IipcastError {
    /// Builds a [`IipcastError::MissingColumn`] from borrowed column names.
    pub fn missing_columns<S: AsRef<str>>(table: impl Into<String>, columns: &[S]) -> Self {
        Self::MissingColumn {
            table: table.into(),
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
        }
    }

    /// Builds a [`IipcastError::ModelFit`] for the named estimator.
    pub fn model_fit(model: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ModelFit {
            model: model.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors that mean "no data here", which callers
    /// degrade by omitting output rather than reporting a failure.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<String> for IipcastError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for IipcastError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for iipcast operations.
pub type Result<T> = std::result::Result<T, IipcastError>;
