//! Error types for the employee ETL pipeline
//!
//! Every error belongs to exactly one [`Stage`], so the orchestrator can
//! report which part of the run failed.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Pipeline stage an error originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Transform,
    Load,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Extract => "Data extraction",
            Stage::Transform => "Data transformation",
            Stage::Load => "Data load",
        };
        f.write_str(label)
    }
}

/// Errors raised by the extract, transform and load stages
#[derive(Debug, Error)]
pub enum EtlError {
    // === Extraction ===
    /// Source path does not resolve to a readable file.
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    /// Source has a header but no data rows, or is entirely empty.
    #[error("data in {path} is empty or contains no data")]
    EmptyData { path: PathBuf },

    /// File extension is not a spreadsheet or delimited-text format.
    #[error("unsupported source format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source content could not be parsed as a table.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    // === Transformation ===
    /// Table is empty or structurally invalid.
    #[error("invalid input table: {reason}")]
    InvalidInput { reason: String },

    #[error("required column '{column}' not found in the input table")]
    MissingColumn { column: String },

    /// A cell cannot be coerced to what the operation needs.
    #[error("column '{column}' row {row}: cannot use {value} as {expected}")]
    IncompatibleType {
        column: String,
        row: usize,
        value: String,
        expected: &'static str,
    },

    // === Load ===
    #[error("invalid destination table name '{name}'")]
    InvalidTableName { name: String },

    /// Destination write could not complete.
    #[error("error loading data into {table} table: {source}")]
    Load {
        table: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl EtlError {
    /// The pipeline stage this error belongs to
    pub fn stage(&self) -> Stage {
        match self {
            EtlError::NotFound { .. }
            | EtlError::EmptyData { .. }
            | EtlError::UnsupportedFormat { .. }
            | EtlError::Read { .. }
            | EtlError::Parse { .. } => Stage::Extract,
            EtlError::InvalidInput { .. }
            | EtlError::MissingColumn { .. }
            | EtlError::IncompatibleType { .. } => Stage::Transform,
            EtlError::InvalidTableName { .. } | EtlError::Load { .. } => Stage::Load,
        }
    }

    pub(crate) fn missing_column(column: &str) -> Self {
        EtlError::MissingColumn {
            column: column.to_string(),
        }
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        EtlError::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Result type for pipeline stages
pub type Result<T> = std::result::Result<T, EtlError>;
