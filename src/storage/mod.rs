//! Source and destination storage
//!
//! This module handles all I/O at the edges of the pipeline:
//! - Delimited text and workbook sources (extraction)
//! - The relational destination table (loading)

mod database;
mod delimited;
mod source;
mod workbook;

pub use database::TableWriter;
pub use delimited::DelimitedReader;
pub use workbook::WorkbookReader;

use crate::error::{EtlError, Result};
use crate::etl::Extractor;
use crate::table::Table;
use std::path::{Path, PathBuf};

/// Reader that picks the delimited or workbook reader by file extension
pub struct SpreadsheetReader {
    path: PathBuf,
}

impl SpreadsheetReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Extractor for SpreadsheetReader {
    type Output = Table;

    fn extract(&self) -> Result<Self::Output> {
        source::check_source(&self.path)?;

        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => WorkbookReader::new(&self.path).read(),
            "csv" | "txt" => DelimitedReader::new(&self.path).read(),
            "tsv" => DelimitedReader::with_delimiter(&self.path, b'\t').read(),
            _ => Err(EtlError::UnsupportedFormat {
                path: self.path.clone(),
            }),
        }
    }
}
