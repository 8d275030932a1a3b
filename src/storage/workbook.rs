//! Spreadsheet workbook source reader

use super::source::{MAX_EXACT_INT, build_table, check_source, number_value};
use crate::error::{EtlError, Result};
use crate::etl::Extractor;
use crate::table::Table;
use calamine::{Data, Reader, open_workbook_auto};
use chrono::Timelike;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Read the first worksheet of an `.xlsx`/`.xls`/`.ods` workbook
///
/// The first row of the used range is the header.
pub struct WorkbookReader {
    path: PathBuf,
}

impl WorkbookReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn read(&self) -> Result<Table> {
        check_source(&self.path)?;

        let mut workbook = open_workbook_auto(&self.path).map_err(|e| self.parse_error(e))?;
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range.map_err(|e| self.parse_error(e))?,
            None => {
                return Err(EtlError::EmptyData {
                    path: self.path.clone(),
                });
            }
        };

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header) => header.iter().map(header_text).collect(),
            None => Vec::new(),
        };
        let rows: Vec<Vec<Value>> = rows.map(|row| row.iter().map(cell_value).collect()).collect();

        let table = build_table(&self.path, headers, rows)?;
        log::debug!(
            "Read {} rows x {} columns from {}",
            table.len(),
            table.columns().len(),
            self.path.display()
        );
        Ok(table)
    }

    fn parse_error(&self, err: impl std::fmt::Display) -> EtlError {
        EtlError::Parse {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }
}

impl Extractor for WorkbookReader {
    type Output = Table;

    fn extract(&self) -> Result<Self::Output> {
        self.read()
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_INT => (*f as i64).to_string(),
        other => other.to_string(),
    }
}

/// Convert a worksheet cell; error cells read as null
fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::String(s) if s.trim().is_empty() => Value::Null,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => float_value(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if !dt.is_duration() => {
                let format = if datetime.num_seconds_from_midnight() == 0 {
                    "%Y-%m-%d"
                } else {
                    "%Y-%m-%dT%H:%M:%S"
                };
                Value::String(datetime.format(format).to_string())
            }
            _ => float_value(dt.as_f64()),
        },
    }
}

fn float_value(f: f64) -> Value {
    number_value(f).unwrap_or(Value::Null)
}
