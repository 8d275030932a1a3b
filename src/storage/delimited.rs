//! Delimited text (CSV/TSV) source reader

use super::source::{build_table, check_source, parse_cell};
use crate::error::{EtlError, Result};
use crate::etl::Extractor;
use crate::table::Table;
use std::path::{Path, PathBuf};

/// Read a delimited text file with a header row
pub struct DelimitedReader {
    path: PathBuf,
    delimiter: u8,
}

impl DelimitedReader {
    /// Comma-separated reader
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_delimiter(path, b',')
    }

    pub fn with_delimiter(path: impl AsRef<Path>, delimiter: u8) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter,
        }
    }

    /// Read the whole file into a table
    pub fn read(&self) -> Result<Table> {
        check_source(&self.path)?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|e| self.csv_error(e))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| self.csv_error(e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let headers = match headers.as_slice() {
            [only] if only.is_empty() => Vec::new(),
            _ => headers,
        };

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| self.csv_error(e))?;
            rows.push(record.iter().map(parse_cell).collect());
        }

        let table = build_table(&self.path, headers, rows)?;
        log::debug!(
            "Read {} rows x {} columns from {}",
            table.len(),
            table.columns().len(),
            self.path.display()
        );
        Ok(table)
    }

    fn csv_error(&self, err: csv::Error) -> EtlError {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => EtlError::Read {
                path: self.path.clone(),
                source,
            },
            _ => EtlError::Parse {
                path: self.path.clone(),
                message,
            },
        }
    }
}

impl Extractor for DelimitedReader {
    type Output = Table;

    fn extract(&self) -> Result<Self::Output> {
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnType;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv() {
        let file = write_temp(
            "ID,First Name,Date of Birth,Contract Type\n1,Ada,1990-05-14,Full-time\n2,Grace,1985-12-09,\n",
            ".csv",
        );
        let table = DelimitedReader::new(file.path()).read().unwrap();

        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["ID", "First Name", "Date of Birth", "Contract Type"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(0, "ID"), &json!(1));
        assert_eq!(table.value(1, "Contract Type"), &serde_json::Value::Null);
        assert_eq!(table.column("Date of Birth").unwrap().kind, ColumnType::Date);
    }

    #[test]
    fn test_read_tsv() {
        let file = write_temp("ID\tCity\n7\tBerlin\n", ".tsv");
        let table = DelimitedReader::with_delimiter(file.path(), b'\t')
            .read()
            .unwrap();
        assert_eq!(table.value(0, "City"), "Berlin");
    }

    #[test]
    fn test_header_only_is_empty() {
        let file = write_temp("ID,First Name\n", ".csv");
        let err = DelimitedReader::new(file.path()).read().unwrap_err();
        assert!(matches!(err, EtlError::EmptyData { .. }));
    }

    #[test]
    fn test_blank_file_is_empty() {
        let file = write_temp("", ".csv");
        let err = DelimitedReader::new(file.path()).read().unwrap_err();
        assert!(matches!(err, EtlError::EmptyData { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = DelimitedReader::new("/no/such/employees.csv")
            .read()
            .unwrap_err();
        assert!(matches!(err, EtlError::NotFound { .. }));
    }

    #[test]
    fn test_ragged_rows_fail_to_parse() {
        let file = write_temp("ID,Name\n1,Ada,extra\n", ".csv");
        let err = DelimitedReader::new(file.path()).read().unwrap_err();
        assert!(matches!(err, EtlError::Parse { .. }));
    }
}
