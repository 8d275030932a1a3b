//! Employee ETL
//!
//! A batch job that extracts employee records from a spreadsheet, cleans and
//! enriches them, and replaces a relational table with the result.

pub mod cli;
pub mod config;
pub mod error;
pub mod etl;
pub mod storage;
pub mod table;
pub mod transform;

// Re-exports for convenience
pub use cli::EmployeeEtl;
pub use config::{Config, Destination};
pub use error::{EtlError, Stage};
pub use etl::{Extractor, Loader, Pipeline, Transformer};
pub use storage::{DelimitedReader, SpreadsheetReader, TableWriter, WorkbookReader};
pub use table::{Column, ColumnType, Record, Table};
pub use transform::EmployeeTransformer;
