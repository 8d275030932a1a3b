//! CLI helper functions

use crate::{
    config::Config,
    error::Result,
    etl::Pipeline,
    storage::{SpreadsheetReader, TableWriter},
    transform::EmployeeTransformer,
};
use std::path::Path;

/// Employee ETL job bound to one destination
///
/// Pipeline: SpreadsheetReader → EmployeeTransformer → TableWriter
pub struct EmployeeEtl {
    config: Config,
    transformer_year: Option<i32>,
}

impl EmployeeEtl {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            transformer_year: None,
        }
    }

    /// Compute ages against a fixed year instead of the current one
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.transformer_year = Some(year);
        self
    }

    /// Extract `file_path`, clean it, and replace `table_name` with the result
    ///
    /// Returns the number of rows loaded
    pub fn run(&self, file_path: impl AsRef<Path>, table_name: &str) -> Result<usize> {
        let file_path = file_path.as_ref();
        log::info!(
            "Loading {} into table {}",
            file_path.display(),
            table_name
        );

        let loader = TableWriter::new(self.config.destination.clone(), table_name)
            .inspect_err(|err| log::error!("{} failed: {}", err.stage(), err))?;
        let transformer = match self.transformer_year {
            Some(year) => EmployeeTransformer::for_year(year),
            None => EmployeeTransformer::new(),
        };

        Pipeline::new(SpreadsheetReader::new(file_path), transformer, loader).run()
    }
}
