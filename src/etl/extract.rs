//! Extractor trait for reading a source into memory

use crate::error::Result;

/// Extractor trait for extracting data from a source
///
/// Implementors define how to read a source such as:
/// - Delimited text files
/// - Spreadsheet workbooks
///
/// # Example
/// ```no_run
/// use employee_etl::error::Result;
/// use employee_etl::etl::Extractor;
/// use employee_etl::table::Table;
///
/// struct EmptySource;
///
/// impl Extractor for EmptySource {
///     type Output = Table;
///
///     fn extract(&self) -> Result<Self::Output> {
///         Ok(Table::default())
///     }
/// }
/// ```
pub trait Extractor {
    /// The type produced by extraction
    type Output;

    /// Extract the source
    ///
    /// # Errors
    /// Returns an error if the source is missing, empty or unreadable
    fn extract(&self) -> Result<Self::Output>;
}
