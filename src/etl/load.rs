//! Loader trait for persisting data to a destination

use crate::error::Result;

/// Loader trait for loading data to a destination
///
/// Implementors define how to write to destinations such as
/// relational database tables.
///
/// # Example
/// ```no_run
/// use employee_etl::error::Result;
/// use employee_etl::etl::Loader;
/// use employee_etl::table::Table;
///
/// struct CountingLoader;
///
/// impl Loader for CountingLoader {
///     type Input = Table;
///
///     fn load(&self, table: Self::Input) -> Result<usize> {
///         Ok(table.len())
///     }
/// }
/// ```
pub trait Loader {
    /// The type accepted by the destination
    type Input;

    /// Load into the destination
    ///
    /// Returns the number of rows written
    ///
    /// # Errors
    /// Returns an error if the write cannot complete (connectivity,
    /// constraint violation, permissions, etc.)
    fn load(&self, input: Self::Input) -> Result<usize>;
}
