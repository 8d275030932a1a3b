//! Transformer trait for data transformation

use crate::error::Result;

/// Transformer trait for transforming data
///
/// Implementors define one cleaning or enrichment rule:
/// - Data cleaning (deduplicating rows, removing columns)
/// - Data enrichment (adding derived columns)
/// - Type normalization
///
/// # Example
/// ```
/// use employee_etl::error::Result;
/// use employee_etl::etl::Transformer;
/// use employee_etl::table::Table;
///
/// struct Identity;
///
/// impl Transformer for Identity {
///     type Input = Table;
///     type Output = Table;
///
///     fn transform(&self, input: Self::Input) -> Result<Self::Output> {
///         Ok(input)
///     }
/// }
///
/// let table = Identity.transform(Table::default()).unwrap();
/// assert!(table.is_empty());
/// ```
pub trait Transformer {
    /// Input type
    type Input;

    /// Output type after transformation
    type Output;

    /// Transform the input
    ///
    /// Consumes the input, so a failed transformation leaves nothing behind
    ///
    /// # Errors
    /// Returns an error if transformation fails (missing columns,
    /// incompatible values, etc.)
    fn transform(&self, input: Self::Input) -> Result<Self::Output>;
}
