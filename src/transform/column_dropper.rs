//! Column dropper transformer
//!
//! Removes columns that are sensitive or not needed downstream.

use super::rules;
use crate::error::Result;
use crate::etl::Transformer;
use crate::table::Table;

/// Transformer that drops specified columns from a table
///
/// Every listed column must be present; a missing one is `MissingColumn`.
///
/// # Example
/// ```
/// use employee_etl::transform::ColumnDropper;
/// use employee_etl::etl::Transformer;
/// use employee_etl::table::Table;
/// use serde_json::json;
///
/// let table = Table::from_rows(
///     vec!["ID".into(), "Email".into()],
///     vec![vec![json!(1), json!("ada@example.com")]],
/// );
///
/// let output = ColumnDropper::new(vec!["Email"]).transform(table).unwrap();
/// assert!(!output.has_column("Email"));
/// assert!(!output.rows()[0].contains_key("Email"));
/// ```
pub struct ColumnDropper {
    columns: Vec<String>,
}

impl ColumnDropper {
    /// Create a column dropper with the specified columns to remove
    pub fn new(columns: Vec<&str>) -> Self {
        Self {
            columns: columns.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Create a column dropper for the sensitive employee columns
    ///
    /// Drops: Place of Birth, Emergency Contact ID, Email, Phone
    pub fn sensitive_columns() -> Self {
        Self::new(rules::SENSITIVE_COLUMNS.to_vec())
    }
}

impl Transformer for ColumnDropper {
    type Input = Table;
    type Output = Table;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        for column in &self.columns {
            input.drop_column(column)?;
        }
        Ok(input)
    }
}
