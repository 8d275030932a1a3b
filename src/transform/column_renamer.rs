//! Column rename transformer

use super::rules;
use crate::error::Result;
use crate::etl::Transformer;
use crate::table::Table;

/// Renames columns in place; the old name no longer exists afterwards
pub struct ColumnRenamer {
    renames: Vec<(String, String)>,
}

impl ColumnRenamer {
    pub fn new(renames: &[(&str, &str)]) -> Self {
        Self {
            renames: renames
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    /// `Address` → `City`
    pub fn employee_columns() -> Self {
        Self::new(rules::COLUMN_RENAMES)
    }
}

impl Transformer for ColumnRenamer {
    type Input = Table;
    type Output = Table;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        for (from, to) in &self.renames {
            input.rename_column(from, to)?;
        }
        Ok(input)
    }
}
