//! Column type normalization

use super::rules;
use crate::error::{EtlError, Result};
use crate::etl::Transformer;
use crate::table::{ColumnType, Table};
use serde_json::Value;

/// Casts listed columns to text or categorical
///
/// Numbers and booleans are rendered as strings, nulls stay null.
pub struct TypeCoercer {
    columns: Vec<(String, ColumnType)>,
}

impl TypeCoercer {
    pub fn new(columns: &[(&str, ColumnType)]) -> Self {
        Self {
            columns: columns
                .iter()
                .map(|(name, kind)| (name.to_string(), *kind))
                .collect(),
        }
    }

    pub fn employee_columns() -> Self {
        Self::new(rules::COLUMN_TYPES)
    }
}

impl Transformer for TypeCoercer {
    type Input = Table;
    type Output = Table;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        for (name, kind) in &self.columns {
            let expected = match kind {
                ColumnType::Text => "text",
                ColumnType::Categorical => "a category",
                other => {
                    return Err(EtlError::invalid_input(format!(
                        "cannot coerce '{}' to {:?}",
                        name, other
                    )));
                }
            };
            input.map_column(name, |row, value| match value {
                Value::Null => Ok(Value::Null),
                Value::String(_) => Ok(value.clone()),
                Value::Number(_) | Value::Bool(_) => Ok(Value::String(value.to_string())),
                Value::Array(_) | Value::Object(_) => Err(EtlError::IncompatibleType {
                    column: name.clone(),
                    row,
                    value: value.to_string(),
                    expected,
                }),
            })?;
            input.set_column_type(name, *kind)?;
        }
        Ok(input)
    }
}
