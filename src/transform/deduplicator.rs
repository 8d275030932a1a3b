//! Row deduplication by key column

use crate::error::Result;
use crate::etl::Transformer;
use crate::table::Table;
use serde_json::Value;
use std::collections::HashSet;

/// Keep the first row for each distinct key value, in original order
///
/// Keys compare by JSON identity, so `1` and `"1"` are distinct and all
/// null keys count as one value.
pub struct RowDeduplicator {
    key: String,
}

impl RowDeduplicator {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Transformer for RowDeduplicator {
    type Input = Table;
    type Output = Table;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        input.require_column(&self.key)?;

        let before = input.len();
        let mut seen = HashSet::new();
        let key = self.key.as_str();
        input.retain_rows(|row| {
            let value = row.get(key).unwrap_or(&Value::Null).to_string();
            seen.insert(value)
        });

        if input.len() < before {
            log::debug!(
                "Dropped {} duplicate rows by {}",
                before - input.len(),
                self.key
            );
        }
        Ok(input)
    }
}
