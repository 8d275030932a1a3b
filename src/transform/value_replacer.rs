//! Table-wide value canonicalization

use super::rules;
use crate::error::Result;
use crate::etl::Transformer;
use crate::table::Table;
use serde_json::Value;
use std::collections::HashMap;

/// Replaces whole string cells equal to a known raw value, in every column
///
/// Partial matches are left alone: `"IT Support"` is not rewritten.
pub struct ValueReplacer {
    replacements: HashMap<String, String>,
}

impl ValueReplacer {
    pub fn new(replacements: &[(&str, &str)]) -> Self {
        Self {
            replacements: replacements
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    /// Abbreviation expansions for departments and countries
    pub fn canonical_values() -> Self {
        Self::new(rules::VALUE_REPLACEMENTS)
    }
}

impl Transformer for ValueReplacer {
    type Input = Table;
    type Output = Table;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let mut replaced = 0usize;
        input.for_each_cell_mut(|cell| {
            if let Value::String(s) = cell {
                if let Some(canonical) = self.replacements.get(s.as_str()) {
                    *s = canonical.clone();
                    replaced += 1;
                }
            }
        });
        log::debug!("Canonicalized {} cells", replaced);
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> Table {
        Table::from_rows(
            vec!["Department".into(), "Country".into(), "Notes".into()],
            vec![
                vec![json!("IT"), json!("USA"), json!("IT")],
                vec![json!("HR"), json!("Canada"), json!("IT Support")],
            ],
        )
    }

    #[test]
    fn test_replaces_in_any_column() {
        let output = ValueReplacer::canonical_values()
            .transform(table())
            .unwrap();

        assert_eq!(output.value(0, "Department"), "Information Technology");
        assert_eq!(output.value(0, "Country"), "United States of America");
        assert_eq!(output.value(0, "Notes"), "Information Technology");
        assert_eq!(output.value(1, "Department"), "HR");
        assert_eq!(output.value(1, "Notes"), "IT Support");
    }

    #[test]
    fn test_idempotent() {
        let replacer = ValueReplacer::canonical_values();
        let once = replacer.transform(table()).unwrap();
        let twice = replacer.transform(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_ignores_non_strings() {
        let table = Table::from_rows(vec!["ID".into()], vec![vec![json!(1)]]);
        let output = ValueReplacer::new(&[("1", "one")]).transform(table).unwrap();
        assert_eq!(output.value(0, "ID"), &json!(1));
    }
}
