//! Weekly work hours derived from the contract type

use super::rules;
use crate::error::Result;
use crate::etl::Transformer;
use crate::table::{ColumnType, Table};
use serde_json::Value;

/// Weekly hours implied by a contract type
///
/// Total over every input: unknown strings, non-strings and null are all 0.
///
/// ```
/// use employee_etl::transform::work_hours;
/// use serde_json::json;
///
/// assert_eq!(work_hours(&json!("Full-time")), 40);
/// assert_eq!(work_hours(&json!("Part-time")), 20);
/// assert_eq!(work_hours(&json!("Freelance")), 0);
/// assert_eq!(work_hours(&json!(null)), 0);
/// ```
pub fn work_hours(contract_type: &Value) -> i64 {
    let Some(contract_type) = contract_type.as_str() else {
        return 0;
    };
    rules::CONTRACT_HOURS
        .iter()
        .find(|(kind, _)| *kind == contract_type)
        .map(|(_, hours)| *hours)
        .unwrap_or(0)
}

/// Adds the `Work Hours` column from `Contract Type`
pub struct WorkHoursEnricher;

impl Transformer for WorkHoursEnricher {
    type Input = Table;
    type Output = Table;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        input.require_column(rules::CONTRACT_TYPE_COLUMN)?;
        let hours: Vec<Value> = input
            .values(rules::CONTRACT_TYPE_COLUMN)
            .map(|v| Value::from(work_hours(v)))
            .collect();
        input.set_column(rules::WORK_HOURS_COLUMN, ColumnType::Integer, hours);
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EtlError;
    use serde_json::json;

    #[test]
    fn test_mapping_is_total() {
        for value in [
            json!(""),
            json!("full-time"),
            json!("Full-time "),
            json!("Contractor"),
            json!(40),
            json!(true),
            json!(["Full-time"]),
            Value::Null,
        ] {
            assert_eq!(work_hours(&value), 0, "{}", value);
        }
        assert_eq!(work_hours(&json!("Full-time")), 40);
        assert_eq!(work_hours(&json!("Part-time")), 20);
    }

    #[test]
    fn test_enrich_table() {
        let table = Table::from_rows(
            vec!["ID".into(), "Contract Type".into()],
            vec![
                vec![json!(1), json!("Full-time")],
                vec![json!(2), json!("Part-time")],
                vec![json!(3), json!("Freelance")],
                vec![json!(4), Value::Null],
            ],
        );

        let output = WorkHoursEnricher.transform(table).unwrap();

        let hours: Vec<&Value> = output.values("Work Hours").collect();
        assert_eq!(hours, vec![&json!(40), &json!(20), &json!(0), &json!(0)]);
        assert_eq!(
            output.column("Work Hours").unwrap().kind,
            ColumnType::Integer
        );
    }

    #[test]
    fn test_missing_contract_type() {
        let table = Table::from_rows(vec!["ID".into()], vec![vec![json!(1)]]);
        let err = WorkHoursEnricher.transform(table).unwrap_err();
        assert!(matches!(err, EtlError::MissingColumn { column } if column == "Contract Type"));
    }
}
