//! The employee record cleaning pipeline

use super::{
    AgeEnricher, BirthMonthEnricher, ColumnDropper, ColumnRenamer, RowDeduplicator, TypeCoercer,
    ValueReplacer, WorkHoursEnricher, rules,
};
use crate::error::{EtlError, Result};
use crate::etl::Transformer;
use crate::table::Table;
use chrono::Datelike;

/// Applies the employee rules in their fixed order:
///
/// 1. Deduplicate by `ID`, first occurrence wins
/// 2. Drop sensitive columns
/// 3. Derive `Work Hours` from `Contract Type`
/// 4. Derive `Age` from `Date of Birth`
/// 5. Derive `Month of Birth` from `Date of Birth`
/// 6. Rename `Address` → `City`
/// 7. Canonicalize known abbreviations in every column
/// 8. Coerce text and categorical columns
///
/// The input table is consumed; on error nothing is returned.
pub struct EmployeeTransformer {
    reference_year: i32,
}

impl Default for EmployeeTransformer {
    fn default() -> Self {
        Self::for_year(chrono::Local::now().year())
    }
}

impl EmployeeTransformer {
    /// Transformer computing ages against the current year
    pub fn new() -> Self {
        Self::default()
    }

    /// Transformer computing ages against a fixed year
    pub fn for_year(reference_year: i32) -> Self {
        Self { reference_year }
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }
}

impl Transformer for EmployeeTransformer {
    type Input = Table;
    type Output = Table;

    fn transform(&self, input: Self::Input) -> Result<Self::Output> {
        if input.is_empty() {
            return Err(EtlError::invalid_input("table has no rows"));
        }
        input.validate()?;
        let rows_in = input.len();

        let table = RowDeduplicator::new(rules::ID_COLUMN).transform(input)?;
        let table = ColumnDropper::sensitive_columns().transform(table)?;
        let table = WorkHoursEnricher.transform(table)?;
        let table = AgeEnricher::new(self.reference_year).transform(table)?;
        let table = BirthMonthEnricher.transform(table)?;
        let table = ColumnRenamer::employee_columns().transform(table)?;
        let table = ValueReplacer::canonical_values().transform(table)?;
        let table = TypeCoercer::employee_columns().transform(table)?;

        log::debug!(
            "Transformed {} rows into {} rows x {} columns",
            rows_in,
            table.len(),
            table.columns().len()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnType;
    use serde_json::{Value, json};

    const HEADERS: [&str; 13] = [
        "ID",
        "First Name",
        "Last Name",
        "Date of Birth",
        "Contract Type",
        "Department",
        "Address",
        "Country",
        "Gender",
        "Place of Birth",
        "Emergency Contact ID",
        "Email",
        "Phone",
    ];

    fn employee(id: i64, contract: Value, birth: &str, department: &str) -> Vec<Value> {
        vec![
            json!(id),
            json!("Ada"),
            json!("Lovelace"),
            json!(birth),
            contract,
            json!(department),
            json!("Seattle"),
            json!("USA"),
            json!("F"),
            json!("London"),
            json!(900 + id),
            json!("ada@example.com"),
            json!("555-0100"),
        ]
    }

    fn table(rows: Vec<Vec<Value>>) -> Table {
        Table::from_rows(HEADERS.iter().map(|h| h.to_string()).collect(), rows)
    }

    #[test]
    fn test_duplicate_ids_and_work_hours() {
        let input = table(vec![
            employee(1, json!("Full-time"), "1990-03-01", "IT"),
            employee(1, json!("Part-time"), "1991-04-01", "HR"),
            employee(2, json!("Freelance"), "1985-12-09", "Sales"),
        ]);

        let output = EmployeeTransformer::for_year(2024).transform(input).unwrap();

        assert_eq!(output.len(), 2);
        assert_eq!(output.value(0, "ID"), &json!(1));
        assert_eq!(output.value(0, "Work Hours"), &json!(40));
        assert_eq!(output.value(0, "Department"), "Information Technology");
        assert_eq!(output.value(1, "ID"), &json!(2));
        assert_eq!(output.value(1, "Work Hours"), &json!(0));
    }

    #[test]
    fn test_output_schema() {
        let input = table(vec![employee(1, json!("Part-time"), "1990-05-14", "IT")]);

        let output = EmployeeTransformer::for_year(2024).transform(input).unwrap();

        let names: Vec<&str> = output.column_names().collect();
        assert_eq!(
            names,
            vec![
                "ID",
                "First Name",
                "Last Name",
                "Date of Birth",
                "Contract Type",
                "Department",
                "City",
                "Country",
                "Gender",
                "Work Hours",
                "Age",
                "Month of Birth",
            ]
        );
        assert_eq!(output.value(0, "Age"), &json!(34));
        assert_eq!(output.value(0, "Month of Birth"), "May");
        assert_eq!(output.value(0, "City"), "Seattle");
        assert_eq!(output.value(0, "Country"), "United States of America");

        let kind = |name: &str| output.column(name).unwrap().kind;
        for name in ["First Name", "Last Name", "Department", "Month of Birth"] {
            assert_eq!(kind(name), ColumnType::Text, "{}", name);
        }
        for name in ["City", "Country", "Contract Type", "Gender"] {
            assert_eq!(kind(name), ColumnType::Categorical, "{}", name);
        }
        assert_eq!(kind("Work Hours"), ColumnType::Integer);
        assert_eq!(kind("Age"), ColumnType::Integer);
    }

    #[test]
    fn test_empty_table_is_invalid() {
        let err = EmployeeTransformer::for_year(2024)
            .transform(table(vec![]))
            .unwrap_err();
        assert!(matches!(err, EtlError::InvalidInput { .. }));
    }

    #[test]
    fn test_missing_date_of_birth() {
        let headers: Vec<String> = HEADERS
            .iter()
            .filter(|h| **h != "Date of Birth")
            .map(|h| h.to_string())
            .collect();
        let mut row = employee(1, json!("Full-time"), "1990-05-14", "IT");
        row.remove(3);
        let input = Table::from_rows(headers, vec![row]);

        let err = EmployeeTransformer::for_year(2024)
            .transform(input)
            .unwrap_err();
        assert!(matches!(err, EtlError::MissingColumn { column } if column == "Date of Birth"));
    }

    #[test]
    fn test_bad_birth_date() {
        let input = table(vec![employee(1, json!("Full-time"), "someday", "IT")]);
        let err = EmployeeTransformer::for_year(2024)
            .transform(input)
            .unwrap_err();
        assert!(matches!(err, EtlError::IncompatibleType { .. }));
    }

    #[test]
    fn test_default_uses_current_year() {
        let year = chrono::Local::now().year();
        assert_eq!(EmployeeTransformer::new().reference_year(), year);
    }
}
