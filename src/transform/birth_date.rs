//! Age and birth month derived from `Date of Birth`

use super::rules;
use crate::error::{EtlError, Result};
use crate::etl::Transformer;
use crate::table::{ColumnType, Table, parse_date};
use chrono::{Datelike, Month, NaiveDate};
use serde_json::Value;

/// Age as calendar-year difference
///
/// Known simplification: month and day are ignored, so someone whose
/// birthday is still ahead this year is reported one year older than
/// their exact age.
pub fn age_in(reference_year: i32, date_of_birth: NaiveDate) -> i64 {
    i64::from(reference_year) - i64::from(date_of_birth.year())
}

/// English name of the calendar month, e.g. `"May"`
pub fn month_name(date: NaiveDate) -> &'static str {
    Month::try_from(date.month() as u8)
        .map(|m| m.name())
        .unwrap_or_default()
}

/// Parse every birth date; null cells stay `None`
fn birth_dates(table: &Table) -> Result<Vec<Option<NaiveDate>>> {
    table.require_column(rules::DATE_OF_BIRTH_COLUMN)?;
    table
        .values(rules::DATE_OF_BIRTH_COLUMN)
        .enumerate()
        .map(|(row, value)| match value {
            Value::Null => Ok(None),
            Value::String(s) => parse_date(s).map(Some).ok_or_else(|| incompatible(row, value)),
            other => Err(incompatible(row, other)),
        })
        .collect()
}

fn incompatible(row: usize, value: &Value) -> EtlError {
    EtlError::IncompatibleType {
        column: rules::DATE_OF_BIRTH_COLUMN.to_string(),
        row,
        value: value.to_string(),
        expected: "a date",
    }
}

/// Adds the `Age` column
pub struct AgeEnricher {
    reference_year: i32,
}

impl AgeEnricher {
    /// Ages are computed relative to `reference_year`
    pub fn new(reference_year: i32) -> Self {
        Self { reference_year }
    }
}

impl Transformer for AgeEnricher {
    type Input = Table;
    type Output = Table;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let ages = birth_dates(&input)?
            .into_iter()
            .map(|date| date.map_or(Value::Null, |d| Value::from(age_in(self.reference_year, d))))
            .collect();
        input.set_column(rules::AGE_COLUMN, ColumnType::Integer, ages);
        Ok(input)
    }
}

/// Adds the `Month of Birth` column
pub struct BirthMonthEnricher;

impl Transformer for BirthMonthEnricher {
    type Input = Table;
    type Output = Table;

    fn transform(&self, mut input: Self::Input) -> Result<Self::Output> {
        let months = birth_dates(&input)?
            .into_iter()
            .map(|date| date.map_or(Value::Null, |d| Value::from(month_name(d))))
            .collect();
        input.set_column(rules::MONTH_OF_BIRTH_COLUMN, ColumnType::Text, months);
        Ok(input)
    }
}
