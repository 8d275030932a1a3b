//! In-memory record table passed between pipeline stages
//!
//! A [`Table`] is an ordered list of named, typed [`Column`]s plus rows stored
//! as JSON objects keyed by column name. A missing key reads as null.

use crate::error::{EtlError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashSet};

/// One row: column name to cell value
pub type Record = Map<String, Value>;

static NULL: Value = Value::Null;

/// Declared semantic type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    /// ISO `YYYY-MM-DD` strings
    Date,
    Text,
    /// Text drawn from a finite, repeated value domain
    Categorical,
}

impl ColumnType {
    /// Infer a column type from its cell values, ignoring nulls
    ///
    /// All-null or mixed columns are `Text`.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut inferred: Option<ColumnType> = None;
        for value in values {
            let kind = match value {
                Value::Null => continue,
                Value::Bool(_) => ColumnType::Boolean,
                Value::Number(n) if n.is_i64() || n.is_u64() => ColumnType::Integer,
                Value::Number(_) => ColumnType::Float,
                Value::String(s) if parse_date(s).is_some() => ColumnType::Date,
                _ => return ColumnType::Text,
            };
            inferred = Some(match (inferred, kind) {
                (None, kind) => kind,
                (Some(a), b) if a == b => a,
                (Some(ColumnType::Integer), ColumnType::Float)
                | (Some(ColumnType::Float), ColumnType::Integer) => ColumnType::Float,
                _ => return ColumnType::Text,
            });
        }
        inferred.unwrap_or(ColumnType::Text)
    }
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Rows × named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Record>,
}

impl Table {
    pub fn new(columns: Vec<Column>, rows: Vec<Record>) -> Self {
        Self { columns, rows }
    }

    /// Build a table from a header and positional rows, inferring column types
    ///
    /// Short rows are padded with nulls; cells beyond the header are ignored.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let rows: Vec<Record> = rows
            .into_iter()
            .map(|cells| {
                let mut cells = cells.into_iter();
                headers
                    .iter()
                    .map(|name| (name.clone(), cells.next().unwrap_or(Value::Null)))
                    .collect()
            })
            .collect();

        let columns = headers
            .into_iter()
            .map(|name| {
                let kind = ColumnType::infer(rows.iter().map(|row| row.get(&name).unwrap_or(&NULL)));
                Column::new(name, kind)
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Position of a column, or `MissingColumn`
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| EtlError::missing_column(name))
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell value, null when the row has no entry for the column
    pub fn value(&self, row: usize, column: &str) -> &Value {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL)
    }

    /// All values of one column in row order
    pub fn values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows.iter().map(move |r| r.get(column).unwrap_or(&NULL))
    }

    /// Check column names are unique and every row key names a column
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(EtlError::invalid_input(format!(
                    "duplicate column '{}'",
                    column.name
                )));
            }
        }
        for (index, row) in self.rows.iter().enumerate() {
            if let Some(key) = row.keys().find(|k| !seen.contains(k.as_str())) {
                return Err(EtlError::invalid_input(format!(
                    "row {} has undeclared column '{}'",
                    index, key
                )));
            }
        }
        Ok(())
    }

    /// Keep only rows for which `keep` returns true, preserving order
    pub fn retain_rows(&mut self, keep: impl FnMut(&Record) -> bool) {
        self.rows.retain(keep);
    }

    pub fn drop_column(&mut self, name: &str) -> Result<()> {
        let index = self.require_column(name)?;
        self.columns.remove(index);
        for row in &mut self.rows {
            row.remove(name);
        }
        Ok(())
    }

    /// Rename a column in place, keeping its position and type
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<()> {
        let index = self.require_column(from)?;
        if from == to {
            return Ok(());
        }
        let collides = self
            .columns
            .iter()
            .enumerate()
            .any(|(i, c)| i != index && c.name.eq_ignore_ascii_case(to));
        if collides {
            return Err(EtlError::invalid_input(format!(
                "cannot rename '{}' to existing column '{}'",
                from, to
            )));
        }
        self.columns[index].name = to.to_string();
        for row in &mut self.rows {
            if let Some(value) = row.remove(from) {
                row.insert(to.to_string(), value);
            }
        }
        Ok(())
    }

    /// Add a column, or overwrite an existing one of the same name
    ///
    /// `values` holds one entry per row; missing entries are null.
    pub fn set_column(&mut self, name: &str, kind: ColumnType, values: Vec<Value>) {
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(column) => column.kind = kind,
            None => self.columns.push(Column::new(name, kind)),
        }
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row.insert(name.to_string(), values.next().unwrap_or(Value::Null));
        }
    }

    /// Rewrite every cell of a column; the first error aborts
    pub fn map_column(
        &mut self,
        name: &str,
        mut f: impl FnMut(usize, &Value) -> Result<Value>,
    ) -> Result<()> {
        self.require_column(name)?;
        for (index, row) in self.rows.iter_mut().enumerate() {
            let current = row.get(name).unwrap_or(&NULL);
            let updated = f(index, current)?;
            row.insert(name.to_string(), updated);
        }
        Ok(())
    }

    pub fn set_column_type(&mut self, name: &str, kind: ColumnType) -> Result<()> {
        let index = self.require_column(name)?;
        self.columns[index].kind = kind;
        Ok(())
    }

    /// Visit every cell in the table
    pub fn for_each_cell_mut(&mut self, mut f: impl FnMut(&mut Value)) {
        for row in &mut self.rows {
            for value in row.values_mut() {
                f(value);
            }
        }
    }

    /// Sorted distinct non-null values of a categorical column
    ///
    /// Returns `None` if the column is absent or not categorical.
    pub fn categories(&self, name: &str) -> Option<Vec<String>> {
        let column = self.column(name)?;
        if column.kind != ColumnType::Categorical {
            return None;
        }
        let domain: BTreeSet<String> = self
            .values(name)
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        Some(domain.into_iter().collect())
    }
}

/// Parse a date cell: ISO date, ISO date-time, or `YYYY/MM/DD`
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y/%m/%d") {
        return Some(date);
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}
