//! Relational destinations: DuckDB and PostgreSQL
//!
//! Loads replace the destination table wholesale: drop, create, insert and
//! commit run in a single transaction.

use crate::config::Destination;
use crate::error::{EtlError, Result};
use crate::etl::Loader;
use crate::table::{ColumnType, Table, parse_date};
use chrono::NaiveDate;
use duckdb::Connection;
use duckdb::types::Value as SqlValue;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static TABLE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("table name pattern is valid")
});

type WriteError = Box<dyn std::error::Error + Send + Sync>;

/// SQL flavour of the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    DuckDb,
    Postgres,
}

impl Dialect {
    fn sql_type(self, kind: ColumnType) -> &'static str {
        match (self, kind) {
            (_, ColumnType::Integer) => "BIGINT",
            (Dialect::DuckDb, ColumnType::Float) => "DOUBLE",
            (Dialect::Postgres, ColumnType::Float) => "DOUBLE PRECISION",
            (_, ColumnType::Boolean) => "BOOLEAN",
            (_, ColumnType::Date) => "DATE",
            (Dialect::DuckDb, ColumnType::Text | ColumnType::Categorical) => "VARCHAR",
            (Dialect::Postgres, ColumnType::Text | ColumnType::Categorical) => "TEXT",
        }
    }
}

/// Write a table to a named destination table, replacing prior contents
#[derive(Debug)]
pub struct TableWriter {
    destination: Destination,
    table_name: String,
}

impl TableWriter {
    /// Create a writer for `table_name`
    ///
    /// # Errors
    /// `InvalidTableName` unless the name is a plain SQL identifier
    pub fn new(destination: Destination, table_name: impl Into<String>) -> Result<Self> {
        let table_name = table_name.into();
        if !TABLE_NAME.is_match(&table_name) {
            return Err(EtlError::InvalidTableName { name: table_name });
        }
        Ok(Self {
            destination,
            table_name,
        })
    }

    /// Replace the destination table with `table`
    pub fn write(&self, table: &Table) -> Result<usize> {
        let written = match &self.destination {
            Destination::InMemory => Connection::open_in_memory()
                .map_err(WriteError::from)
                .and_then(|conn| self.write_duckdb(conn, table)),
            Destination::File(path) => Connection::open(path)
                .map_err(WriteError::from)
                .and_then(|conn| self.write_duckdb(conn, table)),
            Destination::Postgres(url) => self.write_postgres(url, table),
        };
        written.map_err(|source| EtlError::Load {
            table: self.table_name.clone(),
            source,
        })
    }

    fn write_duckdb(
        &self,
        mut conn: Connection,
        table: &Table,
    ) -> std::result::Result<usize, WriteError> {
        let tx = conn.transaction()?;

        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {};\n{}",
            quote_ident(&self.table_name),
            create_table_sql(&self.table_name, table, Dialect::DuckDb)
        ))?;

        {
            let mut appender = tx.appender(&self.table_name)?;
            for row in 0..table.len() {
                let values: Vec<SqlValue> = table
                    .columns()
                    .iter()
                    .map(|column| sql_value(table.value(row, &column.name), column.kind))
                    .collect();
                appender.append_row(duckdb::appender_params_from_iter(values))?;
            }
            appender.flush()?;
        }

        tx.commit()?;
        Ok(table.len())
    }

    fn write_postgres(
        &self,
        url: &url::Url,
        table: &Table,
    ) -> std::result::Result<usize, WriteError> {
        let mut client = postgres::Client::connect(url.as_str(), postgres::NoTls)?;
        let mut tx = client.transaction()?;

        tx.batch_execute(&format!(
            "DROP TABLE IF EXISTS {};\n{}",
            quote_ident(&self.table_name),
            create_table_sql(&self.table_name, table, Dialect::Postgres)
        ))?;

        let statement = tx.prepare(&insert_sql(&self.table_name, table))?;
        for row in 0..table.len() {
            let values: Vec<Box<dyn postgres::types::ToSql + Sync>> = table
                .columns()
                .iter()
                .map(|column| pg_value(table.value(row, &column.name), column.kind))
                .collect();
            let params: Vec<&(dyn postgres::types::ToSql + Sync)> =
                values.iter().map(|v| v.as_ref()).collect();
            tx.execute(&statement, &params)?;
        }

        tx.commit()?;
        Ok(table.len())
    }
}

impl Loader for TableWriter {
    type Input = Table;

    fn load(&self, table: Self::Input) -> Result<usize> {
        let count = self.write(&table)?;
        log::info!("Data loaded successfully into {} table", self.table_name);
        Ok(count)
    }
}

/// Double-quote an identifier, doubling embedded quotes
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn create_table_sql(name: &str, table: &Table, dialect: Dialect) -> String {
    let columns: Vec<String> = table
        .columns()
        .iter()
        .map(|c| format!("{} {}", quote_ident(&c.name), dialect.sql_type(c.kind)))
        .collect();
    format!("CREATE TABLE {} ({});", quote_ident(name), columns.join(", "))
}

/// Parameterized insert of one row, `$1..$n` in column order
fn insert_sql(name: &str, table: &Table) -> String {
    let columns: Vec<String> = table.column_names().map(quote_ident).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(name),
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// Text rendering of a cell for textual columns
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Convert a cell for a DuckDB column of the given type
///
/// Cells that do not fit the column type are written as text when the
/// column is textual and as NULL otherwise.
fn sql_value(value: &Value, kind: ColumnType) -> SqlValue {
    match kind {
        ColumnType::Integer => value.as_i64().map(SqlValue::BigInt),
        ColumnType::Float => value.as_f64().map(SqlValue::Double),
        ColumnType::Boolean => value.as_bool().map(SqlValue::Boolean),
        ColumnType::Date => value
            .as_str()
            .and_then(parse_date)
            .map(|d| SqlValue::Date32(days_since_epoch(d))),
        ColumnType::Text | ColumnType::Categorical => text_value(value).map(SqlValue::Text),
    }
    .unwrap_or(SqlValue::Null)
}

/// Convert a cell for a PostgreSQL column of the given type
///
/// Each column binds one Rust type; NULL is `None` of that type.
fn pg_value(value: &Value, kind: ColumnType) -> Box<dyn postgres::types::ToSql + Sync> {
    match kind {
        ColumnType::Integer => Box::new(value.as_i64()),
        ColumnType::Float => Box::new(value.as_f64()),
        ColumnType::Boolean => Box::new(value.as_bool()),
        ColumnType::Date => Box::new(value.as_str().and_then(parse_date)),
        ColumnType::Text | ColumnType::Categorical => Box::new(text_value(value)),
    }
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    (date - NaiveDate::default()).num_days() as i32
}
