//! Helpers shared by the tabular source readers

use crate::error::{EtlError, Result};
use crate::table::Table;
use serde_json::{Number, Value};
use std::collections::HashSet;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Largest float that converts to an integer without loss
pub(crate) const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Fail with `NotFound` unless `path` is a regular file this process can open
pub(crate) fn check_source(path: &Path) -> Result<()> {
    let not_found = || EtlError::NotFound {
        path: path.to_path_buf(),
    };
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(not_found()),
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => return Err(not_found()),
        Err(e) => {
            return Err(EtlError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    }
    match File::open(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(not_found()),
        Err(e) => Err(EtlError::Read {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Numeric cell value; whole floats become integers so `1` and `1.0` compare equal
///
/// Returns `None` for NaN and infinities.
pub(crate) fn number_value(f: f64) -> Option<Value> {
    if f.fract() == 0.0 && f.abs() < MAX_EXACT_INT {
        return Some(Value::from(f as i64));
    }
    Number::from_f64(f).map(Value::Number)
}

/// Disambiguate repeated header names as `Name`, `Name.1`, `Name.2`, ...
pub(crate) fn unique_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    headers
        .into_iter()
        .map(|name| {
            let mut candidate = name.clone();
            let mut suffix = 1;
            while seen.contains(&candidate) {
                candidate = format!("{}.{}", name, suffix);
                suffix += 1;
            }
            if candidate != name {
                log::warn!("Duplicate header '{}' renamed to '{}'", name, candidate);
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}

/// Interpret a raw text cell
///
/// Empty → null, whole numbers (`1`, `1.0`) → integer, other numerics → float,
/// `true`/`false` → boolean, anything else stays text.
pub(crate) fn parse_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::from(i);
    }
    if let Some(number) = trimmed.parse::<f64>().ok().and_then(number_value) {
        return number;
    }
    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::String(raw.to_string())
}

/// Build the extracted table, skipping blank rows
///
/// Fails with `EmptyData` when there is no header or no data row.
pub(crate) fn build_table(
    path: &Path,
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
) -> Result<Table> {
    if headers.is_empty() {
        return Err(EtlError::EmptyData {
            path: path.to_path_buf(),
        });
    }

    let total = rows.len();
    let rows: Vec<Vec<Value>> = rows
        .into_iter()
        .filter(|cells| cells.iter().any(|c| !c.is_null()))
        .collect();
    if rows.len() < total {
        log::warn!(
            "Skipped {} blank rows in {}",
            total - rows.len(),
            path.display()
        );
    }
    if rows.is_empty() {
        return Err(EtlError::EmptyData {
            path: path.to_path_buf(),
        });
    }

    Ok(Table::from_rows(unique_headers(headers), rows))
}
