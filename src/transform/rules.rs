//! Fixed cleaning and enrichment rules for employee records
//!
//! Everything the transform stage keys on lives here as plain data.

use crate::table::ColumnType;

pub const ID_COLUMN: &str = "ID";
pub const CONTRACT_TYPE_COLUMN: &str = "Contract Type";
pub const DATE_OF_BIRTH_COLUMN: &str = "Date of Birth";

pub const WORK_HOURS_COLUMN: &str = "Work Hours";
pub const AGE_COLUMN: &str = "Age";
pub const MONTH_OF_BIRTH_COLUMN: &str = "Month of Birth";

/// Columns removed before anything is derived
pub const SENSITIVE_COLUMNS: &[&str] = &["Place of Birth", "Emergency Contact ID", "Email", "Phone"];

/// Weekly hours per contract type; anything else is 0
pub const CONTRACT_HOURS: &[(&str, i64)] = &[("Full-time", 40), ("Part-time", 20)];

/// `(from, to)` column renames
pub const COLUMN_RENAMES: &[(&str, &str)] = &[("Address", "City")];

/// Whole-cell replacements applied to every column
pub const VALUE_REPLACEMENTS: &[(&str, &str)] = &[
    ("IT", "Information Technology"),
    ("USA", "United States of America"),
];

/// Final column types
pub const COLUMN_TYPES: &[(&str, ColumnType)] = &[
    ("First Name", ColumnType::Text),
    ("Last Name", ColumnType::Text),
    ("Department", ColumnType::Text),
    ("City", ColumnType::Categorical),
    ("Country", ColumnType::Categorical),
    ("Contract Type", ColumnType::Categorical),
    ("Gender", ColumnType::Categorical),
    ("Month of Birth", ColumnType::Text),
];
