//! Transform implementations for employee records
//!
//! Each rule is its own transformer over a [`crate::table::Table`];
//! [`EmployeeTransformer`] runs them in order. The rule data itself lives
//! in [`rules`].

mod birth_date;
mod column_dropper;
mod column_renamer;
mod deduplicator;
mod employee;
pub mod rules;
mod type_coercer;
mod value_replacer;
mod work_hours;

pub use birth_date::{AgeEnricher, BirthMonthEnricher, age_in, month_name};
pub use column_dropper::ColumnDropper;
pub use column_renamer::ColumnRenamer;
pub use deduplicator::RowDeduplicator;
pub use employee::EmployeeTransformer;
pub use type_coercer::TypeCoercer;
pub use value_replacer::ValueReplacer;
pub use work_hours::{WorkHoursEnricher, work_hours};
