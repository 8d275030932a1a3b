//! Core ETL (Extract, Transform, Load) abstractions
//!
//! This module provides trait definitions for building a data pipeline
//! that extracts a table from a source, transforms it, and loads it to a
//! destination.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::Pipeline;
pub use transform::Transformer;
