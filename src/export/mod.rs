//! Export module for dti-query
//!
//! Provides export of query results in multiple formats:
//! - CSV: filtered records (loadable) and per-year statistics
//! - JSON: machine-readable report export
//! - YAML: human-readable report export

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::export_records_csv;
pub use json::{export_report_json, QueryExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;
