//! Reports module for dti-query
//!
//! Collects the derived views of one query into a report that can be
//! printed to the terminal, exported, or rendered by the dashboard.

pub mod index_report;

pub use index_report::{EmptyReason, IndexReport, ReportOptions};
