//! Display formatting for terminal output
//!
//! Provides utilities for formatting query results for terminal display,
//! including tables, metrics, and text bar charts.

pub mod format;
pub mod tables;

pub use format::{format_bar, format_value, format_year_range, truncate};
pub use tables::{
    format_company_table, format_record_table, format_tech_summary_table,
    format_year_stats_table, format_yearly_tech_table,
};
