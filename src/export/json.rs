//! JSON Export functionality
//!
//! Exports a query report to JSON with schema versioning.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{DtiError, DtiResult};
use crate::models::QueryFilter;
use crate::reports::IndexReport;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A query report wrapped with export metadata
#[derive(Debug, Clone, Serialize)]
pub struct QueryExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    /// The query that was run
    pub filter: &'a QueryFilter,

    /// Every report section
    pub report: &'a IndexReport,
}

impl<'a> QueryExport<'a> {
    /// Wrap a report for export
    pub fn new(report: &'a IndexReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            filter: &report.filter,
            report,
        }
    }
}

/// Export a report to JSON
pub fn export_report_json<W: Write>(
    report: &IndexReport,
    writer: &mut W,
    pretty: bool,
) -> DtiResult<()> {
    let export = QueryExport::new(report);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| DtiError::Export(e.to_string()))?;

    Ok(())
}
