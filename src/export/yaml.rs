//! YAML Export functionality
//!
//! Exports a query report to YAML for human reading.

use std::io::Write;

use crate::error::{DtiError, DtiResult};
use crate::export::json::QueryExport;
use crate::reports::IndexReport;

/// Export a report to YAML
pub fn export_report_yaml<W: Write>(report: &IndexReport, writer: &mut W) -> DtiResult<()> {
    let export = QueryExport::new(report);

    writeln!(writer, "# Digital Transformation Index Query Export")?;
    writeln!(writer, "# Generated: {}", export.exported_at)?;
    writeln!(writer, "# App Version: {}", export.app_version)?;
    writeln!(writer)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| DtiError::Export(e.to_string()))?;

    Ok(())
}
