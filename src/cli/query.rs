//! CLI command for index queries
//!
//! Runs one query and prints the report, or writes it to a file in the
//! requested format.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use super::export::ExportFormat;
use crate::config::Settings;
use crate::error::{DtiError, DtiResult};
use crate::export::{export_report_json, export_report_yaml};
use crate::models::{QueryFilter, YearSelection};
use crate::reports::{IndexReport, ReportOptions};
use crate::services::IndexQueryEngine;

/// Parse a `--year` value ("all", "全部" or a year)
pub fn parse_year(value: &str) -> Result<YearSelection, String> {
    YearSelection::parse(value)
        .ok_or_else(|| format!("invalid year '{}': expected a year or 'all'", value))
}

/// Arguments of the query command
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Stock code to look up (all companies when omitted)
    #[arg(short, long)]
    pub code: Option<String>,

    /// Fiscal year, or "all"
    #[arg(short, long, value_parser = parse_year, default_value = "all")]
    pub year: YearSelection,

    /// Write the report to a file instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output file format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl QueryArgs {
    /// The filter these arguments describe
    pub fn filter(&self) -> QueryFilter {
        QueryFilter {
            stock_code: self.code.clone(),
            year: self.year,
        }
    }
}

/// Handle the query command
pub fn handle_query_command(
    engine: &IndexQueryEngine,
    settings: &Settings,
    args: QueryArgs,
) -> DtiResult<()> {
    let report = IndexReport::generate(engine, &args.filter(), &ReportOptions::from(settings));

    if let Some(reason) = &report.empty_reason {
        eprintln!("Warning: {}", reason.message());
    }

    let Some(path) = args.output else {
        println!("{}", report.format_terminal());
        return Ok(());
    };

    let file = File::create(&path).map_err(|e| {
        DtiError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    match args.format {
        ExportFormat::Csv => report.export_csv(&mut writer)?,
        ExportFormat::Json => export_report_json(&report, &mut writer, args.pretty)?,
        ExportFormat::Yaml => export_report_yaml(&report, &mut writer)?,
    }
    writer.flush()?;

    info!(path = %path.display(), format = ?args.format, "report exported");
    println!("Report exported to: {}", path.display());
    Ok(())
}
