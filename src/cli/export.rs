//! CLI commands for data export

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use super::query::parse_year;
use crate::error::{DtiError, DtiResult};
use crate::export::export_records_csv;
use crate::models::{QueryFilter, YearSelection};
use crate::services::IndexQueryEngine;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (per-year statistics)
    Csv,
    /// JSON format (full report)
    Json,
    /// YAML format (full report, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ExportCommands {
    /// Export filtered records to CSV with the source headers
    Records {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Stock code to export (all companies when omitted)
        #[arg(short, long)]
        code: Option<String>,

        /// Fiscal year, or "all"
        #[arg(short, long, value_parser = parse_year, default_value = "all")]
        year: YearSelection,
    },
}

/// Handle export commands
pub fn handle_export_command(engine: &IndexQueryEngine, cmd: ExportCommands) -> DtiResult<()> {
    match cmd {
        ExportCommands::Records { output, code, year } => {
            let filter = QueryFilter {
                stock_code: code,
                year,
            };
            handle_export_records(engine, &filter, output)
        }
    }
}

fn handle_export_records(
    engine: &IndexQueryEngine,
    filter: &QueryFilter,
    output: PathBuf,
) -> DtiResult<()> {
    let records = engine.query(filter);

    let file = File::create(&output).map_err(|e| {
        DtiError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    export_records_csv(&records, &mut writer)?;
    writer.flush()?;

    println!("{} records exported to: {}", records.len(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dataset, Record};
    use crate::storage::{load_dataset, LoadOptions};
    use tempfile::TempDir;

    #[test]
    fn test_export_records_filtered() {
        let engine = IndexQueryEngine::new(Dataset::new(vec![
            Record::new("600000", "浦发银行", 2019).with_index(0.12),
            Record::new("600000", "浦发银行", 2020).with_index(0.18),
            Record::new("600001", "邯郸钢铁", 2020).with_index(0.30),
        ]));
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("records.csv");

        handle_export_command(
            &engine,
            ExportCommands::Records {
                output: output.clone(),
                code: None,
                year: YearSelection::Year(2020),
            },
        )
        .unwrap();

        let loaded = load_dataset(&output, &LoadOptions::default()).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(loaded.iter().all(|r| r.year == 2020));
    }
}
