//! Dataset loading
//!
//! Reads the annual report spreadsheet (or a CSV export of it) into an
//! immutable [`Dataset`]. Loading is all-or-nothing: any problem with the file,
//! its header, or a cell aborts the load with a data load error.

pub mod columns;
pub mod csv;
pub mod rows;
pub mod workbook;

use std::path::Path;

use tracing::info;

use crate::error::{DtiError, DtiResult};
use crate::models::Dataset;

pub use columns::{ColumnLayout, Field};

/// Options controlling how a dataset file is read
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Worksheet name for workbook files
    pub sheet_name: Option<String>,
}

impl LoadOptions {
    /// Read a specific worksheet
    pub fn with_sheet(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = Some(sheet_name.into());
        self
    }
}

/// Supported input formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    /// Detect the format from a path's extension
    pub fn detect(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Workbook),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Load the dataset from a file
///
/// # Errors
///
/// Returns [`DtiError::DataLoad`] if the file is missing, has an unsupported
/// extension, cannot be parsed, lacks a required column, or holds an invalid
/// cell.
pub fn load_dataset(path: &Path, options: &LoadOptions) -> DtiResult<Dataset> {
    if !path.exists() {
        return Err(DtiError::DataLoad(format!(
            "dataset file not found: {}",
            path.display()
        )));
    }

    let format = SourceFormat::detect(path).ok_or_else(|| {
        DtiError::DataLoad(format!(
            "unsupported dataset format: {} (expected .xlsx, .xls, .ods or .csv)",
            path.display()
        ))
    })?;

    let dataset = match format {
        SourceFormat::Workbook => workbook::load_workbook(path, options.sheet_name.as_deref())?,
        SourceFormat::Csv => self::csv::load_csv(path)?,
    };

    info!(
        path = %path.display(),
        records = dataset.len(),
        companies = dataset.distinct_company_count(),
        "loaded dataset"
    );

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detect_format() {
        assert_eq!(
            SourceFormat::detect(Path::new("两版合并后的年报数据_完整版.xlsx")),
            Some(SourceFormat::Workbook)
        );
        assert_eq!(
            SourceFormat::detect(Path::new("data.CSV")),
            Some(SourceFormat::Csv)
        );
        assert_eq!(SourceFormat::detect(Path::new("data.txt")), None);
        assert_eq!(SourceFormat::detect(Path::new("data")), None);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_dataset(&temp_dir.path().join("absent.xlsx"), &LoadOptions::default())
            .unwrap_err();
        assert!(err.is_data_load());
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_unsupported_extension_is_load_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        std::fs::write(&path, "[]").unwrap();

        let err = load_dataset(&path, &LoadOptions::default()).unwrap_err();
        assert!(err.is_data_load());
    }

    #[test]
    fn test_load_csv_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports.csv");
        std::fs::write(
            &path,
            "stock_code,company_name,year,ai_freq,bigdata_freq,cloud_freq,blockchain_freq,digital_tech_freq,tech_dimension,application_dimension,total_word_count,transformation_index\n\
             600000,Pudong Bank,2019,1,0,0,0,2,0.1,0.1,5000,0.12\n\
             600000,Pudong Bank,2020,3,1,0,0,4,0.2,0.1,5200,0.18\n",
        )
        .unwrap();

        let dataset = load_dataset(&path, &LoadOptions::default()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[1].year, 2020);
    }
}
