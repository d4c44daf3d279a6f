//! User settings for dti-query
//!
//! Manages where the dataset lives and how results are presented.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::paths::DtiPaths;
use crate::error::DtiError;

/// User settings for dti-query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default dataset file (xlsx/xls/ods/csv)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_path: Option<PathBuf>,

    /// Worksheet to read; the first sheet when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,

    /// Decimal places used when displaying index values
    #[serde(default = "default_precision")]
    pub precision: usize,

    /// Number of records shown in the data preview
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,

    /// Number of bins in the index distribution histogram
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_precision() -> usize {
    4
}

fn default_preview_rows() -> usize {
    10
}

fn default_histogram_bins() -> usize {
    20
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            dataset_path: None,
            sheet_name: None,
            precision: default_precision(),
            preview_rows: default_preview_rows(),
            histogram_bins: default_histogram_bins(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &DtiPaths) -> Result<Self, DtiError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| DtiError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| DtiError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DtiPaths) -> Result<(), DtiError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| DtiError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| DtiError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Pick the dataset file: an explicit path wins over the saved one
    ///
    /// # Errors
    ///
    /// Returns a configuration error when neither is available.
    pub fn resolve_dataset(&self, explicit: Option<&Path>) -> Result<PathBuf, DtiError> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.dataset_path.clone())
            .ok_or_else(|| {
                DtiError::Config(
                    "No dataset configured. Pass --data, set DTI_DATASET, \
                     or run 'dti config set-data <PATH>'"
                        .into(),
                )
            })
    }
}
