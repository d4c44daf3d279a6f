//! CLI commands for configuration

use std::path::PathBuf;

use clap::Subcommand;
use tracing::info;

use crate::config::{DtiPaths, Settings};
use crate::error::{DtiError, DtiResult};

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Remember the dataset file used when --data is not given
    SetData {
        /// Path to the spreadsheet or CSV file
        path: PathBuf,
    },

    /// Remember the worksheet to read from workbooks
    SetSheet {
        /// Worksheet name
        name: String,
    },
}

/// Handle config commands; without a subcommand, print the configuration
pub fn handle_config_command(
    paths: &DtiPaths,
    settings: &mut Settings,
    cmd: Option<ConfigCommands>,
) -> DtiResult<()> {
    match cmd {
        None => {
            print_config(paths, settings);
            Ok(())
        }
        Some(ConfigCommands::SetData { path }) => {
            if !path.is_file() {
                return Err(DtiError::Validation(format!(
                    "Dataset file not found: {}",
                    path.display()
                )));
            }
            let path = path.canonicalize().unwrap_or(path);
            settings.dataset_path = Some(path.clone());
            settings.save(paths)?;
            info!(path = %path.display(), "dataset path saved");
            println!("Dataset path set to: {}", path.display());
            Ok(())
        }
        Some(ConfigCommands::SetSheet { name }) => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(DtiError::Validation("Sheet name cannot be empty".into()));
            }
            settings.sheet_name = Some(name.clone());
            settings.save(paths)?;
            println!("Worksheet set to: {}", name);
            Ok(())
        }
    }
}

fn print_config(paths: &DtiPaths, settings: &Settings) {
    println!("dti Configuration");
    println!("=================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Log file:         {}", paths.log_file().display());
    println!();
    println!("Settings:");
    println!(
        "  Dataset:        {}",
        settings
            .dataset_path
            .as_ref()
            .map_or_else(|| "(not set)".to_string(), |p| p.display().to_string())
    );
    println!(
        "  Worksheet:      {}",
        settings.sheet_name.as_deref().unwrap_or("(first sheet)")
    );
    println!("  Precision:      {}", settings.precision);
    println!("  Preview rows:   {}", settings.preview_rows);
    println!("  Histogram bins: {}", settings.histogram_bins);
}
