//! Path management for dti-query
//!
//! Provides XDG-compliant path resolution for the settings file and log file.
//!
//! ## Path Resolution Order
//!
//! 1. `DTI_HOME` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/dti-query` or `~/.config/dti-query`
//! 3. Windows: `%APPDATA%\dti-query`

use std::path::PathBuf;

use crate::error::DtiError;

/// Environment variable that overrides the base directory
pub const HOME_ENV_VAR: &str = "DTI_HOME";

/// Manages all paths used by dti-query
#[derive(Debug, Clone)]
pub struct DtiPaths {
    /// Base directory for settings and logs
    base_dir: PathBuf,
}

impl DtiPaths {
    /// Create a new DtiPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if neither the override nor a home/config directory
    /// can be determined.
    pub fn new() -> Result<Self, DtiError> {
        let base_dir = if let Ok(custom) = std::env::var(HOME_ENV_VAR) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create DtiPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/dti-query/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the log file written while the TUI is running
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("dti.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), DtiError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DtiError::Io(format!("Failed to create base directory: {}", e)))
    }
}

/// Resolve the default base directory based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, DtiError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                DtiError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("dti-query"))
}

/// Resolve the default base directory based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, DtiError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| DtiError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("dti-query"))
}
