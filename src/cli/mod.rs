//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the query engine.

pub mod config;
pub mod dataset;
pub mod export;
pub mod query;

pub use config::{handle_config_command, ConfigCommands};
pub use dataset::{handle_companies_command, handle_overview_command, handle_years_command};
pub use export::{handle_export_command, ExportCommands, ExportFormat};
pub use query::{handle_query_command, QueryArgs};
