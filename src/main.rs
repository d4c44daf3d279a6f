use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dti::cli::{
    handle_companies_command, handle_config_command, handle_export_command,
    handle_overview_command, handle_query_command, handle_years_command, ConfigCommands,
    ExportCommands, QueryArgs,
};
use dti::config::{DtiPaths, Settings};
use dti::services::IndexQueryEngine;
use dti::storage::LoadOptions;

#[derive(Parser)]
#[command(
    name = "dti",
    version,
    about = "Query listed companies' digital transformation index",
    long_about = "dti loads a spreadsheet of listed companies' digital transformation \
                  index, derived from keyword frequencies in annual reports, and \
                  answers per-company and per-year queries from the command line \
                  or an interactive dashboard."
)]
struct Cli {
    /// Dataset file (.xlsx, .xls, .ods or .csv)
    #[arg(long, global = true, env = "DTI_DATASET")]
    data: Option<PathBuf>,

    /// Worksheet to read from a workbook (defaults to the first sheet)
    #[arg(long, global = true)]
    sheet: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the index for a stock code and/or year
    #[command(alias = "q")]
    Query(QueryArgs),

    /// List stock codes and company names
    Companies {
        /// Only show codes or names containing this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List the years present in the dataset
    Years,

    /// Show dataset totals
    Overview,

    /// Export data to files
    #[command(subcommand)]
    Export(ExportCommands),

    /// Launch the interactive dashboard
    #[command(alias = "ui")]
    Tui,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

/// Log to stderr, or to a file while the dashboard owns the terminal
fn init_tracing(paths: &DtiPaths, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if to_file {
        paths.ensure_directories()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(paths.log_file())
            .with_context(|| format!("Failed to open log file {}", paths.log_file().display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

fn load_engine(cli: &Cli, settings: &Settings) -> Result<IndexQueryEngine> {
    let path = settings.resolve_dataset(cli.data.as_deref())?;

    let mut options = LoadOptions::default();
    if let Some(sheet) = cli.sheet.as_ref().or(settings.sheet_name.as_ref()) {
        options = options.with_sheet(sheet.clone());
    }

    Ok(IndexQueryEngine::load(&path, &options)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = DtiPaths::new()?;
    init_tracing(&paths, matches!(cli.command, Some(Commands::Tui)))?;
    let mut settings = Settings::load_or_create(&paths)?;

    match &cli.command {
        Some(Commands::Config { command }) => {
            handle_config_command(&paths, &mut settings, command.clone())?;
        }
        Some(Commands::Query(args)) => {
            let engine = load_engine(&cli, &settings)?;
            handle_query_command(&engine, &settings, args.clone())?;
        }
        Some(Commands::Companies { search }) => {
            let engine = load_engine(&cli, &settings)?;
            handle_companies_command(&engine, search.clone())?;
        }
        Some(Commands::Years) => {
            let engine = load_engine(&cli, &settings)?;
            handle_years_command(&engine)?;
        }
        Some(Commands::Overview) => {
            let engine = load_engine(&cli, &settings)?;
            handle_overview_command(&engine)?;
        }
        Some(Commands::Export(cmd)) => {
            let engine = load_engine(&cli, &settings)?;
            handle_export_command(&engine, cmd.clone())?;
        }
        Some(Commands::Tui) => {
            let engine = load_engine(&cli, &settings)?;
            dti::tui::run_tui(&engine, &settings)?;
        }
        None => {
            println!("dti - Digital transformation index query tool");
            println!();
            println!("Run 'dti --help' for usage information.");
            println!("Run 'dti tui' to launch the interactive dashboard.");
        }
    }

    Ok(())
}
