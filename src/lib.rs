//! dti-query - Digital transformation index query tool
//!
//! This library loads a table of listed companies' digital transformation
//! index (derived from keyword frequencies in annual report text) and answers
//! filter and aggregation queries over it: summary statistics, per-year
//! statistics, index trends, distributions and keyword frequency breakdowns.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Records, query parameters and derived statistics
//! - `storage`: Spreadsheet and CSV loading
//! - `services`: The query engine
//! - `reports`: Query reports for terminal display
//! - `display`: Terminal formatting helpers
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers
//! - `tui`: Interactive dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use dti::models::QueryFilter;
//! use dti::services::IndexQueryEngine;
//! use dti::storage::LoadOptions;
//!
//! let engine = IndexQueryEngine::load(Path::new("data.xlsx"), &LoadOptions::default())?;
//! let subset = engine.query(&QueryFilter::for_stock("600000"));
//! let summary = IndexQueryEngine::summarize(&subset);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{DtiError, DtiResult};
