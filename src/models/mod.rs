//! Core data models for dti-query
//!
//! This module contains the records loaded from the annual report
//! spreadsheet, the query parameters, and the statistics derived from them.

pub mod dataset;
pub mod query;
pub mod record;
pub mod stats;

pub use dataset::Dataset;
pub use query::{DistinctField, QueryFilter, YearSelection};
pub use record::{FrequencyColumn, Record};
pub use stats::{
    CompanyEntry, DatasetOverview, DimensionStats, HistogramBin, SummaryStats, TechSummary, Trend,
    TrendKind, TrendPoint, YearStats, YearTechTotals,
};
