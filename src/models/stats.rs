//! Derived statistics produced by the query engine
//!
//! These are plain data consumed by reports, exports and the TUI. Every
//! numeric statistic is optional: an empty input or an input whose index
//! values are all missing leaves them unset.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::record::FrequencyColumn;

/// Summary of the transformation index over a subset
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of records in the subset
    pub record_count: usize,
    /// Number of distinct stock codes
    pub distinct_company_count: usize,
    /// (min_year, max_year)
    pub year_range: Option<(i32, i32)>,
    /// Mean index
    pub mean: Option<f64>,
    /// Maximum index
    pub max: Option<f64>,
    /// Minimum index
    pub min: Option<f64>,
    /// Median index
    pub median: Option<f64>,
    /// Sample standard deviation (needs at least two values)
    pub standard_deviation: Option<f64>,
}

/// Index statistics for a single year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearStats {
    /// Fiscal year
    pub year: i32,
    /// Mean index
    pub mean: Option<f64>,
    /// Median index
    pub median: Option<f64>,
    /// Maximum index
    pub max: Option<f64>,
    /// Minimum index
    pub min: Option<f64>,
    /// Sample standard deviation
    pub standard_deviation: Option<f64>,
    /// Records in the year with a non-missing index
    pub company_count: usize,
    /// All records in the year
    pub record_count: usize,
}

/// Aggregate statistics for one frequency column
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionStats {
    /// Sum of the column
    pub sum: u64,
    /// Mean of the column
    pub mean: Option<f64>,
    /// Maximum of the column
    pub max: Option<u64>,
    /// Minimum of the column
    pub min: Option<u64>,
}

/// Per-column statistics, iterated in canonical column order
pub type TechSummary = BTreeMap<FrequencyColumn, DimensionStats>;

/// How the trend series was aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendKind {
    /// Raw per-observation values of a single company
    Company,
    /// Per-year mean across several companies
    Average,
}

/// One point on the index trend line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Fiscal year
    pub year: i32,
    /// Index value (raw or mean depending on the trend kind)
    pub value: f64,
}

/// Index trend over years
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Aggregation used for the points
    pub kind: TrendKind,
    /// Points in ascending year order
    pub points: Vec<TrendPoint>,
}

impl Trend {
    /// The point values in order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// A histogram bin over index values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive lower edge
    pub lower: f64,
    /// Upper edge (exclusive except for the last bin)
    pub upper: f64,
    /// Number of values in the bin
    pub count: usize,
}

/// Technology keyword totals for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearTechTotals {
    /// Fiscal year
    pub year: i32,
    /// Sums for the AI, big data, cloud and blockchain columns
    pub totals: BTreeMap<FrequencyColumn, u64>,
}

/// A distinct company in the dataset
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompanyEntry {
    /// Stock code
    pub stock_code: String,
    /// Company name
    pub company_name: String,
}

/// Whole-dataset totals
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatasetOverview {
    /// Distinct stock codes
    pub company_count: usize,
    /// (min_year, max_year)
    pub year_range: Option<(i32, i32)>,
    /// Number of records
    pub record_count: usize,
}
