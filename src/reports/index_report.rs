//! Index Report
//!
//! Runs one query against the engine and collects everything the dashboard
//! shows for it: summary metrics, a preview, the index distribution, per-year
//! statistics, the trend line and the keyword frequency breakdowns.

use std::io::Write;

use serde::Serialize;

use crate::config::Settings;
use crate::display::format::{double_separator, format_bar, format_value, format_year_range, section};
use crate::display::tables::{
    format_record_table, format_tech_summary_table, format_year_stats_table,
    format_yearly_tech_table,
};
use crate::error::{DtiError, DtiResult};
use crate::models::{
    Dataset, HistogramBin, QueryFilter, SummaryStats, TechSummary, Trend, TrendKind, YearStats,
    YearTechTotals,
};
use crate::services::query::MAX_HISTOGRAM_BINS;
use crate::services::IndexQueryEngine;

const WIDTH: usize = 80;
const BAR_WIDTH: usize = 40;

/// Rendering and sizing options for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Decimal places for index statistics
    pub precision: usize,
    /// Records shown in the preview table
    pub preview_rows: usize,
    /// Histogram bin count
    pub histogram_bins: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            precision: 4,
            preview_rows: 10,
            histogram_bins: 20,
        }
    }
}

impl From<&Settings> for ReportOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            precision: settings.precision,
            preview_rows: settings.preview_rows,
            histogram_bins: settings.histogram_bins.clamp(1, MAX_HISTOGRAM_BINS),
        }
    }
}

/// Why a query matched nothing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum EmptyReason {
    /// The stock code does not occur anywhere in the dataset
    UnknownStockCode { stock_code: String },
    /// The stock code exists but has no record for the selected year
    NoDataForYear { stock_code: String, year: i32 },
    /// Nothing matched (no stock code given)
    NoData,
}

impl EmptyReason {
    /// User-facing warning text
    pub fn message(&self) -> String {
        match self {
            Self::UnknownStockCode { stock_code } => {
                format!("No data found for stock code {}", stock_code)
            }
            Self::NoDataForYear { stock_code, year } => {
                format!("No data found for {} in {}", stock_code, year)
            }
            Self::NoData => "No data matches the query".to_string(),
        }
    }
}

/// Everything derived from one query
#[derive(Debug, Clone, Serialize)]
pub struct IndexReport {
    /// The filter that produced this report
    pub filter: QueryFilter,
    /// Company name when exactly one company matched
    pub company_name: Option<String>,
    /// Summary statistics
    pub summary: SummaryStats,
    /// First records of the result
    pub preview: Dataset,
    /// Distribution of index values
    pub histogram: Vec<HistogramBin>,
    /// Per-year statistics
    pub year_stats: Vec<YearStats>,
    /// Index trend
    pub trend: Trend,
    /// Frequency column statistics
    pub tech_summary: TechSummary,
    /// Technology keyword totals per year
    pub yearly_tech_totals: Vec<YearTechTotals>,
    /// All matched records, when exactly one company matched
    pub full_records: Option<Dataset>,
    /// Set when the query matched nothing
    pub empty_reason: Option<EmptyReason>,
    #[serde(skip)]
    precision: usize,
}

impl IndexReport {
    /// Run a query and derive every report section from its result
    pub fn generate(
        engine: &IndexQueryEngine,
        filter: &QueryFilter,
        options: &ReportOptions,
    ) -> Self {
        let subset = engine.query(filter);
        let single_company = subset.distinct_company_count() == 1;

        let empty_reason = subset
            .is_empty()
            .then(|| empty_reason(engine.dataset(), filter));

        Self {
            filter: filter.clone(),
            company_name: single_company
                .then(|| subset.first().map(|r| r.company_name.clone()))
                .flatten(),
            summary: IndexQueryEngine::summarize(&subset),
            preview: subset.head(options.preview_rows),
            histogram: IndexQueryEngine::histogram(&subset, options.histogram_bins),
            year_stats: IndexQueryEngine::group_by_year(&subset),
            trend: IndexQueryEngine::trend(&subset),
            tech_summary: IndexQueryEngine::tech_summary(&subset),
            yearly_tech_totals: IndexQueryEngine::yearly_tech_totals(&subset),
            full_records: single_company.then(|| subset.clone()),
            empty_reason,
            precision: options.precision,
        }
    }

    /// Returns true if the query matched no records
    pub fn is_empty(&self) -> bool {
        self.summary.record_count == 0
    }

    /// Heading line naming the filter
    pub fn title(&self) -> String {
        let target = match (&self.company_name, self.filter.stock_code()) {
            (Some(name), Some(code)) => format!("{} ({})", name, code),
            (None, Some(code)) => code.to_string(),
            (Some(name), None) => name.clone(),
            (None, None) => "All companies".to_string(),
        };
        format!("Digital Transformation Index: {}, year {}", target, self.filter.year)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        let precision = self.precision;

        output.push_str(&self.title());
        output.push('\n');
        output.push_str(&double_separator(WIDTH));
        output.push('\n');

        if let Some(reason) = &self.empty_reason {
            output.push_str(&format!("{}\n", reason.message()));
            return output;
        }

        // Metrics
        let summary = &self.summary;
        output.push_str(&format!("Records:       {}\n", summary.record_count));
        output.push_str(&format!("Companies:     {}\n", summary.distinct_company_count));
        output.push_str(&format!(
            "Years:         {}\n",
            format_year_range(summary.year_range)
        ));
        output.push_str(&format!("Mean index:    {}\n", format_value(summary.mean, precision)));
        output.push_str(&format!("Max index:     {}\n", format_value(summary.max, precision)));
        output.push_str(&format!("Min index:     {}\n", format_value(summary.min, precision)));
        output.push_str(&format!(
            "Median index:  {}\n",
            format_value(summary.median, precision)
        ));
        output.push_str(&format!(
            "Std deviation: {}\n",
            format_value(summary.standard_deviation, precision)
        ));

        output.push_str(&section(
            &format!("Preview (first {} records)", self.preview.len()),
            WIDTH,
        ));
        output.push_str(&format_record_table(&self.preview, precision));
        output.push('\n');

        output.push_str(&section("Index Distribution", WIDTH));
        output.push_str(&self.format_histogram());

        output.push_str(&section("Statistics by Year", WIDTH));
        output.push_str(&format_year_stats_table(&self.year_stats, precision));
        output.push('\n');

        let trend_title = match self.trend.kind {
            TrendKind::Company => "Index Trend",
            TrendKind::Average => "Index Trend (yearly mean)",
        };
        output.push_str(&section(trend_title, WIDTH));
        output.push_str(&self.format_trend());

        output.push_str(&section("Keyword Frequency Statistics", WIDTH));
        output.push_str(&format_tech_summary_table(&self.tech_summary, precision));
        output.push('\n');

        output.push_str(&section("Technology Keywords by Year", WIDTH));
        output.push_str(&format_yearly_tech_table(&self.yearly_tech_totals));
        output.push('\n');

        if let Some(records) = &self.full_records {
            output.push_str(&section("Complete Data", WIDTH));
            output.push_str(&format_record_table(records, precision));
            output.push('\n');
        }

        output
    }

    fn format_histogram(&self) -> String {
        let max_count = self.histogram.iter().map(|b| b.count).max().unwrap_or(0);
        let mut output = String::new();
        for bin in &self.histogram {
            output.push_str(&format!(
                "{:>10} - {:<10} {} {}\n",
                format_value(Some(bin.lower), self.precision),
                format_value(Some(bin.upper), self.precision),
                format_bar(bin.count as f64, max_count as f64, BAR_WIDTH),
                bin.count
            ));
        }
        output
    }

    fn format_trend(&self) -> String {
        let max_value = self
            .trend
            .points
            .iter()
            .map(|p| p.value)
            .fold(0.0_f64, f64::max);
        let mut output = String::new();
        for point in &self.trend.points {
            output.push_str(&format!(
                "{:<6} {} {}\n",
                point.year,
                format_bar(point.value, max_value, BAR_WIDTH),
                format_value(Some(point.value), self.precision)
            ));
        }
        output
    }

    /// Export the per-year statistics to CSV
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> DtiResult<()> {
        self.write_year_stats(writer)
            .map_err(|e| DtiError::Export(e.to_string()))
    }

    fn write_year_stats<W: Write>(&self, writer: &mut W) -> csv::Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "Year",
            "Mean",
            "Median",
            "Max",
            "Min",
            "Std Dev",
            "Companies",
            "Records",
        ])?;

        let cell = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
        for year in &self.year_stats {
            csv.write_record([
                year.year.to_string(),
                cell(year.mean),
                cell(year.median),
                cell(year.max),
                cell(year.min),
                cell(year.standard_deviation),
                year.company_count.to_string(),
                year.record_count.to_string(),
            ])?;
        }

        csv.flush()?;
        Ok(())
    }
}

fn empty_reason(dataset: &Dataset, filter: &QueryFilter) -> EmptyReason {
    let Some(code) = filter.stock_code() else {
        return EmptyReason::NoData;
    };
    let known = dataset.iter().any(|r| r.stock_code == code);
    match (known, filter.year.year()) {
        (true, Some(year)) => EmptyReason::NoDataForYear {
            stock_code: code.to_string(),
            year,
        },
        _ => EmptyReason::UnknownStockCode {
            stock_code: code.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FrequencyColumn, Record, YearSelection};

    fn engine() -> IndexQueryEngine {
        IndexQueryEngine::new(Dataset::new(vec![
            Record::new("600000", "浦发银行", 2019)
                .with_index(0.12)
                .with_frequency(FrequencyColumn::Ai, 3),
            Record::new("600000", "浦发银行", 2020)
                .with_index(0.18)
                .with_frequency(FrequencyColumn::Ai, 5),
            Record::new("600001", "邯郸钢铁", 2020).with_index(0.30),
        ]))
    }

    #[test]
    fn test_single_company_report() {
        let report = IndexReport::generate(
            &engine(),
            &QueryFilter::for_stock("600000"),
            &ReportOptions::default(),
        );

        assert_eq!(report.company_name.as_deref(), Some("浦发银行"));
        assert_eq!(report.summary.record_count, 2);
        assert_eq!(report.full_records.as_ref().map(|d| d.len()), Some(2));
        assert_eq!(report.trend.kind, TrendKind::Company);
        assert!(report.empty_reason.is_none());

        let output = report.format_terminal();
        assert!(output.contains("浦发银行 (600000)"));
        assert!(output.contains("Mean index:    0.1500"));
        assert!(output.contains("Complete Data"));
    }

    #[test]
    fn test_multi_company_report_has_no_full_records() {
        let report = IndexReport::generate(
            &engine(),
            &QueryFilter::all().with_year(YearSelection::Year(2020)),
            &ReportOptions::default(),
        );

        assert!(report.company_name.is_none());
        assert!(report.full_records.is_none());
        assert_eq!(report.trend.kind, TrendKind::Average);
        assert!(!report.format_terminal().contains("Complete Data"));
    }

    #[test]
    fn test_preview_is_truncated() {
        let options = ReportOptions {
            preview_rows: 1,
            ..ReportOptions::default()
        };
        let report = IndexReport::generate(&engine(), &QueryFilter::all(), &options);
        assert_eq!(report.preview.len(), 1);
    }

    #[test]
    fn test_unknown_stock_code() {
        let report = IndexReport::generate(
            &engine(),
            &QueryFilter::for_stock("999999"),
            &ReportOptions::default(),
        );

        assert!(report.is_empty());
        assert_eq!(
            report.empty_reason,
            Some(EmptyReason::UnknownStockCode {
                stock_code: "999999".into()
            })
        );
        assert!(report
            .format_terminal()
            .contains("No data found for stock code 999999"));
    }

    #[test]
    fn test_no_data_for_year() {
        let report = IndexReport::generate(
            &engine(),
            &QueryFilter::for_stock("600001").with_year(YearSelection::Year(2019)),
            &ReportOptions::default(),
        );

        assert_eq!(
            report.empty_reason,
            Some(EmptyReason::NoDataForYear {
                stock_code: "600001".into(),
                year: 2019
            })
        );
        assert!(report
            .format_terminal()
            .contains("No data found for 600001 in 2019"));
    }

    #[test]
    fn test_options_cap_histogram_bins() {
        let settings = Settings {
            histogram_bins: 1_000_000_000,
            ..Settings::default()
        };
        assert_eq!(ReportOptions::from(&settings).histogram_bins, MAX_HISTOGRAM_BINS);

        let settings = Settings {
            histogram_bins: 0,
            ..Settings::default()
        };
        assert_eq!(ReportOptions::from(&settings).histogram_bins, 1);
    }

    #[test]
    fn test_precision_from_options() {
        let options = ReportOptions {
            precision: 2,
            ..ReportOptions::default()
        };
        let report = IndexReport::generate(&engine(), &QueryFilter::for_stock("600000"), &options);
        assert!(report.format_terminal().contains("Mean index:    0.15\n"));
    }

    #[test]
    fn test_export_csv() {
        let report = IndexReport::generate(
            &engine(),
            &QueryFilter::all(),
            &ReportOptions::default(),
        );

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Year,Mean"));
        assert!(lines[1].starts_with("2019,0.12,"));
        assert!(lines[2].ends_with(",2,2"));
    }
}
