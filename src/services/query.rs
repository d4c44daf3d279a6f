//! Index query engine
//!
//! Answers filter and aggregation queries over the loaded dataset. The
//! dataset is never mutated: every operation takes a dataset (the full one or
//! a previously filtered subset) and returns freshly derived values, so the
//! same engine can serve any number of front-ends.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::debug;

use super::stats;
use crate::error::DtiResult;
use crate::models::{
    CompanyEntry, Dataset, DatasetOverview, DimensionStats, DistinctField, FrequencyColumn,
    HistogramBin, QueryFilter, Record, SummaryStats, TechSummary, Trend, TrendKind, TrendPoint,
    YearSelection, YearStats, YearTechTotals,
};
use crate::storage::{load_dataset, LoadOptions};

/// Upper bound on the number of histogram bins
pub const MAX_HISTOGRAM_BINS: usize = 200;

/// Query engine over an immutable dataset
#[derive(Debug, Clone)]
pub struct IndexQueryEngine {
    dataset: Dataset,
}

impl IndexQueryEngine {
    /// Create an engine over an already loaded dataset
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    /// Load the dataset from a file and build an engine over it
    pub fn load(path: &Path, options: &LoadOptions) -> DtiResult<Self> {
        Ok(Self::new(load_dataset(path, options)?))
    }

    /// The full dataset
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Apply a filter to the full dataset
    pub fn query(&self, filter: &QueryFilter) -> Dataset {
        let subset = Self::filter(&self.dataset, filter.stock_code(), filter.year);
        debug!(
            stock_code = filter.stock_code().unwrap_or("*"),
            year = %filter.year,
            matched = subset.len(),
            "query"
        );
        subset
    }

    /// Restrict a dataset to a stock code and/or year
    ///
    /// A blank stock code means no restriction. No match yields an empty
    /// dataset; record order is preserved.
    pub fn filter(dataset: &Dataset, stock_code: Option<&str>, year: YearSelection) -> Dataset {
        let stock_code = stock_code.map(str::trim).filter(|code| !code.is_empty());
        if stock_code.is_none() && year == YearSelection::All {
            return dataset.clone();
        }
        dataset.filtered(|record| {
            stock_code.map_or(true, |code| record.stock_code == code) && year.matches(record.year)
        })
    }

    /// Summary statistics of the transformation index
    pub fn summarize(subset: &Dataset) -> SummaryStats {
        let values = index_values(subset.iter());

        SummaryStats {
            record_count: subset.len(),
            distinct_company_count: subset.distinct_company_count(),
            year_range: year_range(subset),
            mean: stats::mean(&values),
            max: stats::max(&values),
            min: stats::min(&values),
            median: stats::median(&values),
            standard_deviation: stats::sample_std(&values),
        }
    }

    /// Per-year index statistics, ascending by year
    pub fn group_by_year(subset: &Dataset) -> Vec<YearStats> {
        group_by_year(subset)
            .into_iter()
            .map(|(year, records)| {
                let values = index_values(records.iter().copied());
                YearStats {
                    year,
                    mean: stats::mean(&values),
                    median: stats::median(&values),
                    max: stats::max(&values),
                    min: stats::min(&values),
                    standard_deviation: stats::sample_std(&values),
                    company_count: values.len(),
                    record_count: records.len(),
                }
            })
            .collect()
    }

    /// Sum, mean, max and min of each frequency column
    pub fn tech_summary(subset: &Dataset) -> TechSummary {
        FrequencyColumn::ALL
            .into_iter()
            .map(|column| {
                let values: Vec<u64> = subset.iter().map(|r| r.frequency(column)).collect();
                let sum: u64 = values.iter().sum();
                let dimension = DimensionStats {
                    sum,
                    mean: (!values.is_empty()).then(|| sum as f64 / values.len() as f64),
                    max: values.iter().copied().max(),
                    min: values.iter().copied().min(),
                };
                (column, dimension)
            })
            .collect()
    }

    /// Index trend over years
    ///
    /// One company: its raw values in ascending year order. Several
    /// companies: the per-year mean.
    pub fn trend(subset: &Dataset) -> Trend {
        if subset.distinct_company_count() == 1 {
            let mut records: Vec<&Record> = subset.iter().collect();
            records.sort_by_key(|r| r.year);
            let points = records
                .into_iter()
                .filter_map(|r| {
                    r.index_value().map(|value| TrendPoint {
                        year: r.year,
                        value,
                    })
                })
                .collect();
            return Trend {
                kind: TrendKind::Company,
                points,
            };
        }

        let points = group_by_year(subset)
            .into_iter()
            .filter_map(|(year, records)| {
                stats::mean(&index_values(records.into_iter()))
                    .map(|value| TrendPoint { year, value })
            })
            .collect();

        Trend {
            kind: TrendKind::Average,
            points,
        }
    }

    /// Distinct values of a field, for populating selection lists
    ///
    /// Stock codes and company names ascend; years descend.
    pub fn list_distinct(dataset: &Dataset, field: DistinctField) -> Vec<String> {
        match field {
            DistinctField::StockCode => distinct_strings(dataset.iter().map(|r| &r.stock_code)),
            DistinctField::CompanyName => {
                distinct_strings(dataset.iter().map(|r| &r.company_name))
            }
            DistinctField::Year => Self::distinct_years(dataset)
                .into_iter()
                .map(|year| year.to_string())
                .collect(),
        }
    }

    /// Distinct years, most recent first
    pub fn distinct_years(dataset: &Dataset) -> Vec<i32> {
        let years: BTreeSet<i32> = dataset.iter().map(|r| r.year).collect();
        years.into_iter().rev().collect()
    }

    /// Distinct (stock code, company name) pairs sorted by stock code
    pub fn companies(dataset: &Dataset) -> Vec<CompanyEntry> {
        let entries: BTreeSet<CompanyEntry> = dataset
            .iter()
            .map(|r| CompanyEntry {
                stock_code: r.stock_code.clone(),
                company_name: r.company_name.clone(),
            })
            .collect();
        entries.into_iter().collect()
    }

    /// Whole-dataset totals
    pub fn overview(dataset: &Dataset) -> DatasetOverview {
        DatasetOverview {
            company_count: dataset.distinct_company_count(),
            year_range: year_range(dataset),
            record_count: dataset.len(),
        }
    }

    /// Equal-width histogram of the non-missing index values
    pub fn histogram(subset: &Dataset, bins: usize) -> Vec<HistogramBin> {
        let values = index_values(subset.iter());
        let (Some(lo), Some(hi)) = (stats::min(&values), stats::max(&values)) else {
            return Vec::new();
        };

        if lo == hi {
            return vec![HistogramBin {
                lower: lo,
                upper: hi,
                count: values.len(),
            }];
        }

        let bins = bins.clamp(1, MAX_HISTOGRAM_BINS);
        // Halved so that the span of any two finite values stays finite
        let half_span = hi * 0.5 - lo * 0.5;
        let mut counts = vec![0usize; bins];
        for value in &values {
            let fraction = (value * 0.5 - lo * 0.5) / half_span;
            let idx = ((fraction * bins as f64).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let edge = |i: usize| {
            let t = i as f64 / bins as f64;
            lo * (1.0 - t) + hi * t
        };
        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: if i == 0 { lo } else { edge(i) },
                upper: if i + 1 == bins { hi } else { edge(i + 1) },
                count,
            })
            .collect()
    }

    /// Per-year sums of the four technology columns, ascending by year
    pub fn yearly_tech_totals(subset: &Dataset) -> Vec<YearTechTotals> {
        group_by_year(subset)
            .into_iter()
            .map(|(year, records)| YearTechTotals {
                year,
                totals: FrequencyColumn::TECHNOLOGY
                    .into_iter()
                    .map(|column| (column, records.iter().map(|r| r.frequency(column)).sum()))
                    .collect(),
            })
            .collect()
    }
}

fn index_values<'a, I>(records: I) -> Vec<f64>
where
    I: Iterator<Item = &'a Record>,
{
    stats::finite_values(records.filter_map(Record::index_value))
}

fn group_by_year(subset: &Dataset) -> BTreeMap<i32, Vec<&Record>> {
    let mut groups: BTreeMap<i32, Vec<&Record>> = BTreeMap::new();
    for record in subset.iter() {
        groups.entry(record.year).or_default().push(record);
    }
    groups
}

fn year_range(dataset: &Dataset) -> Option<(i32, i32)> {
    let min = dataset.iter().map(|r| r.year).min()?;
    let max = dataset.iter().map(|r| r.year).max()?;
    Some((min, max))
}

fn distinct_strings<'a, I>(values: I) -> Vec<String>
where
    I: Iterator<Item = &'a String>,
{
    let set: BTreeSet<&String> = values.collect();
    set.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn scenario() -> Dataset {
        Dataset::new(vec![
            Record::new("600000", "Pudong Bank", 2019).with_index(0.12),
            Record::new("600000", "Pudong Bank", 2020).with_index(0.18),
            Record::new("600001", "Handan Steel", 2020).with_index(0.30),
        ])
    }

    #[test]
    fn test_filter_by_stock_code() {
        let subset = IndexQueryEngine::filter(&scenario(), Some("600000"), YearSelection::All);
        assert_eq!(subset.len(), 2);

        let stats = IndexQueryEngine::summarize(&subset);
        assert_eq!(stats.record_count, 2);
        assert!(approx(stats.mean.unwrap(), 0.15));
        assert_eq!(stats.max, Some(0.18));
        assert_eq!(stats.min, Some(0.12));
        assert_eq!(stats.year_range, Some((2019, 2020)));

        let trend = IndexQueryEngine::trend(&subset);
        assert_eq!(trend.kind, TrendKind::Company);
        assert_eq!(trend.values(), vec![0.12, 0.18]);
    }

    #[test]
    fn test_filter_by_year_across_companies() {
        let subset = IndexQueryEngine::filter(&scenario(), None, YearSelection::Year(2020));
        assert_eq!(subset.len(), 2);
        assert_eq!(IndexQueryEngine::summarize(&subset).distinct_company_count, 2);

        let trend = IndexQueryEngine::trend(&subset);
        assert_eq!(trend.kind, TrendKind::Average);
        assert_eq!(trend.points.len(), 1);
        assert_eq!(trend.points[0].year, 2020);
        assert!(approx(trend.points[0].value, 0.24));
    }

    #[test]
    fn test_unknown_stock_code_gives_empty_summary() {
        let subset = IndexQueryEngine::filter(&scenario(), Some("999999"), YearSelection::All);
        assert!(subset.is_empty());

        let stats = IndexQueryEngine::summarize(&subset);
        assert_eq!(stats, SummaryStats::default());
        assert_eq!(stats.record_count, 0);
        assert_eq!(stats.year_range, None);
        assert_eq!(stats.mean, None);
        assert_eq!(stats.standard_deviation, None);
    }

    #[test]
    fn test_stock_code_is_compared_as_text() {
        let data = Dataset::new(vec![
            Record::new("000001", "Ping An Bank", 2020).with_index(0.2),
            Record::new("1", "Other", 2020).with_index(0.4),
        ]);
        let subset = IndexQueryEngine::filter(&data, Some("000001"), YearSelection::All);
        assert_eq!(subset.len(), 1);
        assert_eq!(subset[0].company_name, "Ping An Bank");
    }

    #[test]
    fn test_filter_is_idempotent() {
        let data = scenario();
        let once = IndexQueryEngine::filter(&data, Some("600000"), YearSelection::All);
        let twice = IndexQueryEngine::filter(&once, Some("600000"), YearSelection::All);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_code_and_year_without_match() {
        let subset =
            IndexQueryEngine::filter(&scenario(), Some("600001"), YearSelection::Year(2019));
        assert!(subset.is_empty());
    }

    #[test]
    fn test_missing_index_values_are_skipped() {
        let data = Dataset::new(vec![
            Record::new("600000", "Pudong Bank", 2019).with_index(0.1),
            Record::new("600000", "Pudong Bank", 2020),
            Record::new("600000", "Pudong Bank", 2021).with_index(f64::NAN),
            Record::new("600000", "Pudong Bank", 2022).with_index(0.3),
        ]);

        let stats = IndexQueryEngine::summarize(&data);
        assert_eq!(stats.record_count, 4);
        assert!(approx(stats.mean.unwrap(), 0.2));
        assert!(approx(stats.median.unwrap(), 0.2));
        assert_eq!(stats.min, Some(0.1));

        let trend = IndexQueryEngine::trend(&data);
        assert_eq!(trend.points.len(), 2);
    }

    #[test]
    fn test_all_missing_index_leaves_stats_unset() {
        let data = Dataset::new(vec![Record::new("600000", "Pudong Bank", 2019)]);
        let stats = IndexQueryEngine::summarize(&data);
        assert_eq!(stats.record_count, 1);
        assert_eq!(stats.distinct_company_count, 1);
        assert_eq!(stats.year_range, Some((2019, 2019)));
        assert_eq!(stats.mean, None);
        assert_eq!(stats.max, None);
    }

    #[test]
    fn test_std_needs_two_values() {
        let subset = IndexQueryEngine::filter(&scenario(), Some("600001"), YearSelection::All);
        assert_eq!(IndexQueryEngine::summarize(&subset).standard_deviation, None);

        let stats = IndexQueryEngine::summarize(&scenario());
        assert!(stats.standard_deviation.unwrap() > 0.0);
    }

    #[test]
    fn test_max_mean_min_ordering() {
        let data = Dataset::new(
            [0.5, 0.01, 0.33, 0.9, 0.27, 0.27]
                .iter()
                .enumerate()
                .map(|(i, v)| Record::new(format!("60000{}", i), "Co", 2015 + i as i32).with_index(*v))
                .collect(),
        );
        let stats = IndexQueryEngine::summarize(&data);
        assert!(stats.max.unwrap() >= stats.mean.unwrap());
        assert!(stats.mean.unwrap() >= stats.min.unwrap());
    }

    #[test]
    fn test_group_by_year_partitions_ascending() {
        let data = Dataset::new(vec![
            Record::new("600001", "Handan Steel", 2021).with_index(0.4),
            Record::new("600000", "Pudong Bank", 2019).with_index(0.12),
            Record::new("600000", "Pudong Bank", 2020).with_index(0.18),
            Record::new("600001", "Handan Steel", 2020),
            Record::new("600002", "Qilu", 2020).with_index(0.30),
        ]);

        let groups = IndexQueryEngine::group_by_year(&data);
        let years: Vec<i32> = groups.iter().map(|g| g.year).collect();
        assert_eq!(years, vec![2019, 2020, 2021]);

        let total: usize = groups.iter().map(|g| g.record_count).sum();
        assert_eq!(total, data.len());

        let y2020 = &groups[1];
        assert_eq!(y2020.record_count, 3);
        assert_eq!(y2020.company_count, 2);
        assert!(approx(y2020.mean.unwrap(), 0.24));
        assert!(approx(y2020.median.unwrap(), 0.24));
        assert_eq!(groups[0].standard_deviation, None);
    }

    #[test]
    fn test_group_by_year_empty() {
        assert!(IndexQueryEngine::group_by_year(&Dataset::empty()).is_empty());
    }

    #[test]
    fn test_tech_summary() {
        let data = Dataset::new(vec![
            Record::new("600000", "Pudong Bank", 2019).with_frequency(FrequencyColumn::Ai, 3),
            Record::new("600000", "Pudong Bank", 2020).with_frequency(FrequencyColumn::Ai, 5),
        ]);

        let summary = IndexQueryEngine::tech_summary(&data);
        assert_eq!(summary.len(), 5);
        let ai = summary[&FrequencyColumn::Ai];
        assert_eq!(ai.sum, 8);
        assert_eq!(ai.mean, Some(4.0));
        assert_eq!(ai.max, Some(5));
        assert_eq!(ai.min, Some(3));

        let cloud = summary[&FrequencyColumn::Cloud];
        assert_eq!(cloud.sum, 0);
        assert_eq!(cloud.max, Some(0));
    }

    #[test]
    fn test_tech_summary_empty() {
        let summary = IndexQueryEngine::tech_summary(&Dataset::empty());
        let ai = summary[&FrequencyColumn::Ai];
        assert_eq!(ai.sum, 0);
        assert_eq!(ai.mean, None);
        assert_eq!(ai.max, None);
    }

    #[test]
    fn test_trend_single_company_sorted_by_year() {
        let data = Dataset::new(vec![
            Record::new("600000", "Pudong Bank", 2021).with_index(0.3),
            Record::new("600000", "Pudong Bank", 2019).with_index(0.1),
            Record::new("600000", "Pudong Bank", 2020).with_index(0.2),
        ]);
        let trend = IndexQueryEngine::trend(&data);
        let years: Vec<i32> = trend.points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2019, 2020, 2021]);
        assert_eq!(trend.values(), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_trend_single_company_keeps_duplicates() {
        let data = Dataset::new(vec![
            Record::new("600000", "Pudong Bank", 2020).with_index(0.2),
            Record::new("600000", "Pudong Bank", 2020).with_index(0.4),
        ]);
        assert_eq!(IndexQueryEngine::trend(&data).points.len(), 2);
    }

    #[test]
    fn test_trend_empty() {
        let trend = IndexQueryEngine::trend(&Dataset::empty());
        assert!(trend.points.is_empty());
    }

    #[test]
    fn test_list_distinct() {
        let data = Dataset::new(vec![
            Record::new("600001", "Handan Steel", 2019),
            Record::new("000001", "Ping An Bank", 2021),
            Record::new("600001", "Handan Steel", 2020),
        ]);

        assert_eq!(
            IndexQueryEngine::list_distinct(&data, DistinctField::StockCode),
            vec!["000001", "600001"]
        );
        assert_eq!(
            IndexQueryEngine::list_distinct(&data, DistinctField::Year),
            vec!["2021", "2020", "2019"]
        );
        assert_eq!(
            IndexQueryEngine::list_distinct(&data, DistinctField::CompanyName),
            vec!["Handan Steel", "Ping An Bank"]
        );
    }

    #[test]
    fn test_companies_and_overview() {
        let data = scenario();
        let companies = IndexQueryEngine::companies(&data);
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].stock_code, "600000");
        assert_eq!(companies[1].company_name, "Handan Steel");

        let overview = IndexQueryEngine::overview(&data);
        assert_eq!(overview.company_count, 2);
        assert_eq!(overview.year_range, Some((2019, 2020)));
        assert_eq!(overview.record_count, 3);
    }

    #[test]
    fn test_histogram() {
        let data = Dataset::new(
            [0.0, 0.1, 0.2, 0.5, 1.0]
                .iter()
                .map(|v| Record::new("600000", "Pudong Bank", 2020).with_index(*v))
                .collect(),
        );

        let bins = IndexQueryEngine::histogram(&data, 4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
        assert_eq!(bins[0].count, 3);
        assert_eq!(bins[3].count, 1);
        assert_eq!(bins[3].upper, 1.0);
    }

    #[test]
    fn test_histogram_extreme_range_stays_finite() {
        let data = Dataset::new(vec![
            Record::new("600000", "Pudong Bank", 2019).with_index(-1e308),
            Record::new("600000", "Pudong Bank", 2020).with_index(1e308),
        ]);

        let bins = IndexQueryEngine::histogram(&data, 2);
        assert_eq!(bins.len(), 2);
        assert!(bins.iter().all(|b| b.lower.is_finite() && b.upper.is_finite()));
        assert_eq!(bins[0].lower, -1e308);
        assert_eq!(bins[0].upper, 0.0);
        assert_eq!(bins[1].upper, 1e308);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].count, 1);
    }

    #[test]
    fn test_histogram_bin_count_is_capped() {
        let bins = IndexQueryEngine::histogram(&scenario(), usize::MAX);
        assert_eq!(bins.len(), MAX_HISTOGRAM_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn test_histogram_degenerate_inputs() {
        assert!(IndexQueryEngine::histogram(&Dataset::empty(), 10).is_empty());

        let same = Dataset::new(vec![
            Record::new("600000", "Pudong Bank", 2019).with_index(0.2),
            Record::new("600000", "Pudong Bank", 2020).with_index(0.2),
        ]);
        let bins = IndexQueryEngine::histogram(&same, 10);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 2);

        let bins = IndexQueryEngine::histogram(&scenario(), 0);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn test_yearly_tech_totals() {
        let data = Dataset::new(vec![
            Record::new("600000", "Pudong Bank", 2020)
                .with_frequency(FrequencyColumn::Ai, 2)
                .with_frequency(FrequencyColumn::DigitalTech, 9),
            Record::new("600001", "Handan Steel", 2020).with_frequency(FrequencyColumn::Ai, 5),
            Record::new("600000", "Pudong Bank", 2019).with_frequency(FrequencyColumn::Cloud, 1),
        ]);

        let totals = IndexQueryEngine::yearly_tech_totals(&data);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].year, 2019);
        assert_eq!(totals[0].totals[&FrequencyColumn::Cloud], 1);
        assert_eq!(totals[1].totals[&FrequencyColumn::Ai], 7);
        assert!(!totals[1].totals.contains_key(&FrequencyColumn::DigitalTech));
    }

    #[test]
    fn test_query_uses_filter() {
        let engine = IndexQueryEngine::new(scenario());
        let filter = QueryFilter::for_stock(" 600000 ").with_year(YearSelection::Year(2020));
        let subset = engine.query(&filter);
        assert_eq!(subset.len(), 1);
        assert_eq!(engine.dataset().len(), 3);
    }
}
