//! Table rendering for query results
//!
//! Builds `tabled` tables for records, per-year statistics, keyword
//! frequency statistics and the company list.

use tabled::builder::Builder;
use tabled::settings::Style;

use super::format::{format_count, format_value};
use crate::models::{
    CompanyEntry, Dataset, FrequencyColumn, TechSummary, YearStats, YearTechTotals,
};

fn header(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Year and frequency columns plus scores, as in the detail view
pub fn format_record_table(records: &Dataset, precision: usize) -> String {
    let mut builder = Builder::default();
    let mut header = vec!["Year".to_string(), "Code".to_string(), "Company".to_string()];
    header.extend(FrequencyColumn::ALL.iter().map(|c| c.to_string()));
    header.extend(self::header(&["Tech Dim", "App Dim", "Words", "Index"]));
    builder.push_record(header);

    for record in records.iter() {
        let mut row = vec![
            record.year.to_string(),
            record.stock_code.clone(),
            record.company_name.clone(),
        ];
        row.extend(FrequencyColumn::ALL.iter().map(|c| record.frequency(*c).to_string()));
        row.push(format_value(record.tech_dimension, precision));
        row.push(format_value(record.application_dimension, precision));
        row.push(record.total_word_count.to_string());
        row.push(format_value(record.index_value(), precision));
        builder.push_record(row);
    }

    render(builder)
}

/// Per-year index statistics
pub fn format_year_stats_table(stats: &[YearStats], precision: usize) -> String {
    let mut builder = Builder::default();
    builder.push_record(header(&[
        "Year", "Mean", "Median", "Max", "Min", "Std Dev", "Companies",
    ]));

    for year in stats {
        builder.push_record([
            year.year.to_string(),
            format_value(year.mean, precision),
            format_value(year.median, precision),
            format_value(year.max, precision),
            format_value(year.min, precision),
            format_value(year.standard_deviation, precision),
            year.company_count.to_string(),
        ]);
    }

    render(builder)
}

/// Sum / mean / max / min of each frequency column
pub fn format_tech_summary_table(summary: &TechSummary, precision: usize) -> String {
    let mut builder = Builder::default();
    builder.push_record(header(&["Keyword", "Total", "Mean", "Max", "Min"]));

    for (column, stats) in summary {
        builder.push_record([
            column.to_string(),
            stats.sum.to_string(),
            format_value(stats.mean, precision),
            format_count(stats.max),
            format_count(stats.min),
        ]);
    }

    render(builder)
}

/// Technology keyword totals per year
pub fn format_yearly_tech_table(totals: &[YearTechTotals]) -> String {
    let mut builder = Builder::default();
    let mut header = vec!["Year".to_string()];
    header.extend(FrequencyColumn::TECHNOLOGY.iter().map(|c| c.to_string()));
    builder.push_record(header);

    for year in totals {
        let mut row = vec![year.year.to_string()];
        row.extend(
            FrequencyColumn::TECHNOLOGY
                .iter()
                .map(|c| year.totals.get(c).copied().unwrap_or(0).to_string()),
        );
        builder.push_record(row);
    }

    render(builder)
}

/// Stock code / company name list
pub fn format_company_table(companies: &[CompanyEntry]) -> String {
    if companies.is_empty() {
        return "No companies found.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(header(&["Stock Code", "Company"]));
    for company in companies {
        builder.push_record([company.stock_code.clone(), company.company_name.clone()]);
    }

    render(builder)
}
