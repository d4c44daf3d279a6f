//! CLI commands that describe the loaded dataset

use crate::display::{format_company_table, format_year_range};
use crate::error::DtiResult;
use crate::models::{CompanyEntry, DistinctField};
use crate::services::IndexQueryEngine;

/// Keep companies whose code or name contains `search` (case-insensitive)
pub fn search_companies(companies: Vec<CompanyEntry>, search: Option<&str>) -> Vec<CompanyEntry> {
    let Some(needle) = search.map(str::trim).filter(|s| !s.is_empty()) else {
        return companies;
    };
    let needle = needle.to_lowercase();
    companies
        .into_iter()
        .filter(|c| {
            c.stock_code.to_lowercase().contains(&needle)
                || c.company_name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// List stock codes and company names
pub fn handle_companies_command(engine: &IndexQueryEngine, search: Option<String>) -> DtiResult<()> {
    let companies = search_companies(
        IndexQueryEngine::companies(engine.dataset()),
        search.as_deref(),
    );
    println!("{}", format_company_table(&companies));
    if !companies.is_empty() {
        println!("{} companies", companies.len());
    }
    Ok(())
}

/// List the distinct years, most recent first
pub fn handle_years_command(engine: &IndexQueryEngine) -> DtiResult<()> {
    for year in IndexQueryEngine::list_distinct(engine.dataset(), DistinctField::Year) {
        println!("{}", year);
    }
    Ok(())
}

/// Print dataset totals
pub fn handle_overview_command(engine: &IndexQueryEngine) -> DtiResult<()> {
    let overview = IndexQueryEngine::overview(engine.dataset());
    println!("Dataset Overview");
    println!("================");
    println!("Companies: {}", overview.company_count);
    println!("Years:     {}", format_year_range(overview.year_range));
    println!("Records:   {}", overview.record_count);
    Ok(())
}
