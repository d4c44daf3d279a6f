//! Query parameters
//!
//! A query is a stock code (optional) plus a year selection. The "all years"
//! sentinel is part of the type rather than a magic string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Year selector value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum YearSelection {
    /// No year restriction
    #[default]
    All,
    /// A single fiscal year
    Year(i32),
}

impl YearSelection {
    /// Parse from user input: "all", "全部", or an integer year
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "all" | "全部" | "" => Some(Self::All),
            other => other.parse::<i32>().ok().map(Self::Year),
        }
    }

    /// Returns true if a record from `year` passes this selection
    pub fn matches(&self, year: i32) -> bool {
        match self {
            Self::All => true,
            Self::Year(selected) => *selected == year,
        }
    }

    /// The selected year, if any
    pub fn year(&self) -> Option<i32> {
        match self {
            Self::All => None,
            Self::Year(year) => Some(*year),
        }
    }
}

impl From<Option<i32>> for YearSelection {
    fn from(year: Option<i32>) -> Self {
        year.map_or(Self::All, Self::Year)
    }
}

impl fmt::Display for YearSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Year(year) => write!(f, "{}", year),
        }
    }
}

/// Filter applied to a dataset
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Exact stock code to match (trimmed; empty means no restriction)
    pub stock_code: Option<String>,
    /// Year restriction
    pub year: YearSelection,
}

impl QueryFilter {
    /// Filter matching everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter on a stock code across all years
    pub fn for_stock(stock_code: impl Into<String>) -> Self {
        Self {
            stock_code: Some(stock_code.into()),
            year: YearSelection::All,
        }
    }

    /// Restrict to a year
    pub fn with_year(mut self, year: YearSelection) -> Self {
        self.year = year;
        self
    }

    /// The normalized stock code, if one is set and non-blank
    pub fn stock_code(&self) -> Option<&str> {
        self.stock_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    /// Returns true if the filter restricts nothing
    pub fn is_unrestricted(&self) -> bool {
        self.stock_code().is_none() && self.year == YearSelection::All
    }
}

/// Record fields that can populate a selection list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinctField {
    /// Stock codes, ascending
    StockCode,
    /// Company names, ascending
    CompanyName,
    /// Years, descending
    Year,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year_selection() {
        assert_eq!(YearSelection::parse("all"), Some(YearSelection::All));
        assert_eq!(YearSelection::parse("ALL"), Some(YearSelection::All));
        assert_eq!(YearSelection::parse("全部"), Some(YearSelection::All));
        assert_eq!(YearSelection::parse(" 2020 "), Some(YearSelection::Year(2020)));
        assert_eq!(YearSelection::parse("twenty"), None);
    }

    #[test]
    fn test_year_selection_matches() {
        assert!(YearSelection::All.matches(1999));
        assert!(YearSelection::Year(2020).matches(2020));
        assert!(!YearSelection::Year(2020).matches(2019));
    }

    #[test]
    fn test_blank_stock_code_is_unrestricted() {
        let filter = QueryFilter::for_stock("   ");
        assert_eq!(filter.stock_code(), None);
        assert!(filter.is_unrestricted());

        let filter = QueryFilter::for_stock(" 600000 ");
        assert_eq!(filter.stock_code(), Some("600000"));
    }

    #[test]
    fn test_display() {
        assert_eq!(YearSelection::All.to_string(), "All");
        assert_eq!(YearSelection::Year(2021).to_string(), "2021");
    }
}
