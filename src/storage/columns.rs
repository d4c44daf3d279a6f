//! Column layout of the annual report spreadsheet
//!
//! Maps header cells to record fields. Each field is found either by its
//! Chinese header from the source spreadsheet or by its English field name.

use std::fmt;

use crate::error::{DtiError, DtiResult};
use crate::models::FrequencyColumn;

/// A record field backed by one spreadsheet column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    StockCode,
    CompanyName,
    Year,
    Frequency(FrequencyColumn),
    TechDimension,
    ApplicationDimension,
    TotalWordCount,
    TransformationIndex,
}

impl Field {
    /// All fields in source column order
    pub const ALL: [Field; 12] = [
        Self::StockCode,
        Self::CompanyName,
        Self::Year,
        Self::Frequency(FrequencyColumn::Ai),
        Self::Frequency(FrequencyColumn::BigData),
        Self::Frequency(FrequencyColumn::Cloud),
        Self::Frequency(FrequencyColumn::Blockchain),
        Self::Frequency(FrequencyColumn::DigitalTech),
        Self::TechDimension,
        Self::ApplicationDimension,
        Self::TotalWordCount,
        Self::TransformationIndex,
    ];

    /// Header used in the source spreadsheet
    pub fn header(&self) -> &'static str {
        match self {
            Self::StockCode => "股票代码",
            Self::CompanyName => "企业名称",
            Self::Year => "年份",
            Self::Frequency(column) => column.header(),
            Self::TechDimension => "技术维度",
            Self::ApplicationDimension => "应用维度",
            Self::TotalWordCount => "词总",
            Self::TransformationIndex => "数字化转型指数",
        }
    }

    /// English alias accepted in place of the header
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::StockCode => "stock_code",
            Self::CompanyName => "company_name",
            Self::Year => "year",
            Self::Frequency(column) => column.field_name(),
            Self::TechDimension => "tech_dimension",
            Self::ApplicationDimension => "application_dimension",
            Self::TotalWordCount => "total_word_count",
            Self::TransformationIndex => "transformation_index",
        }
    }

    /// Returns true if a header cell names this field
    pub fn matches_header(&self, header: &str) -> bool {
        let header = normalize_header(header);
        header == self.header() || header.eq_ignore_ascii_case(self.field_name())
    }

    fn ordinal(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// Strip whitespace and a UTF-8 byte order mark
fn normalize_header(header: &str) -> &str {
    header.trim().trim_start_matches('\u{feff}').trim()
}

/// Positions of every field in a header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    positions: [usize; 12],
}

impl ColumnLayout {
    /// Resolve field positions from a header row
    ///
    /// Extra columns are ignored. When a field appears more than once the
    /// first occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns a data load error listing every required field that has no
    /// matching header.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> DtiResult<Self> {
        let mut positions = [0usize; 12];
        let mut missing = Vec::new();

        for field in Field::ALL {
            match headers.iter().position(|h| field.matches_header(h.as_ref())) {
                Some(idx) => positions[field.ordinal()] = idx,
                None => missing.push(field.header()),
            }
        }

        if !missing.is_empty() {
            return Err(DtiError::missing_columns(&missing));
        }

        Ok(Self { positions })
    }

    /// Column index of a field
    pub fn position(&self, field: Field) -> usize {
        self.positions[field.ordinal()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chinese_headers() -> Vec<String> {
        Field::ALL.iter().map(|f| f.header().to_string()).collect()
    }

    #[test]
    fn test_resolve_chinese_headers() {
        let layout = ColumnLayout::from_headers(&chinese_headers()).unwrap();
        assert_eq!(layout.position(Field::StockCode), 0);
        assert_eq!(layout.position(Field::TransformationIndex), 11);
        assert_eq!(
            layout.position(Field::Frequency(FrequencyColumn::Cloud)),
            5
        );
    }

    #[test]
    fn test_resolve_english_aliases_any_order() {
        let mut headers: Vec<String> = Field::ALL
            .iter()
            .map(|f| f.field_name().to_uppercase())
            .collect();
        headers.reverse();
        headers.insert(0, "extra".to_string());

        let layout = ColumnLayout::from_headers(&headers).unwrap();
        assert_eq!(layout.position(Field::TransformationIndex), 1);
        assert_eq!(layout.position(Field::StockCode), 12);
    }

    #[test]
    fn test_headers_are_trimmed() {
        let mut headers = chinese_headers();
        headers[0] = "\u{feff}股票代码 ".to_string();
        headers[2] = "  年份".to_string();
        assert!(ColumnLayout::from_headers(&headers).is_ok());
    }

    #[test]
    fn test_missing_columns_reported() {
        let headers: Vec<String> = chinese_headers()
            .into_iter()
            .filter(|h| h != "年份" && h != "词总")
            .collect();

        let err = ColumnLayout::from_headers(&headers).unwrap_err();
        assert!(err.is_data_load());
        let message = err.to_string();
        assert!(message.contains("年份"));
        assert!(message.contains("词总"));
    }
}
