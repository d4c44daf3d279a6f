//! Annual report record model
//!
//! One company-year observation from the text-mining spreadsheet.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keyword frequency columns mined from annual report text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyColumn {
    /// Artificial intelligence
    Ai,
    /// Big data
    BigData,
    /// Cloud computing
    Cloud,
    /// Blockchain
    Blockchain,
    /// Generic "digital technology application"
    DigitalTech,
}

impl FrequencyColumn {
    /// All frequency columns in canonical order
    pub const ALL: [FrequencyColumn; 5] = [
        Self::Ai,
        Self::BigData,
        Self::Cloud,
        Self::Blockchain,
        Self::DigitalTech,
    ];

    /// The four technology columns compared year by year
    pub const TECHNOLOGY: [FrequencyColumn; 4] =
        [Self::Ai, Self::BigData, Self::Cloud, Self::Blockchain];

    /// Column header used in the source spreadsheet
    pub fn header(&self) -> &'static str {
        match self {
            Self::Ai => "人工智能词频数",
            Self::BigData => "大数据词频数",
            Self::Cloud => "云计算词频数",
            Self::Blockchain => "区块链词频数",
            Self::DigitalTech => "数字技术运用词频数",
        }
    }

    /// English field name, also accepted as a header alias
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Ai => "ai_freq",
            Self::BigData => "bigdata_freq",
            Self::Cloud => "cloud_freq",
            Self::Blockchain => "blockchain_freq",
            Self::DigitalTech => "digital_tech_freq",
        }
    }
}

impl fmt::Display for FrequencyColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ai => write!(f, "AI"),
            Self::BigData => write!(f, "Big Data"),
            Self::Cloud => write!(f, "Cloud"),
            Self::Blockchain => write!(f, "Blockchain"),
            Self::DigitalTech => write!(f, "Digital Tech"),
        }
    }
}

/// A single company-year observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stock code, compared as text so leading zeros survive
    pub stock_code: String,

    /// Company display name
    pub company_name: String,

    /// Fiscal year
    pub year: i32,

    /// AI keyword frequency
    pub ai_freq: u64,

    /// Big data keyword frequency
    pub bigdata_freq: u64,

    /// Cloud computing keyword frequency
    pub cloud_freq: u64,

    /// Blockchain keyword frequency
    pub blockchain_freq: u64,

    /// Digital technology application keyword frequency
    pub digital_tech_freq: u64,

    /// Technology dimension sub-index
    pub tech_dimension: Option<f64>,

    /// Application dimension sub-index
    pub application_dimension: Option<f64>,

    /// Total word count of the report
    pub total_word_count: u64,

    /// Precomputed digital transformation index (None when missing)
    pub transformation_index: Option<f64>,
}

impl Record {
    /// Create a record with zeroed frequencies and no index
    pub fn new(stock_code: impl Into<String>, company_name: impl Into<String>, year: i32) -> Self {
        Self {
            stock_code: stock_code.into(),
            company_name: company_name.into(),
            year,
            ai_freq: 0,
            bigdata_freq: 0,
            cloud_freq: 0,
            blockchain_freq: 0,
            digital_tech_freq: 0,
            tech_dimension: None,
            application_dimension: None,
            total_word_count: 0,
            transformation_index: None,
        }
    }

    /// Builder-style setter for the transformation index
    pub fn with_index(mut self, index: f64) -> Self {
        self.transformation_index = Some(index);
        self
    }

    /// Builder-style setter for one frequency column
    pub fn with_frequency(mut self, column: FrequencyColumn, value: u64) -> Self {
        self.set_frequency(column, value);
        self
    }

    /// Get the value of a frequency column
    pub fn frequency(&self, column: FrequencyColumn) -> u64 {
        match column {
            FrequencyColumn::Ai => self.ai_freq,
            FrequencyColumn::BigData => self.bigdata_freq,
            FrequencyColumn::Cloud => self.cloud_freq,
            FrequencyColumn::Blockchain => self.blockchain_freq,
            FrequencyColumn::DigitalTech => self.digital_tech_freq,
        }
    }

    /// Set the value of a frequency column
    pub fn set_frequency(&mut self, column: FrequencyColumn, value: u64) {
        match column {
            FrequencyColumn::Ai => self.ai_freq = value,
            FrequencyColumn::BigData => self.bigdata_freq = value,
            FrequencyColumn::Cloud => self.cloud_freq = value,
            FrequencyColumn::Blockchain => self.blockchain_freq = value,
            FrequencyColumn::DigitalTech => self.digital_tech_freq = value,
        }
    }

    /// The index value if present and finite
    pub fn index_value(&self) -> Option<f64> {
        self.transformation_index.filter(|v| v.is_finite())
    }
}
