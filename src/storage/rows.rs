//! Cell coercion and row parsing
//!
//! Both the workbook and the CSV reader turn their native cells into
//! [`Cell`] values, then build records through [`parse_row`].

use crate::error::{DtiError, DtiResult};
use crate::models::{FrequencyColumn, Record};

use super::columns::{ColumnLayout, Field};

/// A raw cell value independent of the input format
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    /// Build a cell from CSV text
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    /// Returns true for empty or whitespace-only cells
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }
}

const EMPTY_CELL: &Cell = &Cell::Empty;

/// Parse one data row into a record
///
/// `row_number` is the 1-based data row used in error messages. Returns
/// `Ok(None)` for rows where every cell is blank.
pub fn parse_row(cells: &[Cell], layout: &ColumnLayout, row_number: usize) -> DtiResult<Option<Record>> {
    if cells.iter().all(Cell::is_blank) {
        return Ok(None);
    }

    let cell = |field: Field| cells.get(layout.position(field)).unwrap_or(EMPTY_CELL);

    let stock_code = stock_code(cell(Field::StockCode));
    if stock_code.is_empty() {
        return Err(DtiError::bad_cell(row_number, Field::StockCode.header(), "empty stock code"));
    }

    let mut record = Record::new(
        stock_code,
        text(cell(Field::CompanyName)),
        year(cell(Field::Year), row_number)?,
    );

    for column in FrequencyColumn::ALL {
        let field = Field::Frequency(column);
        record.set_frequency(column, count(cell(field), field, row_number)?);
    }

    record.tech_dimension = optional_number(cell(Field::TechDimension));
    record.application_dimension = optional_number(cell(Field::ApplicationDimension));
    record.total_word_count = count(cell(Field::TotalWordCount), Field::TotalWordCount, row_number)?;
    record.transformation_index = optional_number(cell(Field::TransformationIndex));

    Ok(Some(record))
}

/// Stock codes stay text; whole numbers lose their fractional part
fn stock_code(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(s) => s.trim().to_string(),
        Cell::Number(n) => format_number(*n),
    }
}

fn text(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(s) => s.trim().to_string(),
        Cell::Number(n) => format_number(*n),
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn whole_number(cell: &Cell) -> Option<f64> {
    let value = match cell {
        Cell::Empty => return None,
        Cell::Number(n) => *n,
        Cell::Text(s) => s.trim().parse::<f64>().ok()?,
    };
    (value.is_finite() && value.fract() == 0.0).then_some(value)
}

fn describe(cell: &Cell) -> String {
    match cell {
        Cell::Empty => "empty".to_string(),
        Cell::Text(s) => format!("'{}'", s),
        Cell::Number(n) => n.to_string(),
    }
}

fn year(cell: &Cell, row_number: usize) -> DtiResult<i32> {
    whole_number(cell)
        .filter(|v| *v >= i32::MIN as f64 && *v <= i32::MAX as f64)
        .map(|v| v as i32)
        .ok_or_else(|| {
            DtiError::bad_cell(
                row_number,
                Field::Year.header(),
                format!("expected an integer year, got {}", describe(cell)),
            )
        })
}

/// Frequencies and word counts: empty is zero, anything else must be a
/// non-negative integer
fn count(cell: &Cell, field: Field, row_number: usize) -> DtiResult<u64> {
    if cell.is_blank() {
        return Ok(0);
    }
    whole_number(cell)
        .filter(|v| *v >= 0.0 && *v <= u64::MAX as f64)
        .map(|v| v as u64)
        .ok_or_else(|| {
            DtiError::bad_cell(
                row_number,
                field.header(),
                format!("expected a non-negative integer, got {}", describe(cell)),
            )
        })
}

/// Scores: empty, NaN and unparsable values are missing
fn optional_number(cell: &Cell) -> Option<f64> {
    let value = match cell {
        Cell::Empty => return None,
        Cell::Number(n) => *n,
        Cell::Text(s) => s.trim().parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}
