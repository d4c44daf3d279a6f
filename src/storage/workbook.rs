//! Spreadsheet dataset reader (xlsx, xlsm, xlsb, xls, ods)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::debug;

use crate::error::{DtiError, DtiResult};
use crate::models::Dataset;

use super::columns::ColumnLayout;
use super::rows::{parse_row, Cell};

/// Load a dataset from a workbook sheet
///
/// Reads `sheet` when given, otherwise the first sheet. The first row of the
/// sheet's used range is the header row.
pub fn load_workbook(path: &Path, sheet: Option<&str>) -> DtiResult<Dataset> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|s| s.as_str() == name)
            .cloned()
            .ok_or_else(|| {
                DtiError::DataLoad(format!(
                    "sheet '{}' not found in {} (available: {})",
                    name,
                    path.display(),
                    sheet_names.join(", ")
                ))
            })?,
        None => sheet_names.first().cloned().ok_or_else(|| {
            DtiError::DataLoad(format!("workbook {} contains no sheets", path.display()))
        })?,
    };

    debug!(sheet = %sheet_name, "reading worksheet");
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(|c| c.to_string()).collect(),
        None => {
            return Err(DtiError::DataLoad(format!(
                "sheet '{}' is empty",
                sheet_name
            )))
        }
    };
    let layout = ColumnLayout::from_headers(&headers)?;

    let mut records = Vec::new();
    for (idx, row) in rows.enumerate() {
        let cells: Vec<Cell> = row.iter().map(to_cell).collect();
        if let Some(record) = parse_row(&cells, &layout, idx + 1)? {
            records.push(record);
        }
    }

    Ok(Dataset::new(records))
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::from_text(s),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from_text(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_to_cell() {
        assert_eq!(to_cell(&Data::Empty), Cell::Empty);
        assert_eq!(to_cell(&Data::Error(CellErrorType::NA)), Cell::Empty);
        assert_eq!(to_cell(&Data::Int(600000)), Cell::Number(600000.0));
        assert_eq!(
            to_cell(&Data::String(" 000001 ".into())),
            Cell::Text("000001".into())
        );
    }

    use crate::models::FrequencyColumn;
    use rust_xlsxwriter::Workbook;

    const HEADERS: [&str; 12] = [
        "股票代码",
        "企业名称",
        "年份",
        "人工智能词频数",
        "大数据词频数",
        "云计算词频数",
        "区块链词频数",
        "数字技术运用词频数",
        "技术维度",
        "应用维度",
        "词总",
        "数字化转型指数",
    ];

    /// Two sheets: "First" holds one numeric-code row, "Second" holds two
    /// rows with a zero-padded text code and an empty frequency cell.
    fn write_fixture(path: &Path) {
        let mut workbook = Workbook::new();

        let first = workbook.add_worksheet();
        first.set_name("First").unwrap();
        for (col, header) in HEADERS.iter().enumerate() {
            first.write_string(0, col as u16, *header).unwrap();
        }
        first.write_number(1, 0, 600000.0).unwrap();
        first.write_string(1, 1, "浦发银行").unwrap();
        first.write_number(1, 2, 2019.0).unwrap();
        for col in 3..8 {
            first.write_number(1, col, 2.0).unwrap();
        }
        first.write_number(1, 8, 1.5).unwrap();
        first.write_number(1, 9, 2.5).unwrap();
        first.write_number(1, 10, 1000.0).unwrap();
        first.write_number(1, 11, 0.12).unwrap();

        let second = workbook.add_worksheet();
        second.set_name("Second").unwrap();
        for (col, header) in HEADERS.iter().enumerate() {
            second.write_string(0, col as u16, *header).unwrap();
        }
        for (row, year) in [(1u32, 2020.0), (2, 2021.0)] {
            second.write_string(row, 0, "000001").unwrap();
            second.write_string(row, 1, "平安银行").unwrap();
            second.write_number(row, 2, year).unwrap();
            // AI frequency (column 3) left empty
            for col in 4..8 {
                second.write_number(row, col, 1.0).unwrap();
            }
            second.write_number(row, 10, 500.0).unwrap();
            second.write_number(row, 11, 0.2).unwrap();
        }

        workbook.save(path).unwrap();
    }

    #[test]
    fn test_first_sheet_by_default() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("index.xlsx");
        write_fixture(&path);

        let dataset = load_workbook(&path, None).unwrap();
        assert_eq!(dataset.len(), 1);

        let record = &dataset.records()[0];
        assert_eq!(record.stock_code, "600000");
        assert_eq!(record.company_name, "浦发银行");
        assert_eq!(record.year, 2019);
        assert_eq!(record.frequency(FrequencyColumn::Ai), 2);
        assert_eq!(record.total_word_count, 1000);
        assert_eq!(record.index_value(), Some(0.12));
    }

    #[test]
    fn test_named_sheet() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("index.xlsx");
        write_fixture(&path);

        let dataset = load_workbook(&path, Some("Second")).unwrap();
        assert_eq!(dataset.len(), 2);

        let record = &dataset.records()[0];
        assert_eq!(record.stock_code, "000001");
        assert_eq!(record.year, 2020);
        assert_eq!(record.frequency(FrequencyColumn::Ai), 0);
        assert_eq!(record.frequency(FrequencyColumn::BigData), 1);
        assert_eq!(record.tech_dimension, None);
        assert_eq!(dataset.records()[1].year, 2021);
    }

    #[test]
    fn test_unknown_sheet_lists_available() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("index.xlsx");
        write_fixture(&path);

        let err = load_workbook(&path, Some("Missing")).unwrap_err();
        assert!(err.is_data_load());
        let message = err.to_string();
        assert!(message.contains("'Missing'"));
        assert!(message.contains("First, Second"));
    }

    #[test]
    fn test_invalid_workbook_is_load_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();

        let err = load_workbook(&path, None).unwrap_err();
        assert!(err.is_data_load());
    }
}
