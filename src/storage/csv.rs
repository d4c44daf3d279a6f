//! CSV dataset reader

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{DtiError, DtiResult};
use crate::models::Dataset;

use super::columns::ColumnLayout;
use super::rows::{parse_row, Cell};

/// Load a dataset from a CSV file with a header row
pub fn load_csv(path: &Path) -> DtiResult<Dataset> {
    let file = std::fs::File::open(path).map_err(|e| {
        DtiError::DataLoad(format!("Failed to open {}: {}", path.display(), e))
    })?;
    read_csv(file)
}

/// Read a dataset from any CSV source
pub fn read_csv<R: Read>(source: R) -> DtiResult<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    debug!(columns = headers.len(), "read CSV header");
    let layout = ColumnLayout::from_headers(&headers)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = result?;
        let cells: Vec<Cell> = row.iter().map(Cell::from_text).collect();
        if let Some(record) = parse_row(&cells, &layout, idx + 1)? {
            records.push(record);
        }
    }

    Ok(Dataset::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "股票代码,企业名称,年份,人工智能词频数,大数据词频数,云计算词频数,区块链词频数,数字技术运用词频数,技术维度,应用维度,词总,数字化转型指数";

    #[test]
    fn test_read_csv_keeps_leading_zeros() {
        let data = format!(
            "{}\n000001,Ping An Bank,2019,1,2,3,4,5,0.1,0.2,1000,0.12\n000002,Vanke,2020,0,0,0,0,1,,,900,\n",
            HEADER
        );

        let dataset = read_csv(data.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[0].stock_code, "000001");
        assert_eq!(dataset[0].blockchain_freq, 4);
        assert_eq!(dataset[1].transformation_index, None);
    }

    #[test]
    fn test_read_csv_with_bom_and_extra_columns() {
        let data = format!(
            "\u{feff}{},备注\n600000,Pudong Bank,2019,1,2,3,4,5,0.1,0.2,1000,0.12,note\n",
            HEADER
        );

        let dataset = read_csv(data.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset[0].transformation_index, Some(0.12));
    }

    #[test]
    fn test_read_csv_missing_column() {
        let data = "股票代码,企业名称\n600000,Pudong Bank\n";
        let err = read_csv(data.as_bytes()).unwrap_err();
        assert!(err.is_data_load());
    }

    #[test]
    fn test_read_csv_reports_row_number() {
        let data = format!(
            "{}\n600000,Pudong Bank,2019,1,2,3,4,5,0.1,0.2,1000,0.12\n600000,Pudong Bank,x,1,2,3,4,5,0.1,0.2,1000,0.12\n",
            HEADER
        );
        let err = read_csv(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }
}
