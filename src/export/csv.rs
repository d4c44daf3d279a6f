//! CSV Export functionality
//!
//! Writes records with the source spreadsheet headers, so an export can be
//! loaded back as a dataset.

use std::io::Write;

use crate::error::{DtiError, DtiResult};
use crate::models::{Dataset, Record};
use crate::storage::Field;

/// Export records to CSV in source column order
pub fn export_records_csv<W: Write>(records: &Dataset, writer: &mut W) -> DtiResult<()> {
    write_records(records, writer).map_err(|e| DtiError::Export(e.to_string()))
}

fn write_records<W: Write>(records: &Dataset, writer: &mut W) -> csv::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(Field::ALL.iter().map(|f| f.header()))?;

    for record in records.iter() {
        csv.write_record(Field::ALL.iter().map(|f| field_value(record, *f)))?;
    }

    csv.flush()?;
    Ok(())
}

fn field_value(record: &Record, field: Field) -> String {
    let optional = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
    match field {
        Field::StockCode => record.stock_code.clone(),
        Field::CompanyName => record.company_name.clone(),
        Field::Year => record.year.to_string(),
        Field::Frequency(column) => record.frequency(column).to_string(),
        Field::TechDimension => optional(record.tech_dimension),
        Field::ApplicationDimension => optional(record.application_dimension),
        Field::TotalWordCount => record.total_word_count.to_string(),
        Field::TransformationIndex => optional(record.transformation_index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FrequencyColumn;
    use crate::storage::csv::read_csv;

    fn sample() -> Dataset {
        let mut first = Record::new("000001", "平安银行", 2019)
            .with_index(0.12)
            .with_frequency(FrequencyColumn::Ai, 4);
        first.tech_dimension = Some(0.05);
        first.total_word_count = 12000;
        Dataset::new(vec![first, Record::new("600000", "浦发银行", 2020)])
    }

    #[test]
    fn test_export_header_order() {
        let mut buffer = Vec::new();
        export_records_csv(&sample(), &mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        assert!(csv.starts_with(
            "股票代码,企业名称,年份,人工智能词频数,大数据词频数,云计算词频数,区块链词频数,数字技术运用词频数,技术维度,应用维度,词总,数字化转型指数\n"
        ));
        assert!(csv.contains("000001,平安银行,2019,4,0,0,0,0,0.05,,12000,0.12"));
        assert!(csv.contains("600000,浦发银行,2020,0,0,0,0,0,,,0,"));
    }

    #[test]
    fn test_export_loads_back() {
        let mut buffer = Vec::new();
        export_records_csv(&sample(), &mut buffer).unwrap();

        let loaded = read_csv(buffer.as_slice()).unwrap();
        assert_eq!(loaded, sample());
    }
}
