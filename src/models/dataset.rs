//! Immutable dataset of annual report records
//!
//! A `Dataset` is a cheaply clonable, read-only view over loaded records.
//! Query results are datasets too, so filters compose.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use super::record::Record;

/// Ordered, immutable sequence of records
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[Record]>,
}

impl Dataset {
    /// Create a dataset from owned records
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// An empty dataset
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Borrow all records
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of distinct stock codes
    pub fn distinct_company_count(&self) -> usize {
        let mut codes: Vec<&str> = self.records.iter().map(|r| r.stock_code.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        codes.len()
    }

    /// Keep records matching a predicate, preserving order
    pub fn filtered<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Record) -> bool,
    {
        Self::new(self.records.iter().filter(|r| predicate(r)).cloned().collect())
    }

    /// The first `n` records
    pub fn head(&self, n: usize) -> Self {
        Self::new(self.records.iter().take(n).cloned().collect())
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for Dataset {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl PartialEq for Dataset {
    fn eq(&self, other: &Self) -> bool {
        self.records[..] == other.records[..]
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.records.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(vec![
            Record::new("600000", "Pudong Bank", 2019),
            Record::new("600000", "Pudong Bank", 2020),
            Record::new("000001", "Ping An Bank", 2020),
        ])
    }

    #[test]
    fn test_distinct_company_count() {
        assert_eq!(sample().distinct_company_count(), 2);
        assert_eq!(Dataset::empty().distinct_company_count(), 0);
    }

    #[test]
    fn test_filtered_preserves_order() {
        let subset = sample().filtered(|r| r.year == 2020);
        assert_eq!(subset.len(), 2);
        assert_eq!(subset[0].stock_code, "600000");
        assert_eq!(subset[1].stock_code, "000001");
    }

    #[test]
    fn test_clone_shares_records() {
        let data = sample();
        let copy = data.clone();
        assert!(std::ptr::eq(data.records().as_ptr(), copy.records().as_ptr()));
    }

    #[test]
    fn test_head() {
        assert_eq!(sample().head(2).len(), 2);
        assert_eq!(sample().head(10).len(), 3);
    }

    #[test]
    fn test_dataset_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Dataset>();
    }
}
