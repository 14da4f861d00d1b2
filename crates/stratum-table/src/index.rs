//! Secondary ordered index over one designated column.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use crate::table::Table;
use stratum_common::error::Result;

/// Ordered mapping from a field value to the row ids holding that value
/// in the indexed column.
///
/// Built once after the table is populated; row ids within a bucket keep
/// ascending insertion order. The index is not maintained afterwards:
/// mutating the indexed column through `put_int_field` leaves it stale,
/// and keeping it consistent is the caller's obligation.
pub struct SecondaryIndex {
    buckets: BTreeMap<i32, Vec<usize>>,
}

impl SecondaryIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }

    /// Builds the index over `index_column` by scanning rows in ascending
    /// row-id order.
    pub fn build<T: Table + ?Sized>(table: &T, index_column: usize) -> Result<Self> {
        let mut buckets: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
        for row in 0..table.num_rows() {
            let key = table.get_int_field(row, index_column)?;
            buckets.entry(key).or_default().push(row);
        }
        Ok(Self { buckets })
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns true if the index holds no keys.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Returns the bucket for `key`, if present.
    #[inline]
    pub fn bucket(&self, key: i32) -> Option<&[usize]> {
        self.buckets.get(&key).map(|rows| rows.as_slice())
    }

    /// Returns the smallest key strictly greater than `key`.
    #[inline]
    pub fn first_key_greater_than(&self, key: i32) -> Option<i32> {
        self.buckets
            .range((Excluded(key), Unbounded))
            .next()
            .map(|(&k, _)| k)
    }

    /// Returns the largest key strictly less than `key`.
    #[inline]
    pub fn first_key_less_than(&self, key: i32) -> Option<i32> {
        self.buckets.range(..key).next_back().map(|(&k, _)| k)
    }

    /// Buckets with keys strictly greater than `key`, ascending.
    pub fn buckets_greater_than(&self, key: i32) -> impl Iterator<Item = (i32, &[usize])> {
        self.buckets
            .range((Excluded(key), Unbounded))
            .map(|(&k, rows)| (k, rows.as_slice()))
    }

    /// Buckets with keys strictly less than `key`, descending.
    pub fn buckets_less_than(&self, key: i32) -> impl Iterator<Item = (i32, &[usize])> {
        self.buckets
            .range(..key)
            .rev()
            .map(|(&k, rows)| (k, rows.as_slice()))
    }
}

impl Default for SecondaryIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use crate::table::{RowTable, Table};

    fn sample_index() -> SecondaryIndex {
        // Column 1 values: 10, 2, 20, 10.
        let source = MemorySource::new(
            2,
            &[vec![0, 10], vec![1, 2], vec![2, 20], vec![3, 10]],
        );
        let mut table = RowTable::new();
        table.load(&source).unwrap();
        SecondaryIndex::build(&table, 1).unwrap()
    }

    #[test]
    fn test_build_buckets_rows_by_key() {
        let index = sample_index();
        assert_eq!(index.len(), 3);
        assert_eq!(index.bucket(2), Some(&[1usize][..]));
        assert_eq!(index.bucket(10), Some(&[0usize, 3][..]));
        assert_eq!(index.bucket(20), Some(&[2usize][..]));
        assert_eq!(index.bucket(5), None);
    }

    #[test]
    fn test_empty_index() {
        let index = SecondaryIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.first_key_greater_than(i32::MIN), None);
        assert_eq!(index.first_key_less_than(i32::MAX), None);
        assert_eq!(index.buckets_greater_than(0).count(), 0);
        assert_eq!(index.buckets_less_than(0).count(), 0);
    }

    #[test]
    fn test_first_key_greater_than() {
        let index = sample_index();
        assert_eq!(index.first_key_greater_than(i32::MIN), Some(2));
        assert_eq!(index.first_key_greater_than(2), Some(10));
        assert_eq!(index.first_key_greater_than(9), Some(10));
        assert_eq!(index.first_key_greater_than(10), Some(20));
        assert_eq!(index.first_key_greater_than(20), None);
    }

    #[test]
    fn test_first_key_less_than() {
        let index = sample_index();
        assert_eq!(index.first_key_less_than(i32::MAX), Some(20));
        assert_eq!(index.first_key_less_than(20), Some(10));
        assert_eq!(index.first_key_less_than(11), Some(10));
        assert_eq!(index.first_key_less_than(10), Some(2));
        assert_eq!(index.first_key_less_than(2), None);
    }

    #[test]
    fn test_buckets_greater_than_ascending() {
        let index = sample_index();
        let keys: Vec<i32> = index.buckets_greater_than(2).map(|(k, _)| k).collect();
        assert_eq!(keys, vec![10, 20]);
    }

    #[test]
    fn test_buckets_less_than_descending() {
        let index = sample_index();
        let keys: Vec<i32> = index.buckets_less_than(20).map(|(k, _)| k).collect();
        assert_eq!(keys, vec![10, 2]);
    }

    #[test]
    fn test_every_row_in_exactly_one_bucket() {
        let index = sample_index();
        let mut rows: Vec<usize> = index
            .buckets_greater_than(i32::MIN)
            .flat_map(|(_, bucket)| bucket.iter().copied())
            .collect();
        // i32::MIN itself can never be excluded by a strictly-greater
        // walk from below, so also pick up a potential MIN bucket.
        if let Some(bucket) = index.bucket(i32::MIN) {
            rows.extend_from_slice(bucket);
        }
        rows.sort_unstable();
        assert_eq!(rows, vec![0, 1, 2, 3]);
    }
}
