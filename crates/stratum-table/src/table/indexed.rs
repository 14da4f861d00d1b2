//! Indexed row-major table layout.
//!
//! Stores data row-major and keeps a secondary ordered index on one
//! designated column, built once at load time. Queries whose predicate
//! touches the indexed column walk index buckets instead of scanning;
//! every row lives in exactly one bucket, so a walk visits each
//! qualifying row exactly once and the results match the full scan.

use super::{populate_region, scan, Table};
use crate::index::SecondaryIndex;
use crate::source::RowSource;
use stratum_common::error::{Result, StratumError};
use stratum_common::field;
use stratum_common::region::MemoryRegion;

/// Row-major table with a secondary index on `index_column`.
///
/// The index reflects load-time contents only. Mutating the indexed
/// column through [`Table::put_int_field`] leaves the index stale; the
/// fixed query set never does this, and callers that do must reload.
pub struct IndexedTable {
    num_rows: usize,
    num_cols: usize,
    region: MemoryRegion,
    index_column: usize,
    index: SecondaryIndex,
}

impl IndexedTable {
    /// Creates an empty table that will index `index_column` on load.
    pub fn new(index_column: usize) -> Self {
        Self {
            num_rows: 0,
            num_cols: 0,
            region: MemoryRegion::allocate(0),
            index_column,
            index: SecondaryIndex::new(),
        }
    }

    /// Column the secondary index is built on.
    pub fn index_column(&self) -> usize {
        self.index_column
    }

    #[inline]
    fn check_field(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.num_rows || col >= self.num_cols {
            return Err(StratumError::FieldOutOfRange { row, col });
        }
        Ok(())
    }
}

impl Table for IndexedTable {
    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }

    fn load(&mut self, source: &dyn RowSource) -> Result<()> {
        let num_cols = source.num_cols();
        let rows = source.rows()?;

        self.region = populate_region(&rows, num_cols, |row, col| {
            field::row_major_offset(row, col, num_cols)
        })?;
        self.num_rows = rows.len();
        self.num_cols = num_cols;
        self.index = SecondaryIndex::build(&*self, self.index_column)?;
        Ok(())
    }

    fn get_int_field(&self, row: usize, col: usize) -> Result<i32> {
        self.check_field(row, col)?;
        self.region
            .read_i32(field::row_major_offset(row, col, self.num_cols))
    }

    fn put_int_field(&mut self, row: usize, col: usize, value: i32) -> Result<()> {
        self.check_field(row, col)?;
        self.region
            .write_i32(field::row_major_offset(row, col, self.num_cols), value)
    }

    fn predicated_column_sum(&self, t1: i32, t2: i32) -> Result<i64> {
        match self.index_column {
            // Walk col1 buckets above t1 in ascending key order,
            // filtering on col2 < t2.
            1 => {
                let mut sum = 0i64;
                let mut bound = t1;
                while let Some(key) = self.index.first_key_greater_than(bound) {
                    if let Some(bucket) = self.index.bucket(key) {
                        for &row in bucket {
                            if self.get_int_field(row, 2)? < t2 {
                                sum += self.get_int_field(row, 0)? as i64;
                            }
                        }
                    }
                    bound = key;
                }
                Ok(sum)
            }
            // Walk col2 buckets below t2 in descending key order,
            // filtering on col1 > t1.
            2 => {
                let mut sum = 0i64;
                let mut bound = t2;
                while let Some(key) = self.index.first_key_less_than(bound) {
                    if let Some(bucket) = self.index.bucket(key) {
                        for &row in bucket {
                            if self.get_int_field(row, 1)? > t1 {
                                sum += self.get_int_field(row, 0)? as i64;
                            }
                        }
                    }
                    bound = key;
                }
                Ok(sum)
            }
            _ => scan::predicated_column_sum(self, t1, t2),
        }
    }

    fn predicated_all_columns_sum(&self, threshold: i32) -> Result<i64> {
        if self.index_column != 0 {
            return scan::predicated_all_columns_sum(self, threshold);
        }

        // The bucket key is col0's value, so no residual filter is needed.
        let mut sum = 0i64;
        let mut bound = threshold;
        while let Some(key) = self.index.first_key_greater_than(bound) {
            if let Some(bucket) = self.index.bucket(key) {
                for &row in bucket {
                    for col in 0..self.num_cols {
                        sum += self.get_int_field(row, col)? as i64;
                    }
                }
            }
            bound = key;
        }
        Ok(sum)
    }

    fn predicated_update(&mut self, threshold: i32) -> Result<usize> {
        if self.index_column != 0 {
            return scan::predicated_update(self, threshold);
        }

        let mut affected = 0;
        let mut bound = threshold;
        while let Some(key) = self.index.first_key_less_than(bound) {
            let rows: Vec<usize> = self
                .index
                .bucket(key)
                .map(|bucket| bucket.to_vec())
                .unwrap_or_default();
            for &row in &rows {
                let updated = self
                    .get_int_field(row, 3)?
                    .wrapping_add(self.get_int_field(row, 2)?);
                self.put_int_field(row, 3, updated)?;
            }
            affected += rows.len();
            bound = key;
        }
        Ok(affected)
    }
}
