//! Table contract and layout variants.
//!
//! Every variant stores `num_rows * num_cols` fixed-width integer fields
//! in a contiguous memory region and answers the same four queries. The
//! variants differ only in physical addressing (row-major vs column-major)
//! and in whether a secondary index accelerates predicated queries.

mod column;
mod indexed;
mod row;

pub use column::ColumnTable;
pub use indexed::IndexedTable;
pub use row::RowTable;

use crate::source::RowSource;
use bytes::Bytes;
use stratum_common::config::{LayoutKind, TableConfig};
use stratum_common::error::{Result, StratumError};
use stratum_common::field::{self, FIELD_LEN};
use stratum_common::region::MemoryRegion;

/// Uniform access interface over the physical layouts.
///
/// Query operations are defined here by their reference semantics, a full
/// scan through the field accessors. Variants override them only with
/// implementations that return identical results.
pub trait Table {
    /// Number of rows. Fixed after load.
    fn num_rows(&self) -> usize;

    /// Number of columns. Fixed after load.
    fn num_cols(&self) -> usize;

    /// Populates the table from a row source, replacing any prior
    /// contents. A failed load leaves the table unusable.
    fn load(&mut self, source: &dyn RowSource) -> Result<()>;

    /// Returns the field at (`row`, `col`).
    fn get_int_field(&self, row: usize, col: usize) -> Result<i32>;

    /// Stores `value` at (`row`, `col`).
    fn put_int_field(&mut self, row: usize, col: usize, value: i32) -> Result<()>;

    /// SELECT SUM(col0) FROM table;
    fn column_sum(&self) -> Result<i64> {
        scan::column_sum(self)
    }

    /// SELECT SUM(col0) FROM table WHERE col1 > t1 AND col2 < t2;
    fn predicated_column_sum(&self, t1: i32, t2: i32) -> Result<i64> {
        scan::predicated_column_sum(self, t1, t2)
    }

    /// SELECT SUM(col0) + ... + SUM(coln) FROM table WHERE col0 > t;
    fn predicated_all_columns_sum(&self, threshold: i32) -> Result<i64> {
        scan::predicated_all_columns_sum(self, threshold)
    }

    /// UPDATE(col3 = col3 + col2) WHERE col0 < t; returns rows affected.
    fn predicated_update(&mut self, threshold: i32) -> Result<usize> {
        scan::predicated_update(self, threshold)
    }
}

/// Constructs the table variant selected by `config`.
///
/// An index column implies the indexed row-major variant.
pub fn open_table(config: &TableConfig) -> Box<dyn Table> {
    match config.index_column {
        Some(col) => Box::new(IndexedTable::new(col)),
        None => match config.layout {
            LayoutKind::RowMajor => Box::new(RowTable::new()),
            LayoutKind::ColumnMajor => Box::new(ColumnTable::new()),
        },
    }
}

/// Allocates a region for `rows` and writes every field at the offset
/// computed by `offset_of(row, col)`.
///
/// Each row buffer must hold exactly `num_cols` fields; a mismatch is
/// detected before any field is written.
pub(crate) fn populate_region(
    rows: &[Bytes],
    num_cols: usize,
    offset_of: impl Fn(usize, usize) -> usize,
) -> Result<MemoryRegion> {
    let row_width = num_cols * FIELD_LEN;
    for (row, buf) in rows.iter().enumerate() {
        if buf.len() != row_width {
            return Err(StratumError::RowWidthMismatch {
                row,
                expected: row_width,
                actual: buf.len(),
            });
        }
    }

    let mut region = MemoryRegion::allocate(rows.len() * row_width);
    for (row, buf) in rows.iter().enumerate() {
        for col in 0..num_cols {
            let value = field::read_field(buf, col * FIELD_LEN);
            region.write_i32(offset_of(row, col), value)?;
        }
    }
    Ok(region)
}

/// Reference full-scan implementations of the query operations.
pub(crate) mod scan {
    use super::Table;
    use stratum_common::error::Result;

    pub(crate) fn column_sum<T: Table + ?Sized>(table: &T) -> Result<i64> {
        let mut sum = 0i64;
        for row in 0..table.num_rows() {
            sum += table.get_int_field(row, 0)? as i64;
        }
        Ok(sum)
    }

    pub(crate) fn predicated_column_sum<T: Table + ?Sized>(
        table: &T,
        t1: i32,
        t2: i32,
    ) -> Result<i64> {
        let mut sum = 0i64;
        for row in 0..table.num_rows() {
            if table.get_int_field(row, 1)? > t1 && table.get_int_field(row, 2)? < t2 {
                sum += table.get_int_field(row, 0)? as i64;
            }
        }
        Ok(sum)
    }

    pub(crate) fn predicated_all_columns_sum<T: Table + ?Sized>(
        table: &T,
        threshold: i32,
    ) -> Result<i64> {
        let mut sum = 0i64;
        for row in 0..table.num_rows() {
            if table.get_int_field(row, 0)? <= threshold {
                continue;
            }
            for col in 0..table.num_cols() {
                sum += table.get_int_field(row, col)? as i64;
            }
        }
        Ok(sum)
    }

    pub(crate) fn predicated_update<T: Table + ?Sized>(
        table: &mut T,
        threshold: i32,
    ) -> Result<usize> {
        let mut affected = 0;
        for row in 0..table.num_rows() {
            if table.get_int_field(row, 0)? >= threshold {
                continue;
            }
            let updated = table
                .get_int_field(row, 3)?
                .wrapping_add(table.get_int_field(row, 2)?);
            table.put_int_field(row, 3, updated)?;
            affected += 1;
        }
        Ok(affected)
    }
}
