//! Column-major table layout.
//!
//! Data is laid out like `col 0 | col 1 | ... | col m`, so all rows of
//! one column are contiguous. Favors single-column scans.

use super::{populate_region, Table};
use crate::source::RowSource;
use stratum_common::error::{Result, StratumError};
use stratum_common::field;
use stratum_common::region::MemoryRegion;

/// Table storing fields in column-major order.
pub struct ColumnTable {
    num_rows: usize,
    num_cols: usize,
    region: MemoryRegion,
}

impl ColumnTable {
    /// Creates an empty table; populate it with [`Table::load`].
    pub fn new() -> Self {
        Self {
            num_rows: 0,
            num_cols: 0,
            region: MemoryRegion::allocate(0),
        }
    }

    #[inline]
    fn check_field(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.num_rows || col >= self.num_cols {
            return Err(StratumError::FieldOutOfRange { row, col });
        }
        Ok(())
    }
}

impl Default for ColumnTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Table for ColumnTable {
    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }

    fn load(&mut self, source: &dyn RowSource) -> Result<()> {
        let num_cols = source.num_cols();
        let rows = source.rows()?;
        let num_rows = rows.len();

        self.region = populate_region(&rows, num_cols, |row, col| {
            field::column_major_offset(row, col, num_rows)
        })?;
        self.num_rows = num_rows;
        self.num_cols = num_cols;
        Ok(())
    }

    fn get_int_field(&self, row: usize, col: usize) -> Result<i32> {
        self.check_field(row, col)?;
        self.region
            .read_i32(field::column_major_offset(row, col, self.num_rows))
    }

    fn put_int_field(&mut self, row: usize, col: usize, value: i32) -> Result<()> {
        self.check_field(row, col)?;
        self.region
            .write_i32(field::column_major_offset(row, col, self.num_rows), value)
    }
}
