//! Row-major table layout.
//!
//! Data is laid out like `row 0 | row 1 | ... | row n`, so all columns of
//! one row are contiguous. Favors row-wise scans and row-wise mutation.

use super::{populate_region, Table};
use crate::source::RowSource;
use stratum_common::error::{Result, StratumError};
use stratum_common::field;
use stratum_common::region::MemoryRegion;

/// Table storing fields in row-major order.
pub struct RowTable {
    num_rows: usize,
    num_cols: usize,
    region: MemoryRegion,
}

impl RowTable {
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

impl Default for RowTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Table for RowTable {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn loaded() -> RowTable {
        let source = MemorySource::new(3, &[vec![1, 2, 3], vec![4, 5, 6]]);
        let mut table = RowTable::new();
        table.load(&source).unwrap();
        table
    }

    #[test]
    fn test_load_and_get() {
        let table = loaded();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_cols(), 3);
        assert_eq!(table.get_int_field(0, 0).unwrap(), 1);
        assert_eq!(table.get_int_field(0, 2).unwrap(), 3);
        assert_eq!(table.get_int_field(1, 1).unwrap(), 5);
    }

    #[test]
    fn test_put_get_roundtrip() {
        let mut table = loaded();
        table.put_int_field(1, 2, -42).unwrap();
        assert_eq!(table.get_int_field(1, 2).unwrap(), -42);
        // Neighbors undisturbed.
        assert_eq!(table.get_int_field(1, 1).unwrap(), 5);
        assert_eq!(table.get_int_field(0, 2).unwrap(), 3);
    }

    #[test]
    fn test_out_of_range_field() {
        let mut table = loaded();
        assert!(matches!(
            table.get_int_field(2, 0),
            Err(StratumError::FieldOutOfRange { row: 2, col: 0 })
        ));
        assert!(matches!(
            table.get_int_field(0, 3),
            Err(StratumError::FieldOutOfRange { row: 0, col: 3 })
        ));
        assert!(matches!(
            table.put_int_field(0, 3, 1),
            Err(StratumError::FieldOutOfRange { .. })
        ));
    }

    #[test]
    fn test_column_overrun_does_not_alias_next_row() {
        // (0, 3) in a 3-column table would alias (1, 0) if unchecked.
        let table = loaded();
        assert!(table.get_int_field(0, 3).is_err());
        assert_eq!(table.get_int_field(1, 0).unwrap(), 4);
    }

    #[test]
    fn test_empty_table_queries() {
        let mut table = RowTable::new();
        table.load(&MemorySource::empty(4)).unwrap();
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.column_sum().unwrap(), 0);
        assert_eq!(table.predicated_column_sum(0, 0).unwrap(), 0);
        assert_eq!(table.predicated_all_columns_sum(0).unwrap(), 0);
        assert_eq!(table.predicated_update(0).unwrap(), 0);
    }

    #[test]
    fn test_row_width_mismatch_rejected() {
        let source = MemorySource::new(3, &[vec![1, 2, 3], vec![4, 5]]);
        let mut table = RowTable::new();
        assert!(matches!(
            table.load(&source),
            Err(StratumError::RowWidthMismatch { row: 1, .. })
        ));
    }

    #[test]
    fn test_reload_replaces_contents() {
        let mut table = loaded();
        table
            .load(&MemorySource::new(2, &[vec![9, 8]]))
            .unwrap();
        assert_eq!(table.num_rows(), 1);
        assert_eq!(table.num_cols(), 2);
        assert_eq!(table.get_int_field(0, 1).unwrap(), 8);
        assert!(table.get_int_field(0, 2).is_err());
    }
}
