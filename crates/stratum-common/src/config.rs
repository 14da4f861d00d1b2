//! Configuration structures for StratumDB.

use serde::{Deserialize, Serialize};

/// Physical layout of a table's storage region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutKind {
    /// Row-major: all columns of one row are contiguous.
    #[default]
    RowMajor,
    /// Column-major: all rows of one column are contiguous.
    ColumnMajor,
}

/// Configuration for a table instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Physical layout of the storage region.
    pub layout: LayoutKind,
    /// Column to build the secondary index on, if any.
    ///
    /// An indexed table is always row-major; the layout field is ignored
    /// when this is set.
    pub index_column: Option<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            layout: LayoutKind::RowMajor,
            index_column: None,
        }
    }
}
