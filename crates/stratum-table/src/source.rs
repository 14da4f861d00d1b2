//! Row sources that supply data for table loading.
//!
//! A source produces a fully materialized sequence of rows, each row a
//! byte buffer of exactly `num_cols` little-endian 4-byte fields in
//! logical column order.

use bytes::{BufMut, Bytes, BytesMut};
use std::fs;
use std::path::{Path, PathBuf};
use stratum_common::error::{Result, StratumError};
use stratum_common::field::FIELD_LEN;

/// A synchronous supplier of fixed-width integer rows.
pub trait RowSource {
    /// Number of fields per row. Fixed for the lifetime of the source.
    fn num_cols(&self) -> usize;

    /// Materializes every row as a buffer of `num_cols * FIELD_LEN` bytes.
    fn rows(&self) -> Result<Vec<Bytes>>;
}

/// Encodes one row of fields into a little-endian buffer.
fn encode_row(fields: &[i32]) -> Bytes {
    let mut buf = BytesMut::with_capacity(fields.len() * FIELD_LEN);
    for &field in fields {
        buf.put_i32_le(field);
    }
    buf.freeze()
}

/// A row source over rows already held in memory.
pub struct MemorySource {
    num_cols: usize,
    rows: Vec<Bytes>,
}

impl MemorySource {
    /// Creates a source from materialized rows of `num_cols` fields each.
    pub fn new(num_cols: usize, rows: &[Vec<i32>]) -> Self {
        Self {
            num_cols,
            rows: rows.iter().map(|row| encode_row(row)).collect(),
        }
    }

    /// Creates a source with `num_cols` columns and no rows.
    pub fn empty(num_cols: usize) -> Self {
        Self {
            num_cols,
            rows: Vec::new(),
        }
    }
}

impl RowSource for MemorySource {
    fn num_cols(&self) -> usize {
        self.num_cols
    }

    fn rows(&self) -> Result<Vec<Bytes>> {
        Ok(self.rows.clone())
    }
}

/// A row source reading a header-less CSV file of integer fields.
///
/// One row per line, fields separated by commas. Every line must carry
/// exactly `num_cols` fields.
pub struct CsvSource {
    path: PathBuf,
    num_cols: usize,
}

impl CsvSource {
    /// Creates a source over the CSV file at `path` with `num_cols` fields
    /// per row. The file is read when rows are requested.
    pub fn new(path: impl AsRef<Path>, num_cols: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            num_cols,
        }
    }
}

impl RowSource for CsvSource {
    fn num_cols(&self) -> usize {
        self.num_cols
    }

    fn rows(&self) -> Result<Vec<Bytes>> {
        let contents = fs::read_to_string(&self.path)?;
        let mut rows = Vec::new();

        for (line_idx, line) in contents.lines().enumerate() {
            if line.is_empty() {
                continue;
            }

            let mut fields = Vec::with_capacity(self.num_cols);
            for raw in line.split(',') {
                let field = raw.trim().parse::<i32>().map_err(|_| {
                    StratumError::InvalidRow {
                        line: line_idx + 1,
                        reason: format!("expected integer, got \"{}\"", raw.trim()),
                    }
                })?;
                fields.push(field);
            }

            if fields.len() != self.num_cols {
                return Err(StratumError::InvalidRow {
                    line: line_idx + 1,
                    reason: format!(
                        "expected {} fields, got {}",
                        self.num_cols,
                        fields.len()
                    ),
                });
            }

            rows.push(encode_row(&fields));
        }

        Ok(rows)
    }
}
