//! StratumDB common types, errors, and utilities.
//!
//! This crate provides shared definitions used across all StratumDB components.

pub mod config;
pub mod error;
pub mod field;
pub mod region;

pub use config::{LayoutKind, TableConfig};
pub use error::{Result, StratumError};
pub use field::FIELD_LEN;
pub use region::MemoryRegion;
