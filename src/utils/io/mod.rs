//! Dataset output
//!
//! Generated datasets are written as CSV or Parquet from Arrow record batches.

pub mod writer;

pub use writer::{OutputFormat, write_batch, write_csv, write_parquet};
