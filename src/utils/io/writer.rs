//! CSV and Parquet writers for generated datasets

use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use crate::error::util::safe_create_file;
use crate::error::{PhenoError, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// File format for generated datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Comma separated values with a header row
    #[default]
    Csv,
    /// Snappy-compressed Parquet
    Parquet,
}

impl OutputFormat {
    /// Conventional file extension
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }

    /// Guess the format from a path's extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for OutputFormat {
    type Err = PhenoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" | "pq" => Ok(Self::Parquet),
            other => Err(PhenoError::Config(format!("unknown output format '{other}'"))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Write a record batch as CSV with a header row
pub fn write_csv(batch: &RecordBatch, path: &Path) -> Result<()> {
    let start = Instant::now();
    log_operation_start("Writing CSV dataset", path);

    let file = safe_create_file(path, "CSV dataset")?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(batch)?;

    log_operation_complete("Wrote", path, batch.num_rows(), Some(start.elapsed()));
    Ok(())
}

/// Write a record batch as a Parquet file
pub fn write_parquet(batch: &RecordBatch, path: &Path) -> Result<()> {
    let start = Instant::now();
    log_operation_start("Writing Parquet dataset", path);

    let file = safe_create_file(path, "Parquet dataset")?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    log_operation_complete("Wrote", path, batch.num_rows(), Some(start.elapsed()));
    Ok(())
}

/// Write a record batch in the given format
pub fn write_batch(batch: &RecordBatch, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(batch, path),
        OutputFormat::Parquet => write_parquet(batch, path),
    }
}
