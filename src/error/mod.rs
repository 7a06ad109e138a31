//! Error handling for phenotype profile synthesis.

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

pub mod util;

/// Specialized error type for catalog loading, sampling and dataset generation
#[derive(Debug, thiserror::Error)]
pub enum PhenoError {
    /// The catalog holds no records for the requested disorder
    #[error("Unknown disorder: {0}")]
    UnknownDisorder(String),

    /// A required column is absent from the source table
    #[error("Column '{column}' not found in phenotype source")]
    MissingColumn { column: String },

    /// A source row could not be turned into a phenotype record
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// The source file extension is not one we can read
    #[error("Unsupported source format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Weighted draw or noise distribution rejected its parameters
    #[error("Sampling error: {0}")]
    Sampling(String),

    /// Configuration is out of range or inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error processing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error converting between Rust rows and Arrow batches
    #[error("Serde arrow error: {0}")]
    SerdeArrow(#[from] serde_arrow::Error),

    /// Error reading a JSON configuration file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A background loading task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(String),
}

impl PhenoError {
    /// Create an invalid-record error for the given source row
    pub fn invalid_record(row: usize, message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            row,
            message: message.into(),
        }
    }
}

impl From<rand::distr::weighted::Error> for PhenoError {
    fn from(error: rand::distr::weighted::Error) -> Self {
        Self::Sampling(error.to_string())
    }
}

impl From<rand_distr::NormalError> for PhenoError {
    fn from(error: rand_distr::NormalError) -> Self {
        Self::Sampling(error.to_string())
    }
}

impl From<tokio::task::JoinError> for PhenoError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::Task(error.to_string())
    }
}

/// Result type for phenotype synthesis operations
pub type Result<T> = std::result::Result<T, PhenoError>;
