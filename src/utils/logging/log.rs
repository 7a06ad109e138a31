//! Structured log lines for loading and writing phenotype data

use std::path::Path;
use std::time::Duration;

/// Log the start of a file operation
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{operation}: {}", path.display());
}

/// Log a finished file operation and how many records it touched
///
/// # Arguments
/// * `operation` - Past-tense verb, e.g. "Loaded" or "Wrote"
/// * `path` - File the records came from or went to
/// * `records` - Number of records
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    records: usize,
    elapsed: Option<Duration>,
) {
    match elapsed {
        Some(elapsed) => {
            log::info!("{operation} {records} records ({}) in {elapsed:.2?}", path.display());
        }
        None => log::info!("{operation} {records} records ({})", path.display()),
    }
}

/// Log a source row that loading had to reinterpret
pub fn log_row_warning(row: usize, phenotype: &str, message: &str) {
    log::warn!("Row {row} ({phenotype}): {message}");
}

/// Log a warning, optionally tied to a path
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{message}: {}", path.display()),
        None => log::warn!("{message}"),
    }
}
