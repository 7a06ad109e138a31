//! Utility functions for error handling
//!
//! Helpers that attach path context to file-system failures before they
//! reach the loader or the dataset writers.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{PhenoError, Result};

/// Open a source file, reporting which file and why it was needed on failure
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.is_file() {
        return Err(PhenoError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("File not found: {} (needed for: {purpose})", path.display()),
        )));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "Permission denied - check file permissions",
            _ => "Failed to open file",
        };
        PhenoError::Io(io::Error::new(
            e.kind(),
            format!("{context}: {} ({purpose}): {e}", path.display()),
        ))
    })
}

/// Create a file for writing, creating missing parent directories first
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            PhenoError::Io(io::Error::new(
                e.kind(),
                format!("Failed to create directory {} ({purpose}): {e}", parent.display()),
            ))
        })?;
    }

    fs::File::create(path).map_err(|e| {
        PhenoError::Io(io::Error::new(
            e.kind(),
            format!("Failed to create {} ({purpose}): {e}", path.display()),
        ))
    })
}
