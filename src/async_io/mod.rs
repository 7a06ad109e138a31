//! Async catalog loading
//!
//! Phenotype sources are parsed on the blocking pool, several files at a time,
//! and merged into one catalog in the order the paths were given.

use std::path::{Path, PathBuf};
use std::time::Instant;

use futures::stream::{self, StreamExt, TryStreamExt};
use itertools::Itertools;

use crate::catalog::PhenotypeCatalog;
use crate::error::Result;
use crate::loader::load_records;
use crate::models::PhenotypeRecord;
use crate::utils::logging::log_warning;

/// Load the records of one phenotype source without blocking the runtime
///
/// # Errors
/// Returns the loader's error for the file, or a `Task` error if the blocking
/// task panicked.
pub async fn load_records_async(path: &Path) -> Result<Vec<PhenotypeRecord>> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || load_records(&path)).await?
}

/// Load and merge several phenotype sources into one catalog
///
/// Up to `num_cpus` files are parsed concurrently. Records keep the order of
/// `paths`, then source row order.
///
/// # Errors
/// Fails on the first source that cannot be loaded.
pub async fn load_catalog_async(paths: &[PathBuf]) -> Result<PhenotypeCatalog> {
    let start = Instant::now();
    if paths.is_empty() {
        log_warning("No phenotype sources given; the catalog will be empty", None);
    }
    log::info!("Loading {} phenotype sources asynchronously", paths.len());

    let per_file: Vec<Vec<PhenotypeRecord>> = stream::iter(paths.iter().cloned())
        .map(|path| async move { load_records_async(&path).await })
        .buffered(num_cpus::get())
        .try_collect()
        .await?;

    let records = per_file.into_iter().flatten().collect_vec();
    let catalog = PhenotypeCatalog::new(records);

    log::info!(
        "Loaded {} phenotypes for {} disorders from {} sources in {:?}",
        catalog.len(),
        catalog.disorders().len(),
        paths.len(),
        start.elapsed()
    );
    Ok(catalog)
}
