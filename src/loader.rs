//! Phenotype source loading
//!
//! Reads the phenotype frequency table from CSV or Parquet into Arrow record
//! batches, cleans it (zero-probability and redundant rows are dropped) and
//! builds a [`PhenotypeCatalog`].

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::PhenotypeCatalog;
use crate::error::util::safe_open_file;
use crate::error::{PhenoError, Result};
use crate::models::{CategoryTag, DiscoveryCategory, PhenotypeRecord};
use crate::utils::arrow::{extract_f64_column, extract_string_column};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_row_warning};

/// Column names of the phenotype source table
pub mod columns {
    /// Disorder name
    pub const DISORDER: &str = "disorder";
    /// Phenotype name as shown to users
    pub const PHENOTYPE: &str = "patient_name";
    /// Discovery group code (F, S, D or R)
    pub const DISCOVERY_GROUP: &str = "discovery_group";
    /// Relative frequency within the disorder
    pub const PROBABILITY: &str = "probability";
    /// Y when a presenting symptom must precede the finding
    pub const PREREQUISITE_NEEDED: &str = "prerequisite_needed";
    /// Category of the presenting symptom
    pub const PREREQUISITE_TYPE: &str = "prerequisite_type";
    /// Phenotype category of the record itself
    pub const CATEGORY: &str = "HPO_category";
}

/// Number of CSV rows inspected to discover column names
const CSV_INFER_RECORDS: usize = 16;

/// Load a phenotype catalog from a CSV or Parquet file
///
/// # Errors
/// Returns `UnsupportedFormat` for other extensions, `MissingColumn` when a
/// required column is absent and `InvalidRecord` for rows that cannot be parsed.
pub fn load_catalog(path: &Path) -> Result<PhenotypeCatalog> {
    let records = load_records(path)?;
    let catalog = PhenotypeCatalog::new(records);
    log::info!(
        "Built catalog with {} phenotypes across {} disorders",
        catalog.len(),
        catalog.disorders().len()
    );
    Ok(catalog)
}

/// Load cleaned phenotype records from a CSV or Parquet file
pub fn load_records(path: &Path) -> Result<Vec<PhenotypeRecord>> {
    let start = Instant::now();
    log_operation_start("Loading phenotype source", path);

    let batches = match source_extension(path).as_deref() {
        Some("csv") => read_csv(path)?,
        Some("parquet") => read_parquet(path)?,
        _ => return Err(PhenoError::UnsupportedFormat(path.to_path_buf())),
    };

    let records = records_from_batches(&batches)?;
    log_operation_complete("Loaded", path, records.len(), Some(start.elapsed()));
    Ok(records)
}

/// Build a catalog from already-read record batches
pub fn load_catalog_from_batches(batches: &[RecordBatch]) -> Result<PhenotypeCatalog> {
    Ok(PhenotypeCatalog::new(records_from_batches(batches)?))
}

fn source_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Read a CSV source with every column as text
///
/// Column names come from the header row; types are not inferred so that
/// codes like `F` or `N` and blank cells read back exactly as written.
pub fn read_csv(path: &Path) -> Result<Vec<RecordBatch>> {
    let mut file = safe_open_file(path, "phenotype source")?;
    let (inferred, _) = Format::default()
        .with_header(true)
        .infer_schema(&mut file, Some(CSV_INFER_RECORDS))?;
    file.rewind()?;

    let schema = Schema::new(
        inferred
            .fields()
            .iter()
            .map(|field| Field::new(field.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    );
    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_header(true)
        .build(file)?;

    Ok(reader.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Read a Parquet source into record batches
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>> {
    let file = safe_open_file(path, "phenotype source")?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    Ok(reader.collect::<std::result::Result<Vec<_>, _>>()?)
}

/// Convert source batches into cleaned records
///
/// Row numbers in errors count data rows from zero across all batches.
pub fn records_from_batches(batches: &[RecordBatch]) -> Result<Vec<PhenotypeRecord>> {
    let mut records = Vec::new();
    let mut offset = 0;
    let mut skipped = 0;

    for batch in batches {
        for record in parse_batch(batch, offset)? {
            match record {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }
        offset += batch.num_rows();
    }

    if skipped > 0 {
        log::info!("Dropped {skipped} zero-probability or redundant phenotype rows");
    }
    Ok(records)
}

/// Parse one batch; `None` marks rows removed by cleaning
fn parse_batch(batch: &RecordBatch, offset: usize) -> Result<Vec<Option<PhenotypeRecord>>> {
    let disorders = extract_string_column(batch, columns::DISORDER, true)?;
    let names = extract_string_column(batch, columns::PHENOTYPE, true)?;
    let groups = extract_string_column(batch, columns::DISCOVERY_GROUP, true)?;
    let probabilities = extract_f64_column(batch, columns::PROBABILITY, true)?;
    let needed = extract_string_column(batch, columns::PREREQUISITE_NEEDED, false)?;
    let prerequisite_types = extract_string_column(batch, columns::PREREQUISITE_TYPE, false)?;
    let categories = extract_string_column(batch, columns::CATEGORY, false)?;

    let mut parsed = Vec::with_capacity(batch.num_rows());
    for i in 0..batch.num_rows() {
        let row = offset + i;

        let probability = probabilities[i]
            .ok_or_else(|| PhenoError::invalid_record(row, "probability is missing or not numeric"))?;
        let group = groups[i]
            .as_deref()
            .ok_or_else(|| PhenoError::invalid_record(row, "discovery group is missing"))?;
        let discovery = DiscoveryCategory::from_code(group).ok_or_else(|| {
            PhenoError::invalid_record(row, format!("unknown discovery group '{group}'"))
        })?;

        if probability == 0.0 || discovery == DiscoveryCategory::Redundant {
            parsed.push(None);
            continue;
        }

        let disorder = disorders[i]
            .clone()
            .ok_or_else(|| PhenoError::invalid_record(row, "disorder is missing"))?;
        let name = names[i]
            .clone()
            .ok_or_else(|| PhenoError::invalid_record(row, "phenotype name is missing"))?;

        let gated = needed[i]
            .as_deref()
            .is_some_and(|flag| flag.eq_ignore_ascii_case("Y"));
        let prerequisite = if gated {
            match prerequisite_types[i].as_deref() {
                Some(kind) => Some(CategoryTag::new(kind)),
                None => {
                    log_row_warning(row, &name, "needs a prerequisite but names no type; treating as ungated");
                    None
                }
            }
        } else {
            None
        };

        parsed.push(Some(PhenotypeRecord {
            disorder,
            name,
            discovery,
            probability,
            category: categories[i].as_deref().map(CategoryTag::new),
            prerequisite,
        }));
    }

    Ok(parsed)
}
