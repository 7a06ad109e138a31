//! Synthetic patient-profile generation from phenotype frequency tables.
//!
//! A catalog of phenotypes per disorder is sampled by weight, findings that
//! need a presenting symptom get one injected, and the result is ordered by
//! discovery stage. Cohort drivers build lab-study personas and a
//! peer-matching user pool on top of that.

pub mod algorithm;
pub mod async_io;
pub mod catalog;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use catalog::{Partition, PhenotypeCatalog};
pub use config::{CohortConfig, GeneratorConfig, SamplingConfig};
pub use error::{PhenoError, Result};
pub use models::{CategoryTag, DiscoveryCategory, PhenotypeRecord, ProfileResult, Segment};

// Algorithms
pub use algorithm::cohort::{
    BuiltinNames, NameList, NameSource, PersonaDataset, UserDataset,
    generate_timeseries_personas, generate_users,
};
pub use algorithm::profile::{PrerequisiteResolver, ProfileAssembler};
pub use algorithm::sampling::WeightedSampler;

// Loading and output
pub use async_io::load_catalog_async;
pub use loader::{load_catalog, load_catalog_from_batches};
pub use utils::io::{OutputFormat, write_batch};

// Arrow types
pub use arrow::record_batch::RecordBatch;
