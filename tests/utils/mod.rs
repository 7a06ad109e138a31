use std::path::{Path, PathBuf};

use pheno_synth::Result;
use pheno_synth::utils::test::write_source_csv;

/// Rows for two disorders, including a zero-probability and a redundant row
pub const TWO_DISORDER_ROWS: &[&str] = &[
    "Fabry disease,Angiokeratoma,S,0.6,N,,Skin",
    "Fabry disease,Burning pain in extremities,S,0.8,N,,Pain",
    "Fabry disease,Reduced sweating,D,0.5,N,,Skin",
    "Fabry disease,Proteinuria,F,0.4,Y,Pain,Renal",
    "Fabry disease,Never seen,S,0,N,,Skin",
    "Gaucher disease,Enlarged spleen,F,0.9,N,,Abdomen",
    "Gaucher disease,Bone pain,S,0.7,N,,Pain",
    "Gaucher disease,Easy bruising,S,0.5,N,,Blood",
    "Gaucher disease,Delayed growth,D,0.3,N,,Growth",
    "Gaucher disease,Duplicate bruising,R,0.5,N,,Blood",
];

/// Write the two-disorder source table into `dir`
pub fn two_disorder_source(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("phenotypes.csv");
    write_source_csv(&path, TWO_DISORDER_ROWS)?;
    Ok(path)
}

/// A cohort configuration suitable for tests: seeded and without progress bars
#[must_use]
pub fn quiet_cohort_config(seed: u64) -> pheno_synth::CohortConfig {
    pheno_synth::CohortConfig {
        seed: Some(seed),
        show_progress: false,
        ..pheno_synth::CohortConfig::default()
    }
}
