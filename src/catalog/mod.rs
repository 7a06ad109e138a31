//! Immutable phenotype catalog
//!
//! The catalog is built once from cleaned source records and then shared
//! read-only by every sampling call. Records are indexed by disorder so that
//! partition queries only touch the disorder's own rows.

use rustc_hash::FxHashMap;
use std::fmt;

use crate::error::{PhenoError, Result};
use crate::models::{CategoryTag, DiscoveryCategory, PhenotypeRecord};

/// Typed partition of a disorder's records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition<'a> {
    /// Records with the given discovery category
    Discovery(DiscoveryCategory),
    /// Records whose own category tag equals the given tag
    Category(&'a CategoryTag),
}

impl Partition<'_> {
    /// Whether a record belongs to this partition
    #[must_use]
    pub fn matches(&self, record: &PhenotypeRecord) -> bool {
        match self {
            Self::Discovery(category) => record.discovery == *category,
            Self::Category(tag) => record.category.as_ref() == Some(*tag),
        }
    }
}

impl fmt::Display for Partition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovery(category) => write!(f, "discovery={}", category.code()),
            Self::Category(tag) => write!(f, "category={tag}"),
        }
    }
}

/// Read-only collection of sampleable phenotype records
#[derive(Debug, Clone, Default)]
pub struct PhenotypeCatalog {
    records: Vec<PhenotypeRecord>,
    /// Record positions per disorder, in source order
    by_disorder: FxHashMap<String, Vec<usize>>,
    /// Disorders in order of first appearance
    disorders: Vec<String>,
}

impl PhenotypeCatalog {
    /// Build a catalog, dropping redundant and zero-probability records
    #[must_use]
    pub fn new(records: impl IntoIterator<Item = PhenotypeRecord>) -> Self {
        let mut catalog = Self::default();
        let mut dropped = 0usize;

        for record in records {
            if !record.is_sampleable() {
                dropped += 1;
                continue;
            }
            let idx = catalog.records.len();
            match catalog.by_disorder.get_mut(&record.disorder) {
                Some(positions) => positions.push(idx),
                None => {
                    catalog.disorders.push(record.disorder.clone());
                    catalog.by_disorder.insert(record.disorder.clone(), vec![idx]);
                }
            }
            catalog.records.push(record);
        }

        if dropped > 0 {
            log::debug!("Dropped {dropped} unsampleable records while building catalog");
        }
        catalog
    }

    /// Number of records in the catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Disorders in the order they first appear in the source
    #[must_use]
    pub fn disorders(&self) -> &[String] {
        &self.disorders
    }

    /// Whether the catalog has records for the disorder
    #[must_use]
    pub fn contains_disorder(&self, disorder: &str) -> bool {
        self.by_disorder.contains_key(disorder)
    }

    /// All records of a disorder
    pub fn disorder_records(&self, disorder: &str) -> Result<Vec<&PhenotypeRecord>> {
        let positions = self
            .by_disorder
            .get(disorder)
            .ok_or_else(|| PhenoError::UnknownDisorder(disorder.to_string()))?;
        Ok(positions.iter().map(|&i| &self.records[i]).collect())
    }

    /// Records of a disorder belonging to the given partition
    pub fn records_for(
        &self,
        disorder: &str,
        partition: Partition<'_>,
    ) -> Result<Vec<&PhenotypeRecord>> {
        let mut records = self.disorder_records(disorder)?;
        records.retain(|record| partition.matches(record));
        Ok(records)
    }

    /// Sum of weights across every category of a disorder
    pub fn total_weight(&self, disorder: &str) -> Result<f64> {
        Ok(self
            .disorder_records(disorder)?
            .iter()
            .map(|record| record.probability)
            .sum())
    }

    /// Look up a single record by disorder and name
    #[must_use]
    pub fn find(&self, disorder: &str, name: &str) -> Option<&PhenotypeRecord> {
        self.by_disorder
            .get(disorder)?
            .iter()
            .map(|&i| &self.records[i])
            .find(|record| record.name == name)
    }

    /// Sub-catalog of records that need no presenting symptom
    ///
    /// Prerequisite symptoms are drawn from this view, so a drawn prerequisite
    /// is never itself gated.
    #[must_use]
    pub fn ungated(&self) -> Self {
        Self::new(
            self.records
                .iter()
                .filter(|record| !record.needs_prerequisite())
                .cloned(),
        )
    }

    /// Iterate over every record
    pub fn iter(&self) -> impl Iterator<Item = &PhenotypeRecord> {
        self.records.iter()
    }
}

impl FromIterator<PhenotypeRecord> for PhenotypeCatalog {
    fn from_iter<T: IntoIterator<Item = PhenotypeRecord>>(iter: T) -> Self {
        Self::new(iter)
    }
}
