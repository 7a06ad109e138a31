//! Profile assembly
//!
//! Builds one synthetic case: developmental traits, symptoms and findings are
//! sampled against a shared phenotype budget, gated findings pull in their
//! presenting symptoms, and the result is laid out in discovery order behind
//! the caller's identity fields.

use rand::Rng;

use crate::algorithm::profile::PrerequisiteResolver;
use crate::algorithm::sampling::WeightedSampler;
use crate::catalog::{Partition, PhenotypeCatalog};
use crate::config::SamplingConfig;
use crate::error::Result;
use crate::models::{DiscoveryCategory, PhenotypeRecord, ProfileResult};

/// Assembles ordered phenotype profiles from a shared catalog
#[derive(Debug, Clone)]
pub struct ProfileAssembler<'c> {
    catalog: &'c PhenotypeCatalog,
    sampler: WeightedSampler,
    resolver: PrerequisiteResolver,
}

impl<'c> ProfileAssembler<'c> {
    /// Create an assembler over a catalog
    #[must_use]
    pub fn new(catalog: &'c PhenotypeCatalog, config: SamplingConfig) -> Self {
        Self {
            catalog,
            sampler: WeightedSampler::new(config),
            resolver: PrerequisiteResolver::new(catalog),
        }
    }

    /// The catalog profiles are drawn from
    #[must_use]
    pub const fn catalog(&self) -> &'c PhenotypeCatalog {
        self.catalog
    }

    /// The sampler shared by every category
    #[must_use]
    pub const fn sampler(&self) -> &WeightedSampler {
        &self.sampler
    }

    /// Assemble one profile
    ///
    /// # Arguments
    /// * `disorder` - Disorder to draw phenotypes for
    /// * `target_count` - Phenotype budget shared by all three categories
    /// * `identity` - Fields placed unchanged in front of the phenotypes
    /// * `rng` - Random number generator
    ///
    /// # Errors
    /// Returns `UnknownDisorder` if the catalog has no records for `disorder`
    pub fn assemble<R>(
        &self,
        disorder: &str,
        target_count: usize,
        identity: Vec<String>,
        rng: &mut R,
    ) -> Result<ProfileResult>
    where
        R: Rng + ?Sized,
    {
        let total_weight = self.catalog.total_weight(disorder)?;

        let findings = self.sample_category(
            disorder,
            DiscoveryCategory::Finding,
            total_weight,
            target_count,
            rng,
        )?;
        let mut symptoms = self.sample_category(
            disorder,
            DiscoveryCategory::Symptom,
            total_weight,
            target_count,
            rng,
        )?;
        let developmental = self.sample_category(
            disorder,
            DiscoveryCategory::Developmental,
            total_weight,
            target_count,
            rng,
        )?;

        let present: Vec<&PhenotypeRecord> =
            symptoms.iter().chain(&developmental).copied().collect();
        let injected = self.resolver.resolve(
            &self.sampler,
            disorder,
            &findings,
            &present,
            target_count,
            rng,
        )?;
        symptoms.extend(injected);

        log::debug!(
            "Assembled {disorder} profile: {} developmental, {} symptoms, {} findings",
            developmental.len(),
            symptoms.len(),
            findings.len()
        );

        Ok(ProfileResult::builder(identity)
            .developmental(names(&developmental))
            .symptoms(names(&symptoms))
            .findings(names(&findings))
            .build())
    }

    /// Assemble one profile using the thread-local generator
    pub fn assemble_with_thread_rng(
        &self,
        disorder: &str,
        target_count: usize,
        identity: Vec<String>,
    ) -> Result<ProfileResult> {
        self.assemble(disorder, target_count, identity, &mut rand::rng())
    }

    fn sample_category<R>(
        &self,
        disorder: &str,
        category: DiscoveryCategory,
        total_weight: f64,
        target_count: usize,
        rng: &mut R,
    ) -> Result<Vec<&'c PhenotypeRecord>>
    where
        R: Rng + ?Sized,
    {
        let partition = self
            .catalog
            .records_for(disorder, Partition::Discovery(category))?;
        self.sampler
            .sample(&partition, total_weight, target_count, rng)
    }
}

fn names<'a>(records: &'a [&PhenotypeRecord]) -> impl Iterator<Item = &'a str> {
    records.iter().map(|record| record.name.as_str())
}
