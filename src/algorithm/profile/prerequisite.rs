//! Presenting-symptom resolution for gated findings
//!
//! Some findings are only revealed by an investigation that a clinician would
//! order after seeing a particular kind of symptom. For each such finding in a
//! profile we draw one or more symptoms of that kind so the case reads as a
//! plausible diagnostic journey.

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::algorithm::sampling::WeightedSampler;
use crate::catalog::{Partition, PhenotypeCatalog};
use crate::error::Result;
use crate::models::PhenotypeRecord;

/// Draws presenting symptoms for findings that need one
#[derive(Debug, Clone)]
pub struct PrerequisiteResolver {
    /// Records that are not themselves gated; chains are one level deep
    pool: PhenotypeCatalog,
}

impl PrerequisiteResolver {
    /// Build the resolver's candidate pool from a catalog
    #[must_use]
    pub fn new(catalog: &PhenotypeCatalog) -> Self {
        Self {
            pool: catalog.ungated(),
        }
    }

    /// The ungated candidate pool
    #[must_use]
    pub const fn pool(&self) -> &PhenotypeCatalog {
        &self.pool
    }

    /// Draw presenting symptoms for every gated finding
    ///
    /// # Arguments
    /// * `sampler` - Sampler used for the draws
    /// * `disorder` - Disorder the profile is built for
    /// * `findings` - Findings already selected for the profile
    /// * `present` - Phenotypes already in the profile (symptoms and developmental traits)
    /// * `target_count` - Same sizing basis as the original request
    /// * `rng` - Random number generator
    ///
    /// # Returns
    /// Newly injected symptoms, each absent from `present`, from `findings` and from each other
    pub fn resolve<'p, R>(
        &'p self,
        sampler: &WeightedSampler,
        disorder: &str,
        findings: &[&PhenotypeRecord],
        present: &[&PhenotypeRecord],
        target_count: usize,
        rng: &mut R,
    ) -> Result<Vec<&'p PhenotypeRecord>>
    where
        R: Rng + ?Sized,
    {
        let mut injected = Vec::new();
        let gated = findings.iter().filter_map(|finding| finding.prerequisite.as_ref());

        // Every record of this disorder may be gated, leaving no candidates
        if !self.pool.contains_disorder(disorder) {
            return Ok(injected);
        }
        let total_weight = self.pool.total_weight(disorder)?;

        // Findings count as present too; a finding can carry a prerequisite tag itself
        let mut seen: FxHashSet<&str> = present
            .iter()
            .chain(findings)
            .map(|record| record.name.as_str())
            .collect();
        let minimum = sampler.config().min_prerequisite_draws;

        for prerequisite in gated {
            let candidates = self
                .pool
                .records_for(disorder, Partition::Category(prerequisite))?;
            let drawn =
                sampler.sample_at_least(&candidates, total_weight, target_count, minimum, rng)?;

            log::debug!(
                "Drew {} of {} '{prerequisite}' presenting symptoms for {disorder}",
                drawn.len(),
                candidates.len()
            );

            for symptom in drawn {
                if seen.insert(symptom.name.as_str()) {
                    injected.push(symptom);
                }
            }
        }

        Ok(injected)
    }
}
