//! Weighted sampling of phenotype partitions
//!
//! A partition's share of a profile follows its share of the disorder's total
//! weight. The expected size is perturbed with normal noise to model variation
//! between patients, then that many records are drawn without replacement with
//! probability proportional to their weight.

use rand::Rng;
use rand::seq::IndexedRandom;
use rand_distr::{Distribution, Normal};

use crate::config::SamplingConfig;
use crate::error::{PhenoError, Result};
use crate::models::PhenotypeRecord;

/// Noised, size-policed weighted sampler
#[derive(Debug, Clone, Default)]
pub struct WeightedSampler {
    config: SamplingConfig,
}

impl WeightedSampler {
    /// Create a sampler with the given configuration
    #[must_use]
    pub const fn new(config: SamplingConfig) -> Self {
        Self { config }
    }

    /// The sampler's configuration
    #[must_use]
    pub const fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Sample a partition in proportion to its weight
    ///
    /// # Arguments
    /// * `records` - The partition to draw from
    /// * `total_weight` - Normalization denominator (weight of the whole disorder)
    /// * `target_count` - Phenotype count the whole profile is sized against
    /// * `rng` - Random number generator
    ///
    /// # Returns
    /// Distinct records, at most `records.len()` of them
    pub fn sample<'a, R>(
        &self,
        records: &[&'a PhenotypeRecord],
        total_weight: f64,
        target_count: usize,
        rng: &mut R,
    ) -> Result<Vec<&'a PhenotypeRecord>>
    where
        R: Rng + ?Sized,
    {
        self.sample_at_least(records, total_weight, target_count, 0, rng)
    }

    /// Sample a partition, drawing no fewer than `minimum` records when it has them
    pub fn sample_at_least<'a, R>(
        &self,
        records: &[&'a PhenotypeRecord],
        total_weight: f64,
        target_count: usize,
        minimum: usize,
        rng: &mut R,
    ) -> Result<Vec<&'a PhenotypeRecord>>
    where
        R: Rng + ?Sized,
    {
        // Empty partitions contribute nothing
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let expected = expected_size(records, total_weight, target_count)?;
        let size = self
            .noisy_size(expected, records.len(), rng)?
            .max(minimum)
            .min(records.len());

        draw_without_replacement(records, size, rng)
    }

    /// Perturb an expected size and police it against the partition size
    ///
    /// The noised value is rounded half-to-even. Values at or below zero become
    /// zero; values above `available` fall back to `clamp_ratio * available`.
    pub fn noisy_size<R>(&self, expected: f64, available: usize, rng: &mut R) -> Result<usize>
    where
        R: Rng + ?Sized,
    {
        let noise = Normal::new(expected, expected.abs() * self.config.noise_ratio)?;
        let drawn = noise.sample(rng).round_ties_even();

        if drawn <= 0.0 {
            if drawn < 0.0 {
                log::debug!("Clamped negative sample size {drawn} (expected {expected:.3}) to zero");
            }
            return Ok(0);
        }

        if drawn > available as f64 {
            let clamped = (available as f64 * self.config.clamp_ratio).round_ties_even() as usize;
            log::debug!(
                "Sample size {drawn} exceeds {available} available records, drawing {clamped}"
            );
            return Ok(clamped);
        }

        Ok(drawn as usize)
    }
}

/// Expected number of records for a partition: `target * subset_weight / total_weight`
pub fn expected_size(
    records: &[&PhenotypeRecord],
    total_weight: f64,
    target_count: usize,
) -> Result<f64> {
    if !total_weight.is_finite() || total_weight <= 0.0 {
        return Err(PhenoError::Sampling(format!(
            "total weight must be positive, got {total_weight}"
        )));
    }
    let proportion = subset_weight(records) / total_weight;
    Ok(target_count as f64 * proportion)
}

/// Sum of the records' weights
#[must_use]
pub fn subset_weight(records: &[&PhenotypeRecord]) -> f64 {
    records.iter().map(|record| record.probability).sum()
}

/// Selection probabilities for a partition; these sum to one for a non-empty partition
#[must_use]
pub fn normalized_weights(records: &[&PhenotypeRecord]) -> Vec<f64> {
    let total = subset_weight(records);
    records
        .iter()
        .map(|record| record.probability / total)
        .collect()
}

/// Draw `size` distinct records with probability proportional to their normalized weight
pub fn draw_without_replacement<'a, R>(
    records: &[&'a PhenotypeRecord],
    size: usize,
    rng: &mut R,
) -> Result<Vec<&'a PhenotypeRecord>>
where
    R: Rng + ?Sized,
{
    if size == 0 || records.is_empty() {
        return Ok(Vec::new());
    }
    let total = subset_weight(records);
    let drawn = records
        .choose_multiple_weighted(rng, size.min(records.len()), |record| {
            record.probability / total
        })?
        .copied()
        .collect();
    Ok(drawn)
}
