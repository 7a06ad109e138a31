//! Configuration for profile sampling and cohort generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::util::safe_open_file;
use crate::error::{PhenoError, Result};

/// Environment variable that overrides the cohort seed
pub const SEED_ENV_VAR: &str = "PHENO_SEED";

/// Configuration for the weighted sampler and prerequisite resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Standard deviation of the size noise, as a fraction of the expected size
    pub noise_ratio: f64,
    /// Fraction of an exhausted partition to draw when the noised size overshoots it
    pub clamp_ratio: f64,
    /// Lower bound on prerequisite symptoms drawn per gated finding (capped by pool size)
    pub min_prerequisite_draws: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            noise_ratio: 0.15,
            clamp_ratio: 0.8,
            min_prerequisite_draws: 1,
        }
    }
}

impl SamplingConfig {
    /// Check that all ratios are usable
    pub fn validate(&self) -> Result<()> {
        if !self.noise_ratio.is_finite() || self.noise_ratio < 0.0 {
            return Err(PhenoError::Config(format!(
                "noise_ratio must be a non-negative number, got {}",
                self.noise_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.clamp_ratio) {
            return Err(PhenoError::Config(format!(
                "clamp_ratio must lie in [0, 1], got {}",
                self.clamp_ratio
            )));
        }
        Ok(())
    }
}

/// Configuration for the lab-study and peer-matching cohort drivers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CohortConfig {
    /// Noise applied once per persona run to the target phenotype count
    pub phenotype_noise_ratio: f64,
    /// Users drawing `k <= diagnosed_cutoff` (k in 1..=10) carry their diagnosis
    pub diagnosed_cutoff: u32,
    /// Users drawing `k` above this keep only `early_stage_fraction` of their profile
    pub early_stage_cutoff: u32,
    /// Fraction of the profile kept by the earliest-stage users
    pub early_stage_fraction: f64,
    /// Users drawing `k` above this (and not early stage) keep `mid_stage_fraction`
    pub mid_stage_cutoff: u32,
    /// Fraction of the profile kept by mid-stage users
    pub mid_stage_fraction: f64,
    /// Seed for the master random number generator
    pub seed: Option<u64>,
    /// Whether to draw progress bars while generating
    pub show_progress: bool,
}

impl Default for CohortConfig {
    fn default() -> Self {
        Self {
            phenotype_noise_ratio: 0.1,
            diagnosed_cutoff: 2,
            early_stage_cutoff: 7,
            early_stage_fraction: 0.75,
            mid_stage_cutoff: 4,
            mid_stage_fraction: 0.85,
            seed: None,
            show_progress: true,
        }
    }
}

impl CohortConfig {
    /// Check that thresholds and fractions are consistent
    pub fn validate(&self) -> Result<()> {
        if !self.phenotype_noise_ratio.is_finite() || self.phenotype_noise_ratio < 0.0 {
            return Err(PhenoError::Config(format!(
                "phenotype_noise_ratio must be a non-negative number, got {}",
                self.phenotype_noise_ratio
            )));
        }
        for (name, fraction) in [
            ("early_stage_fraction", self.early_stage_fraction),
            ("mid_stage_fraction", self.mid_stage_fraction),
        ] {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(PhenoError::Config(format!(
                    "{name} must lie in [0, 1], got {fraction}"
                )));
            }
        }
        if self.mid_stage_cutoff > self.early_stage_cutoff {
            return Err(PhenoError::Config(format!(
                "mid_stage_cutoff ({}) must not exceed early_stage_cutoff ({})",
                self.mid_stage_cutoff, self.early_stage_cutoff
            )));
        }
        Ok(())
    }
}

/// Complete generator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Sampler settings
    pub sampling: SamplingConfig,
    /// Cohort driver settings
    pub cohort: CohortConfig,
}

impl GeneratorConfig {
    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "generator configuration")?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        log::info!("Loaded generator configuration from {}", path.display());
        Ok(config)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.sampling.validate()?;
        self.cohort.validate()
    }

    /// Apply the `PHENO_SEED` environment override, if set and numeric
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(seed) = seed_from_env() {
            self.cohort.seed = Some(seed);
        }
        self
    }
}

/// Helper function to get the cohort seed from the environment
#[must_use]
pub fn seed_from_env() -> Option<u64> {
    std::env::var(SEED_ENV_VAR)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
}

impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generator Configuration:")?;
        writeln!(f, "  Size Noise Ratio: {}", self.sampling.noise_ratio)?;
        writeln!(f, "  Clamp Ratio: {}", self.sampling.clamp_ratio)?;
        writeln!(
            f,
            "  Min Prerequisite Draws: {}",
            self.sampling.min_prerequisite_draws
        )?;
        writeln!(
            f,
            "  Persona Phenotype Noise: {}",
            self.cohort.phenotype_noise_ratio
        )?;
        writeln!(
            f,
            "  Diagnosed When k <= {}",
            self.cohort.diagnosed_cutoff
        )?;
        if let Some(seed) = self.cohort.seed {
            writeln!(f, "  Seed: {seed}")?;
        }
        Ok(())
    }
}
