//! Synthetic user pool for the peer-matching algorithm
//!
//! Most users are undiagnosed, and users earlier in their diagnostic journey
//! have only discovered part of their profile. Users are generated in
//! parallel; each one draws from its own generator seeded by the caller's, so
//! a fixed master seed reproduces the whole pool.

use arrow::array::{ArrayRef, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::Arc;

use super::names::NameSource;
use super::scaled_len;
use crate::algorithm::profile::ProfileAssembler;
use crate::config::CohortConfig;
use crate::error::Result;
use crate::utils::logging::{create_main_progress_bar, finish_progress_bar};

/// Diagnosis label carried by users who have not been diagnosed
pub const UNDIAGNOSED: &str = "undiagnosed";

/// How far along their diagnostic journey a user is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosisStage {
    /// Full profile discovered
    Complete,
    /// Most of the profile discovered
    Mid,
    /// Only the earlier part of the profile discovered
    Early,
}

impl DiagnosisStage {
    /// Stage for a draw `k` in `1..=10`
    #[must_use]
    pub const fn from_draw(k: u32, config: &CohortConfig) -> Self {
        if k > config.early_stage_cutoff {
            Self::Early
        } else if k > config.mid_stage_cutoff {
            Self::Mid
        } else {
            Self::Complete
        }
    }

    /// Fraction of the profile kept at this stage
    #[must_use]
    pub const fn kept_fraction(self, config: &CohortConfig) -> f64 {
        match self {
            Self::Complete => 1.0,
            Self::Mid => config.mid_stage_fraction,
            Self::Early => config.early_stage_fraction,
        }
    }
}

/// One synthetic peer-matching user
#[derive(Debug, Clone, PartialEq)]
pub struct PeerUser {
    /// Disorder the profile was drawn from
    pub disorder: String,
    /// Whether the user's diagnosis is visible
    pub diagnosed: bool,
    /// Diagnostic stage, which decides how much of the profile is kept
    pub stage: DiagnosisStage,
    /// Name, diagnosis label, then discovered phenotypes in order
    pub entries: Vec<String>,
}

impl PeerUser {
    /// The user's first name
    #[must_use]
    pub fn name(&self) -> &str {
        self.entries.first().map_or("", String::as_str)
    }

    /// Discovered phenotypes, without the identity prefix
    #[must_use]
    pub fn phenotypes(&self) -> &[String] {
        self.entries.get(2..).unwrap_or_default()
    }
}

/// All generated users
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDataset {
    /// Users ordered by repetition, then disorder
    pub users: Vec<PeerUser>,
}

impl UserDataset {
    /// Number of users
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users were generated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Length of the longest user row
    #[must_use]
    pub fn max_width(&self) -> usize {
        self.users.iter().map(|u| u.entries.len()).max().unwrap_or(0)
    }

    /// Column names for a table of the given width
    #[must_use]
    pub fn column_names(width: usize) -> Vec<String> {
        (0..width)
            .map(|i| match i {
                0 => "name".to_string(),
                1 => "diagnosis".to_string(),
                _ => format!("phenotype_{}", i - 1),
            })
            .collect()
    }

    /// Convert the users to a record batch, padding short rows with nulls
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let width = self.max_width();
        let names = Self::column_names(width);

        let mut fields = Vec::with_capacity(width);
        let mut columns: Vec<ArrayRef> = Vec::with_capacity(width);
        for (col, name) in names.iter().enumerate() {
            let mut builder = StringBuilder::with_capacity(self.users.len(), self.users.len() * 16);
            for user in &self.users {
                builder.append_option(user.entries.get(col));
            }
            fields.push(Field::new(name, DataType::Utf8, col >= 2));
            columns.push(Arc::new(builder.finish()));
        }

        Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
    }
}

struct UserJob<'d> {
    disorder: &'d str,
    seed: u64,
}

/// Generate the peer-matching user pool
///
/// For every repetition and every disorder one user is drawn. A draw `k` in
/// `1..=10` decides both whether the diagnosis is visible and how much of the
/// profile (identity fields included) is kept.
pub fn generate_users<N, R>(
    assembler: &ProfileAssembler<'_>,
    disorders: &[String],
    total_phenotypes: usize,
    users_per_disorder: usize,
    names: &N,
    config: &CohortConfig,
    rng: &mut R,
) -> Result<UserDataset>
where
    N: NameSource + Sync,
    R: Rng + ?Sized,
{
    let jobs: Vec<UserJob<'_>> = (0..users_per_disorder)
        .flat_map(|_| disorders.iter())
        .map(|disorder| UserJob {
            disorder: disorder.as_str(),
            seed: rng.random(),
        })
        .collect();

    log::info!(
        "Generating {} users ({users_per_disorder} per disorder, {} disorders)",
        jobs.len(),
        disorders.len()
    );

    let progress = if config.show_progress {
        create_main_progress_bar(jobs.len() as u64, Some("Generating users"))
    } else {
        indicatif::ProgressBar::hidden()
    };

    let users = jobs
        .par_iter()
        .map(|job| {
            let user = generate_user(assembler, job, total_phenotypes, names, config);
            progress.inc(1);
            user
        })
        .collect::<Result<Vec<_>>>()?;

    finish_progress_bar(&progress, Some("Users generated"));
    log::info!(
        "Generated {} users, {} diagnosed",
        users.len(),
        users.iter().filter(|u| u.diagnosed).count()
    );
    Ok(UserDataset { users })
}

fn generate_user<N>(
    assembler: &ProfileAssembler<'_>,
    job: &UserJob<'_>,
    total_phenotypes: usize,
    names: &N,
    config: &CohortConfig,
) -> Result<PeerUser>
where
    N: NameSource,
{
    let mut rng = StdRng::seed_from_u64(job.seed);
    let k: u32 = rng.random_range(1..=10);
    let diagnosed = k <= config.diagnosed_cutoff;

    let name = names.first_name(&mut rng);
    let label = if diagnosed { job.disorder } else { UNDIAGNOSED };
    let profile = assembler.assemble(
        job.disorder,
        total_phenotypes,
        vec![name, label.to_string()],
        &mut rng,
    )?;

    let stage = DiagnosisStage::from_draw(k, config);
    let mut entries = profile.into_vec();
    let kept = scaled_len(entries.len(), stage.kept_fraction(config));
    entries.truncate(kept);

    Ok(PeerUser {
        disorder: job.disorder.to_string(),
        diagnosed,
        stage,
        entries,
    })
}
