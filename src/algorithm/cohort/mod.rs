//! Cohort drivers
//!
//! Both drivers call the profile assembler repeatedly. The lab-study driver
//! produces three-round games per participant; the peer-matching driver
//! produces a pool of partially diagnosed users.

pub mod names;
pub mod personas;
pub mod users;

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::Result;

pub use names::{BuiltinNames, NameList, NameSource};
pub use personas::{PersonaDataset, PersonaGame, Website, generate_timeseries_personas};
pub use users::{DiagnosisStage, PeerUser, UserDataset, generate_users};

/// Split a sequence into `parts` contiguous chunks whose sizes differ by at most one
///
/// The first `len % parts` chunks receive the extra item.
#[must_use]
pub fn split_even<T>(items: &[T], parts: usize) -> Vec<&[T]> {
    if parts == 0 {
        return Vec::new();
    }
    let base = items.len() / parts;
    let extra = items.len() % parts;
    let mut chunks = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let end = start + base + usize::from(i < extra);
        chunks.push(&items[start..end]);
        start = end;
    }
    chunks
}

/// Round `count * fraction` half-to-even
#[must_use]
pub fn scaled_len(count: usize, fraction: f64) -> usize {
    (count as f64 * fraction).round_ties_even().max(0.0) as usize
}

/// Perturb a phenotype budget with normal noise, rounding half-to-even and clamping at zero
pub fn noisy_count<R>(count: usize, noise_ratio: f64, rng: &mut R) -> Result<usize>
where
    R: Rng + ?Sized,
{
    let mean = count as f64;
    let noise = Normal::new(mean, mean * noise_ratio)?;
    Ok(noise.sample(rng).round_ties_even().max(0.0) as usize)
}
