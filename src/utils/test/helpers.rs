//! Test helper functions

use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashSet;

use crate::models::ProfileResult;

/// A deterministic generator for reproducible draws
#[must_use]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Assert that a profile's phenotype names are distinct and in discovery order
///
/// Every developmental name must come before every symptom name, and every
/// symptom name before every finding name, in `profile.phenotypes()`.
///
/// # Panics
/// Panics if a name appears twice or a later segment's name precedes an
/// earlier segment's name.
pub fn assert_discovery_order(profile: &ProfileResult) {
    let sequence: Vec<&str> = profile.phenotypes().collect();

    let mut seen = FxHashSet::default();
    for name in &sequence {
        assert!(seen.insert(*name), "phenotype '{name}' appears more than once in {sequence:?}");
    }

    let positions = |names: &[String]| -> Vec<usize> {
        names
            .iter()
            .filter_map(|name| sequence.iter().position(|item| *item == name.as_str()))
            .collect()
    };

    let segments = [profile.developmental(), profile.symptoms(), profile.findings()];
    for pair in segments.windows(2) {
        let earlier = positions(pair[0]);
        let later = positions(pair[1]);
        if let (Some(last), Some(first)) = (earlier.iter().max(), later.iter().min()) {
            assert!(last < first, "profile out of discovery order: {sequence:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordered_distinct_profile() {
        let profile = ProfileResult::builder(vec!["id".into()])
            .developmental(["d1"])
            .symptoms(["s1", "s2"])
            .findings(["f1"])
            .build();
        assert_discovery_order(&profile);
    }

    #[test]
    #[should_panic(expected = "appears more than once")]
    fn rejects_name_in_two_segments() {
        let profile = ProfileResult::builder(Vec::new())
            .symptoms(["f_x"])
            .findings(["f_x"])
            .build();
        assert_discovery_order(&profile);
    }
}
