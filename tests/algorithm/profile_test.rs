use pheno_synth::utils::test::{assert_discovery_order, reference_catalog, seeded_rng};
use pheno_synth::{
    DiscoveryCategory, PhenoError, PhenotypeCatalog, PhenotypeRecord, ProfileAssembler,
    SamplingConfig, Segment,
};
use rustc_hash::FxHashSet;

fn noiseless() -> SamplingConfig {
    SamplingConfig {
        noise_ratio: 0.0,
        ..SamplingConfig::default()
    }
}

/// Without noise the reference disorder yields a fixed profile shape
#[test]
fn test_reference_profile_without_noise() -> pheno_synth::Result<()> {
    let catalog = reference_catalog();
    let assembler = ProfileAssembler::new(&catalog, noiseless());

    let profile = assembler.assemble("D", 4, vec!["Ada".into(), "D".into()], &mut seeded_rng(3))?;

    assert_eq!(profile.identity(), &["Ada".to_string(), "D".to_string()]);
    assert_eq!(profile.developmental().len(), 1);
    assert_eq!(profile.findings(), &["f1".to_string()]);

    // s2 is already present, so the prerequisite for f1 adds nothing
    let mut symptoms = profile.symptoms().to_vec();
    symptoms.sort();
    assert_eq!(symptoms, vec!["s1".to_string(), "s2".to_string()]);
    assert_eq!(profile.phenotype_count(), 4);
    assert_discovery_order(&profile);
    Ok(())
}

/// A selected gated finding always comes with a matching presenting symptom
#[test]
fn test_gated_finding_brings_its_prerequisite() -> pheno_synth::Result<()> {
    let catalog = reference_catalog();
    let assembler = ProfileAssembler::new(&catalog, SamplingConfig::default());

    let mut with_finding = 0;
    for seed in 0..300 {
        let profile = assembler.assemble("D", 4, Vec::new(), &mut seeded_rng(seed))?;
        assert_discovery_order(&profile);

        if profile.findings().iter().any(|f| f == "f1") {
            with_finding += 1;
            assert_eq!(profile.segment_of("s2"), Some(Segment::Symptom), "seed {seed}");
        }
    }
    assert!(with_finding > 0);
    Ok(())
}

#[test]
fn test_profiles_never_repeat_a_phenotype() -> pheno_synth::Result<()> {
    let catalog = reference_catalog();
    let assembler = ProfileAssembler::new(&catalog, SamplingConfig::default());

    for seed in 0..300 {
        let profile = assembler.assemble("D", 8, Vec::new(), &mut seeded_rng(seed))?;
        let unique: FxHashSet<&str> = profile.phenotypes().collect();
        assert_eq!(unique.len(), profile.phenotype_count(), "seed {seed}: {profile}");
    }
    Ok(())
}

#[test]
fn test_same_seed_same_profile() -> pheno_synth::Result<()> {
    let catalog = reference_catalog();
    let assembler = ProfileAssembler::new(&catalog, SamplingConfig::default());

    let first = assembler.assemble("D", 6, vec!["id".into()], &mut seeded_rng(99))?;
    let second = assembler.assemble("D", 6, vec!["id".into()], &mut seeded_rng(99))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_identity_is_kept_for_empty_budget() -> pheno_synth::Result<()> {
    let catalog = reference_catalog();
    let assembler = ProfileAssembler::new(&catalog, SamplingConfig::default());

    let profile = assembler.assemble("D", 0, vec!["Ben".into()], &mut seeded_rng(5))?;
    assert_eq!(profile.to_vec(), vec!["Ben".to_string()]);
    assert_eq!(profile.phenotype_count(), 0);
    Ok(())
}

#[test]
fn test_unknown_disorder_is_rejected() {
    let catalog = reference_catalog();
    let assembler = ProfileAssembler::new(&catalog, SamplingConfig::default());

    let err = assembler
        .assemble("Not a disorder", 4, Vec::new(), &mut seeded_rng(1))
        .unwrap_err();
    assert!(matches!(err, PhenoError::UnknownDisorder(name) if name == "Not a disorder"));
}

#[test]
fn test_thread_rng_profile_is_well_formed() -> pheno_synth::Result<()> {
    let catalog = reference_catalog();
    let assembler = ProfileAssembler::new(&catalog, SamplingConfig::default());

    let profile = assembler.assemble_with_thread_rng("D", 4, vec!["Cy".into()])?;
    assert_eq!(profile.identity(), &["Cy".to_string()]);
    assert!(profile.phenotype_count() <= catalog.len());
    assert_discovery_order(&profile);
    Ok(())
}

/// An ungated finding sharing the prerequisite tag is never copied into the symptoms
#[test]
fn test_prerequisite_never_repeats_a_finding() -> pheno_synth::Result<()> {
    let catalog = PhenotypeCatalog::new(vec![
        PhenotypeRecord::new("D", "s1", DiscoveryCategory::Symptom, 1.0).with_category("Y"),
        PhenotypeRecord::new("D", "f_gated", DiscoveryCategory::Finding, 1.0)
            .with_category("Z")
            .with_prerequisite("X"),
        PhenotypeRecord::new("D", "f_x", DiscoveryCategory::Finding, 1.0).with_category("X"),
    ]);
    let assembler = ProfileAssembler::new(&catalog, SamplingConfig::default());

    for seed in 0..500 {
        let profile = assembler.assemble("D", 6, Vec::new(), &mut seeded_rng(seed))?;
        let unique: FxHashSet<&str> = profile.phenotypes().collect();
        assert_eq!(unique.len(), profile.phenotype_count(), "seed {seed}: {profile}");
        assert!(profile.symptoms().iter().all(|s| s != "f_x"), "seed {seed}: {profile}");
        assert_discovery_order(&profile);
    }
    Ok(())
}
