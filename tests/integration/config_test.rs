use std::io::Write;

use pheno_synth::{GeneratorConfig, PhenoError, SamplingConfig};

/// Fields missing from the file keep their defaults
#[test]
fn test_partial_json_config_uses_defaults() -> pheno_synth::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("generator.json");
    let mut file = std::fs::File::create(&path)?;
    writeln!(file, r#"{{ "sampling": {{ "noise_ratio": 0.3 }}, "cohort": {{ "seed": 17 }} }}"#)?;

    let config = GeneratorConfig::from_json_file(&path)?;
    assert!((config.sampling.noise_ratio - 0.3).abs() < 1e-12);
    assert!((config.sampling.clamp_ratio - 0.8).abs() < 1e-12);
    assert_eq!(config.sampling.min_prerequisite_draws, 1);
    assert_eq!(config.cohort.seed, Some(17));
    assert_eq!(config.cohort.diagnosed_cutoff, 2);
    Ok(())
}

#[test]
fn test_invalid_ratio_is_rejected() -> pheno_synth::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("generator.json");
    std::fs::write(&path, r#"{ "sampling": { "clamp_ratio": 1.5 } }"#)?;

    let err = GeneratorConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, PhenoError::Config(_)));
    Ok(())
}

#[test]
fn test_malformed_json_is_reported() -> pheno_synth::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("generator.json");
    std::fs::write(&path, "{ not json")?;

    let err = GeneratorConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(err, PhenoError::Json(_)));
    Ok(())
}

#[test]
fn test_default_config_is_valid() {
    assert!(GeneratorConfig::default().validate().is_ok());

    let negative_noise = SamplingConfig {
        noise_ratio: -0.1,
        ..SamplingConfig::default()
    };
    assert!(negative_noise.validate().is_err());
}

#[test]
fn test_config_display_lists_settings() {
    let shown = GeneratorConfig::default().to_string();
    assert!(shown.contains("Clamp Ratio: 0.8"));
}
