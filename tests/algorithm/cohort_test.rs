use pheno_synth::algorithm::cohort::personas::{ROUNDS_PER_GAME, website_order};
use pheno_synth::algorithm::cohort::users::{DiagnosisStage, UNDIAGNOSED};
use pheno_synth::utils::test::{reference_catalog, seeded_rng};
use pheno_synth::{
    BuiltinNames, NameList, PhenoError, ProfileAssembler, SamplingConfig,
    generate_timeseries_personas, generate_users,
};

use crate::utils::quiet_cohort_config;

fn disorders(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

/// Every participant gets one game per disorder on the expected websites
#[test]
fn test_personas_cover_participants_and_websites() -> pheno_synth::Result<()> {
    let catalog = reference_catalog();
    let assembler = ProfileAssembler::new(&catalog, SamplingConfig::default());
    let config = quiet_cohort_config(1);

    let dataset = generate_timeseries_personas(
        &assembler,
        &disorders(&["D"]),
        4,
        6,
        &config,
        &mut seeded_rng(1),
    )?;

    assert_eq!(dataset.len(), 6);
    for (participant, game) in dataset.games.iter().enumerate() {
        assert_eq!(game.participant_id, participant as u64);
        assert_eq!(game.game_id, 0);
        assert_eq!(game.disorder, "D");
        assert_eq!(game.website_choice, website_order(participant)[0]);
    }
    Ok(())
}

/// Rounds are filled front to back, so a later round is never longer
#[test]
fn test_persona_rounds_are_front_loaded() -> pheno_synth::Result<()> {
    let catalog = reference_catalog();
    let assembler = ProfileAssembler::new(&catalog, SamplingConfig::default());
    let config = quiet_cohort_config(2);

    let dataset = generate_timeseries_personas(
        &assembler,
        &disorders(&["D"]),
        6,
        40,
        &config,
        &mut seeded_rng(2),
    )?;

    let count = |round: &str| if round.is_empty() { 0 } else { round.split(", ").count() };
    for game in &dataset.games {
        let sizes = [count(&game.round_1), count(&game.round_2), count(&game.round_3)];
        assert!(sizes[0] >= sizes[1] && sizes[1] >= sizes[2], "{game:?}");
        assert!(sizes[0] - sizes[2] <= 1, "{game:?}");
    }
    Ok(())
}

#[test]
fn test_personas_reject_more_disorders_than_websites() {
    let catalog = reference_catalog();
    let assembler = ProfileAssembler::new(&catalog, SamplingConfig::default());
    let config = quiet_cohort_config(3);
    let too_many = disorders(&["D"; ROUNDS_PER_GAME + 1]);

    let err = generate_timeseries_personas(&assembler, &too_many, 4, 1, &config, &mut seeded_rng(3))
        .unwrap_err();
    assert!(matches!(err, PhenoError::Config(_)));
}

#[test]
fn test_persona_batch_has_one_row_per_game() -> pheno_synth::Result<()> {
    let catalog = reference_catalog();
    let assembler = ProfileAssembler::new(&catalog, SamplingConfig::default());
    let config = quiet_cohort_config(4);

    let dataset = generate_timeseries_personas(
        &assembler,
        &disorders(&["D", "D"]),
        4,
        3,
        &config,
        &mut seeded_rng(4),
    )?;
    let batch = dataset.to_record_batch()?;

    assert_eq!(batch.num_rows(), 6);
    assert!(batch.schema().index_of("website_choice").is_ok());
    assert!(batch.schema().index_of("round_3").is_ok());
    Ok(())
}

/// Users carry a name, a diagnosis label, then their discovered phenotypes
#[test]
fn test_users_carry_identity_and_diagnosis() -> pheno_synth::Result<()> {
    let catalog = reference_catalog();
    let assembler = ProfileAssembler::new(&catalog, SamplingConfig::default());
    let config = quiet_cohort_config(5);

    let dataset = generate_users(
        &assembler,
        &disorders(&["D"]),
        4,
        200,
        &BuiltinNames,
        &config,
        &mut seeded_rng(5),
    )?;

    assert_eq!(dataset.len(), 200);
    for user in &dataset.users {
        assert!(!user.name().is_empty());
        let label = user.entries.get(1).map(String::as_str);
        if user.diagnosed {
            assert_eq!(label, Some("D"));
        } else {
            assert_eq!(label, Some(UNDIAGNOSED));
        }
    }

    // k <= 2 out of 1..=10 is diagnosed
    let diagnosed = dataset.users.iter().filter(|u| u.diagnosed).count();
    assert!((20..=70).contains(&diagnosed), "{diagnosed} of 200 diagnosed");
    Ok(())
}

#[test]
fn test_complete_stage_users_keep_whole_profile() -> pheno_synth::Result<()> {
    let catalog = reference_catalog();
    let noiseless = SamplingConfig {
        noise_ratio: 0.0,
        ..SamplingConfig::default()
    };
    let assembler = ProfileAssembler::new(&catalog, noiseless);
    let config = quiet_cohort_config(6);

    let dataset = generate_users(
        &assembler,
        &disorders(&["D"]),
        4,
        100,
        &BuiltinNames,
        &config,
        &mut seeded_rng(6),
    )?;

    // Without noise every profile has 2 identity fields and 4 phenotypes
    for user in &dataset.users {
        let expected = match user.stage {
            DiagnosisStage::Complete => 6,
            DiagnosisStage::Mid => 5,   // round(6 * 0.85) = 5
            DiagnosisStage::Early => 4, // round(6 * 0.75) = 4 (4.5 ties to even)
        };
        assert_eq!(user.entries.len(), expected, "{user:?}");
    }
    Ok(())
}

/// A fixed master seed reproduces the whole pool despite parallel generation
#[test]
fn test_users_are_reproducible() -> pheno_synth::Result<()> {
    let catalog = reference_catalog();
    let assembler = ProfileAssembler::new(&catalog, SamplingConfig::default());
    let config = quiet_cohort_config(7);
    let names = NameList::new(vec!["Ada".into(), "Ben".into(), "Cy".into()])?;

    let first = generate_users(&assembler, &disorders(&["D"]), 5, 50, &names, &config, &mut seeded_rng(7))?;
    let second = generate_users(&assembler, &disorders(&["D"]), 5, 50, &names, &config, &mut seeded_rng(7))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_user_batch_is_padded_to_widest_user() -> pheno_synth::Result<()> {
    let catalog = reference_catalog();
    let assembler = ProfileAssembler::new(&catalog, SamplingConfig::default());
    let config = quiet_cohort_config(8);

    let dataset = generate_users(
        &assembler,
        &disorders(&["D"]),
        4,
        30,
        &BuiltinNames,
        &config,
        &mut seeded_rng(8),
    )?;
    let batch = dataset.to_record_batch()?;

    assert_eq!(batch.num_rows(), 30);
    assert_eq!(batch.num_columns(), dataset.max_width());
    assert_eq!(batch.schema().field(0).name(), "name");
    assert_eq!(batch.schema().field(1).name(), "diagnosis");
    Ok(())
}
