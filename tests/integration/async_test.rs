use pheno_synth::load_catalog_async;
use pheno_synth::utils::test::write_source_csv;

use crate::utils::two_disorder_source;

/// Several sources load concurrently into one catalog
#[tokio::test]
async fn test_async_load_merges_sources() -> pheno_synth::Result<()> {
    let dir = tempfile::tempdir()?;
    let main = two_disorder_source(dir.path())?;
    let extra = dir.path().join("extra.csv");
    write_source_csv(&extra, &["Pompe disease,Muscle weakness,S,0.9,N,,Muscle"])?;

    let catalog = load_catalog_async(&[main, extra]).await?;
    assert_eq!(catalog.len(), 9);
    assert_eq!(catalog.disorders().len(), 3);
    assert_eq!(catalog.disorders()[2], "Pompe disease");
    Ok(())
}

#[tokio::test]
async fn test_async_load_of_nothing_is_empty() -> pheno_synth::Result<()> {
    let catalog = load_catalog_async(&[]).await?;
    assert!(catalog.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_async_load_reports_bad_source() -> pheno_synth::Result<()> {
    let dir = tempfile::tempdir()?;
    let bad = dir.path().join("phenotypes.json");
    std::fs::write(&bad, "{}")?;

    assert!(load_catalog_async(&[bad]).await.is_err());
    Ok(())
}
