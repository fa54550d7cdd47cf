use anyhow::Result;
use salt_thickness::core::ConfigProvider;
use salt_thickness::utils::validation::Validate;
use salt_thickness::{LocalStorage, OutputFormat, ThicknessEngine, ThicknessPipeline, TomlConfig};
use tempfile::TempDir;

fn job_toml(base_dir: &str, output: &str) -> String {
    format!(
        r#"
[job]
name = "south-flank"

[input]
base_dir = "{base_dir}"

[[input.pairs]]
top = "T1.lmk"
bottom = "B1.lmk"

[[input.pairs]]
top = "T2.lmk"
bottom = "B2.lmk"

[output]
path = "{output}"
format = "csv"

[processing]
parallel = true
"#
    )
}

#[tokio::test]
async fn test_toml_job_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path();

    std::fs::write(dir.join("T1.lmk"), "20 4 0 0 1000\n20 5 0 0 1000\n")?;
    std::fs::write(dir.join("B1.lmk"), "20 4 0 0 1100\n20 5 0 0 1200\n")?;
    std::fs::write(dir.join("T2.lmk"), "20 4 0 0 1050\n20 5 0 0 1300\n")?;
    std::fs::write(dir.join("B2.lmk"), "20 4 0 0 1180\n20 5 0 0 1350\n")?;

    let output = dir.join("salt.csv");
    let config_path = dir.join("job.toml");
    std::fs::write(
        &config_path,
        job_toml(dir.to_str().unwrap(), output.to_str().unwrap()),
    )?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;
    assert_eq!(config.output_format(), OutputFormat::Csv);
    assert_eq!(config.horizon_files().len(), 4);

    let pipeline = ThicknessPipeline::new(LocalStorage::default(), config);
    ThicknessEngine::new(pipeline).run().await?;

    let mut reader = csv::Reader::from_path(&output)?;
    let rows: Vec<(i32, i32, f64)> = reader.deserialize().collect::<Result<_, csv::Error>>()?;
    // (20,4): [1000,1100] and [1050,1180] overlap by 50 → 180
    // (20,5): [1000,1200] and [1300,1350] are disjoint → 250
    assert_eq!(rows, vec![(20, 4, 180.0), (20, 5, 250.0)]);
    Ok(())
}

#[test]
fn test_toml_job_validation_requires_existing_files() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let dir = temp_dir.path();

    let config = TomlConfig::from_toml_str(&job_toml(dir.to_str().unwrap(), "out.csv"))?;

    assert!(config.validate_config().is_ok());
    assert!(config.validate().is_err());
    Ok(())
}
