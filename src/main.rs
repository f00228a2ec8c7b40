//! CLI для проверки сохраненных моделей и валидации предсказаний
//!
//! Использование:
//!   tell-ml inspect <model-file>   (голое имя ищется в TELL_ML_MODEL_DIR)
//!   tell-ml validate <region> <input.json> [--nodata <value>]

use std::path::Path;

use anyhow::{bail, Context, Result};
use ndarray::Array1;
use serde::Deserialize;

use tell_ml::{validate, MlConfig, ModelProvenance};

#[derive(Debug, Deserialize)]
struct ValidationInput {
    predicted: Vec<f64>,
    comparison: Vec<f64>,
}

fn main() -> Result<()> {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = MlConfig::from_env().context("Failed to load configuration")?;
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("inspect") => {
            let model_file = args.get(2).context("Usage: tell-ml inspect <model-file>")?;
            inspect(&config, Path::new(model_file))
        }
        Some("validate") => {
            let (region, input) = match (args.get(2), args.get(3)) {
                (Some(region), Some(input)) => (region, input),
                _ => bail!("Usage: tell-ml validate <region> <input.json> [--nodata <value>]"),
            };
            let nodata_value = match args.iter().position(|a| a == "--nodata") {
                Some(i) => args
                    .get(i + 1)
                    .context("--nodata requires a value")?
                    .parse()
                    .context("Invalid --nodata value")?,
                None => config.nodata_value,
            };
            run_validation(region, Path::new(input), nodata_value)
        }
        _ => bail!("Usage: tell-ml <inspect|validate> ..."),
    }
}

fn inspect(config: &MlConfig, model_file: &Path) -> Result<()> {
    let model_file = config.resolve_model_path(model_file);
    let model_file = model_file.as_path();
    if !model_file.exists() {
        bail!("Model file {} not found", model_file.display());
    }

    let store = config.model_store();
    let check = store.check_version(model_file);

    match ModelProvenance::parse(model_file) {
        Some(provenance) => {
            println!("region:     {}", provenance.region);
            println!("model:      {}", provenance.model_name);
            println!("library:    {}", provenance.library);
            println!("version:    {}", provenance.version);
        }
        None => tracing::warn!("{} does not follow the model file naming scheme", model_file.display()),
    }

    println!("running:    {}", check.running);
    if check.is_match() {
        println!("status:     compatible");
    } else {
        println!("status:     version mismatch (load will proceed with a warning)");
    }

    Ok(())
}

fn run_validation(region: &str, input: &Path, nodata_value: f64) -> Result<()> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let data: ValidationInput = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    tracing::info!(
        "Validate request: {} predictions for {}",
        data.predicted.len(),
        region
    );

    let summary = validate(
        region,
        &Array1::from(data.predicted),
        &Array1::from(data.comparison),
        nodata_value,
    )?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
