//! The `gradekit export` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use gradekit_core::engine::Calculator;
use gradekit_store::config::load_config_from;
use gradekit_store::create_store;

use crate::output::{export_path, parse_formats, write_export};

pub fn execute(format: String, output: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let formats = parse_formats(&format)?;
    anyhow::ensure!(
        output.is_none() || formats.len() == 1,
        "--output names a single file; pick one format"
    );

    let calculator = Calculator::new(create_store(&config.store), config.calculator_config());
    let snapshot = calculator
        .restore(Utc::now())
        .context("no saved results to export; run `gradekit calculate` first")?;
    let gradebook = snapshot.gradebook()?;
    let results = snapshot
        .results
        .as_ref()
        .context("the saved snapshot has no results; run `gradekit calculate` first")?;

    for fmt in formats {
        let path = match &output {
            Some(path) => path.clone(),
            None => export_path(&config.output_dir, fmt, Utc::now()),
        };
        write_export(fmt, &gradebook, results, &path)?;
    }

    Ok(())
}
