//! The `gradekit calculate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use gradekit_core::engine::Calculator;
use gradekit_core::parser;
use gradekit_store::config::load_config_from;
use gradekit_store::create_store;

use crate::output::{export_path, parse_formats, print_results, write_export};

pub struct CalculateArgs {
    pub gradebook: PathBuf,
    pub restore: bool,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub no_save: bool,
}

pub fn execute(args: CalculateArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;

    let format = args.format.unwrap_or_else(|| config.default_format.clone());
    let formats = parse_formats(&format)?;
    let output = args.output.unwrap_or_else(|| config.output_dir.clone());

    let mut calculator_config = config.calculator_config();
    if args.no_save {
        calculator_config.persist = false;
    }
    let calculator = Calculator::new(create_store(&config.store), calculator_config);

    let gradebook = if args.restore {
        let snapshot = calculator
            .restore(Utc::now())
            .context("no saved snapshot to restore (none written yet, or it has expired)")?;
        snapshot.gradebook()?
    } else {
        parser::parse_gradebook(&args.gradebook)?
    };

    tracing::info!(subjects = gradebook.subjects().len(), "calculating");

    let results = match calculator.calculate(&gradebook) {
        Ok(results) => results,
        Err(invalid) => {
            for message in invalid.messages() {
                eprintln!("  {message}");
            }
            return Err(invalid.into());
        }
    };

    print_results(&results);

    std::fs::create_dir_all(&output)
        .with_context(|| format!("failed to create output directory {}", output.display()))?;
    for fmt in formats {
        let path = export_path(&output, fmt, results.timestamp);
        write_export(fmt, &gradebook, &results, &path)?;
    }

    Ok(())
}
