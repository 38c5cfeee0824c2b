//! The `gradekit show` command.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use gradekit_core::engine::Calculator;
use gradekit_store::config::load_config_from;
use gradekit_store::create_store;

use crate::output::{print_gradebook, print_results};

pub fn execute(json: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let calculator = Calculator::new(create_store(&config.store), config.calculator_config());

    let Some(snapshot) = calculator.restore(Utc::now()) else {
        println!("No saved results. Run `gradekit calculate` first.");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!(
        "Snapshot taken {}",
        snapshot.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    print_gradebook(&snapshot.gradebook()?);

    match &snapshot.results {
        Some(results) => {
            println!();
            print_results(results);
        }
        None => println!("\nNo results in the snapshot."),
    }

    Ok(())
}
