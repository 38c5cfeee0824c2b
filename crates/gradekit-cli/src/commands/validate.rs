//! The `gradekit validate` command.

use std::path::PathBuf;

use anyhow::Result;

use gradekit_core::error::InvalidInput;
use gradekit_core::parser;
use gradekit_core::validate::validate_gradebook;

pub fn execute(gradebook_path: PathBuf) -> Result<()> {
    let gradebook = parser::parse_gradebook(&gradebook_path)?;
    println!(
        "Gradebook: {} ({} subjects)",
        gradebook_path.display(),
        gradebook.subjects().len()
    );

    let issues = validate_gradebook(&gradebook);
    if issues.is_empty() {
        println!("Gradebook valid.");
        return Ok(());
    }

    for issue in &issues {
        println!("  ERROR: {issue}");
    }
    Err(InvalidInput { issues }.into())
}
