//! The `gradekit settings` command.

use std::path::PathBuf;

use anyhow::Result;

use gradekit_core::model::RawInput;
use gradekit_core::parser;

use crate::output::{print_gradebook, print_settings};

pub fn execute(
    gradebook_path: PathBuf,
    target: Option<String>,
    global_kkm: Option<i64>,
    use_global_kkm: Option<bool>,
) -> Result<()> {
    let mut gradebook = parser::parse_gradebook(&gradebook_path)?;

    if target.is_none() && global_kkm.is_none() && use_global_kkm.is_none() {
        print_settings(&gradebook);
        return Ok(());
    }

    if let Some(target) = target {
        gradebook.set_target_average(RawInput::from(target));
    }
    if let Some(enabled) = use_global_kkm {
        gradebook.set_use_global_kkm(enabled);
    }
    if let Some(kkm) = global_kkm {
        gradebook.set_global_kkm(kkm)?;
    }

    parser::write_gradebook(&gradebook_path, &gradebook)?;
    print_gradebook(&gradebook);
    Ok(())
}
