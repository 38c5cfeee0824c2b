//! The `gradekit subject` commands.

use std::path::Path;

use anyhow::Result;

use gradekit_core::model::{Gradebook, RawInput};
use gradekit_core::parser;

use crate::output::print_gradebook;
use crate::SubjectAction;

pub fn execute(action: SubjectAction) -> Result<()> {
    match action {
        SubjectAction::Add {
            gradebook,
            name,
            score,
            kkm,
        } => edit(&gradebook, |gb| {
            let id = gb.add_subject()?;
            if let Some(name) = name {
                gb.rename_subject(id, name)?;
            }
            if let Some(score) = score {
                gb.set_score(id, RawInput::from(score))?;
            }
            if let Some(kkm) = kkm {
                gb.set_kkm(id, RawInput::from(kkm))?;
            }
            println!("Added subject {id}");
            Ok(())
        }),
        SubjectAction::Remove { gradebook, id } => edit(&gradebook, |gb| {
            let removed = gb.remove_subject(id)?;
            println!("Removed subject {id} ({})", removed.name);
            Ok(())
        }),
        SubjectAction::Set {
            gradebook,
            id,
            name,
            score,
            kkm,
        } => edit(&gradebook, |gb| {
            anyhow::ensure!(
                name.is_some() || score.is_some() || kkm.is_some(),
                "nothing to change; pass --name, --score or --kkm"
            );
            if let Some(name) = name {
                gb.rename_subject(id, name)?;
            }
            if let Some(score) = score {
                gb.set_score(id, RawInput::from(score))?;
            }
            if let Some(kkm) = kkm {
                gb.set_kkm(id, RawInput::from(kkm))?;
            }
            println!("Updated subject {id}");
            Ok(())
        }),
    }
}

/// Load the gradebook, apply `change`, and write it back only if it succeeded.
fn edit(path: &Path, change: impl FnOnce(&mut Gradebook) -> Result<()>) -> Result<()> {
    let mut gradebook = parser::parse_gradebook(path)?;
    change(&mut gradebook)?;
    parser::write_gradebook(path, &gradebook)?;
    tracing::debug!("wrote {}", path.display());
    print_gradebook(&gradebook);
    Ok(())
}
