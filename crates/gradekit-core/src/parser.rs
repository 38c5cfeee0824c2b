//! TOML gradebook parser.
//!
//! Loads gradebooks from TOML files and writes them back.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::GradebookError;
use crate::model::{GlobalSettings, Gradebook, RawInput, SubjectRecord, DEFAULT_KKM};

/// Intermediate TOML structure for parsing gradebook files.
#[derive(Debug, Deserialize)]
struct TomlGradebookFile {
    #[serde(default)]
    settings: GlobalSettings,
    #[serde(default)]
    subjects: Vec<TomlSubject>,
}

#[derive(Debug, Deserialize)]
struct TomlSubject {
    #[serde(default)]
    id: Option<u32>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    score: RawInput,
    #[serde(default = "default_kkm_input")]
    kkm: RawInput,
}

fn default_kkm_input() -> RawInput {
    RawInput::from(DEFAULT_KKM)
}

#[derive(Serialize)]
struct TomlGradebookOut<'a> {
    settings: &'a GlobalSettings,
    subjects: &'a [SubjectRecord],
}

/// Parse a single TOML file into a `Gradebook`.
pub fn parse_gradebook(path: &Path) -> Result<Gradebook> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read gradebook file: {}", path.display()))?;

    parse_gradebook_str(&content, path)
}

/// Parse a TOML string into a `Gradebook` (useful for testing).
///
/// Subjects without an explicit id are numbered after the largest explicit
/// id, in file order.
pub fn parse_gradebook_str(content: &str, source_path: &Path) -> Result<Gradebook> {
    let parsed: TomlGradebookFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    // `None` once the id space is used up.
    let mut next_id = match parsed.subjects.iter().filter_map(|s| s.id).max() {
        None => Some(1),
        Some(max) => max.checked_add(1),
    };

    let subjects = parsed
        .subjects
        .into_iter()
        .map(|s| {
            let id = match s.id {
                Some(id) => id,
                None => {
                    let id = next_id.ok_or(GradebookError::IdSpaceExhausted)?;
                    next_id = id.checked_add(1);
                    id
                }
            };
            Ok(SubjectRecord {
                id,
                name: s.name,
                score: s.score,
                kkm: s.kkm,
            })
        })
        .collect::<Result<Vec<_>, GradebookError>>()
        .with_context(|| format!("invalid gradebook: {}", source_path.display()))?;

    Gradebook::new(parsed.settings, subjects)
        .with_context(|| format!("invalid gradebook: {}", source_path.display()))
}

/// Serialize a gradebook as TOML.
pub fn to_toml_string(gradebook: &Gradebook) -> Result<String> {
    let out = TomlGradebookOut {
        settings: gradebook.settings(),
        subjects: gradebook.subjects(),
    };
    toml::to_string_pretty(&out).context("failed to serialize gradebook")
}

/// Write a gradebook to a TOML file.
pub fn write_gradebook(path: &Path, gradebook: &Gradebook) -> Result<()> {
    let content = to_toml_string(gradebook)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write gradebook to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[settings]
target_average = 80
global_kkm = 75
use_global_kkm = false

[[subjects]]
id = 1
name = "Mathematics"
score = 80
kkm = 75

[[subjects]]
id = 2
name = "Physics"
score = "60"
kkm = 70

[[subjects]]
id = 3
name = "Chemistry"
score = 90.0
kkm = 70
"#;

    #[test]
    fn parse_valid_toml() {
        let gb = parse_gradebook_str(VALID_TOML, &PathBuf::from("grades.toml")).unwrap();
        assert_eq!(gb.subjects().len(), 3);
        assert_eq!(gb.subjects()[1].name, "Physics");
        assert_eq!(gb.subjects()[1].score.as_f64(), Some(60.0));
        assert_eq!(gb.subjects()[1].kkm.as_i64(), Some(70));
        assert_eq!(gb.target_average().as_f64(), Some(80.0));
        assert!(!gb.use_global_kkm());
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[[subjects]]
name = "Mathematics"

[[subjects]]
id = 7
name = "Art"
score = 91
"#;
        let gb = parse_gradebook_str(toml, &PathBuf::from("grades.toml")).unwrap();
        assert_eq!(gb.global_kkm(), DEFAULT_KKM);
        assert!(gb.target_average().is_empty());
        assert_eq!(gb.subjects()[0].id, 8);
        assert_eq!(gb.subjects()[1].id, 7);
        assert!(gb.subjects()[0].score.is_empty());
        assert_eq!(gb.subjects()[0].kkm.as_i64(), Some(DEFAULT_KKM));
    }

    #[test]
    fn global_kkm_applied_on_load() {
        let toml = r#"
[settings]
global_kkm = 68
use_global_kkm = true

[[subjects]]
name = "Mathematics"
kkm = 90
"#;
        let gb = parse_gradebook_str(toml, &PathBuf::from("grades.toml")).unwrap();
        assert_eq!(gb.subjects()[0].kkm.as_i64(), Some(68));
    }

    #[test]
    fn parse_rejects_empty_and_duplicate() {
        let empty = "[settings]\nglobal_kkm = 70\n";
        let err = parse_gradebook_str(empty, &PathBuf::from("e.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("at least one subject"));

        let dupes = r#"
[[subjects]]
id = 1
name = "A"

[[subjects]]
id = 1
name = "B"
"#;
        let err = parse_gradebook_str(dupes, &PathBuf::from("d.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate subject id"));
    }

    #[test]
    fn missing_id_after_max_id_is_rejected() {
        let toml = r#"
[[subjects]]
id = 4294967295
name = "Mathematics"

[[subjects]]
name = "Physics"
"#;
        let err = parse_gradebook_str(toml, &PathBuf::from("max.toml")).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("invalid gradebook: max.toml"));
        assert!(message.contains("no subject id left to assign"));
    }

    #[test]
    fn max_id_without_missing_ids_still_parses() {
        let toml = r#"
[[subjects]]
id = 4294967295
name = "Mathematics"
"#;
        let mut gb = parse_gradebook_str(toml, &PathBuf::from("max.toml")).unwrap();
        assert_eq!(gb.subjects()[0].id, u32::MAX);
        assert_eq!(gb.add_subject(), Err(GradebookError::IdSpaceExhausted));
    }

    #[test]
    fn last_free_id_is_assigned_once() {
        let toml = r#"
[[subjects]]
id = 4294967294
name = "Mathematics"

[[subjects]]
name = "Physics"

[[subjects]]
name = "Chemistry"
"#;
        let err = parse_gradebook_str(toml, &PathBuf::from("max.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("no subject id left to assign"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_gradebook_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn write_then_parse_preserves_gradebook() {
        let mut gb = parse_gradebook_str(VALID_TOML, &PathBuf::from("grades.toml")).unwrap();
        gb.add_subject().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("grades.toml");

        write_gradebook(&path, &gb).unwrap();
        let loaded = parse_gradebook(&path).unwrap();

        assert_eq!(loaded.subjects().len(), 4);
        assert_eq!(loaded.subjects()[3].name, "Subject 4");
        assert!(loaded.subjects()[3].score.is_empty());
        assert_eq!(loaded.subjects()[1].score.as_f64(), Some(60.0));
        assert_eq!(loaded.target_average().as_f64(), Some(80.0));
    }
}
