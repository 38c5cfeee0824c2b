//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const GRADEBOOK: &str = r#"[settings]
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
score = 60
kkm = 70

[[subjects]]
id = 3
name = "Chemistry"
score = 90
kkm = 70
"#;

/// A command isolated inside `dir`: no user config, snapshot kept in `dir`.
fn gradekit(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("gradekit").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("GRADEKIT_SNAPSHOT", dir.join("snapshot.json"))
        .env_remove("RUST_LOG");
    cmd
}

fn setup(gradebook: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("grades.toml"), gradebook).unwrap();
    dir
}

fn files_with_extension(dir: &Path, ext: &str) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|e| e == ext))
        .collect()
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    gradekit(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created gradekit.toml"))
        .stdout(predicate::str::contains("Created grades.toml"));

    assert!(dir.path().join("gradekit.toml").exists());
    assert!(dir.path().join("grades.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    gradekit(dir.path()).arg("init").assert().success();

    gradekit(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_then_calculate() {
    let dir = TempDir::new().unwrap();
    gradekit(dir.path()).arg("init").assert().success();

    gradekit(dir.path())
        .arg("calculate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mathematics"));
}

#[test]
fn validate_valid_gradebook() {
    let dir = setup(GRADEBOOK);

    gradekit(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 subjects"))
        .stdout(predicate::str::contains("Gradebook valid."));
}

#[test]
fn validate_reports_every_issue() {
    let dir = setup(
        r#"
[settings]
target_average = "high"

[[subjects]]
name = "Mathematics"
score = "abc"

[[subjects]]
name = "Physics"
score = 120
"#,
    );

    gradekit(dir.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Score for \"Mathematics\" must be a number",
        ))
        .stdout(predicate::str::contains(
            "Score for \"Physics\" must be between 0-100",
        ))
        .stdout(predicate::str::contains("Target average must be a number"))
        .stderr(predicate::str::contains("3 validation error(s)"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();

    gradekit(dir.path())
        .arg("validate")
        .arg("--gradebook")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn calculate_prints_summary_and_writes_exports() {
    let dir = setup(GRADEBOOK);

    gradekit(dir.path())
        .args(["calculate", "--format", "all", "--output", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("76.67"))
        .stdout(predicate::str::contains("2/3 (66.7%)"))
        .stdout(predicate::str::contains("-3.33"))
        .stdout(predicate::str::contains("Below KKM:      Physics"));

    let out = dir.path().join("out");
    let csv = files_with_extension(&out, "csv");
    assert_eq!(csv.len(), 1);
    let csv = std::fs::read_to_string(&csv[0]).unwrap();
    assert!(csv.starts_with("Subject,Score,KKM,Status,Difference"));
    assert!(csv.contains("Physics,60.0,70,FAIL,-10.0"));

    let json = files_with_extension(&out, "json");
    assert_eq!(json.len(), 1);
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json[0]).unwrap()).unwrap();
    assert_eq!(value["results"]["passed_count"], 2);
    assert_eq!(value["subjects"].as_array().unwrap().len(), 3);

    assert_eq!(files_with_extension(&out, "html").len(), 1);
    assert!(dir.path().join("snapshot.json").exists());
}

#[test]
fn calculate_rejects_invalid_input_without_saving() {
    let dir = setup(
        r#"
[[subjects]]
name = ""
score = 50
"#,
    );

    gradekit(dir.path())
        .arg("calculate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Subject name #1 cannot be empty"))
        .stderr(predicate::str::contains("1 validation error(s)"));

    assert!(!dir.path().join("snapshot.json").exists());
}

#[test]
fn calculate_no_save_skips_snapshot() {
    let dir = setup(GRADEBOOK);

    gradekit(dir.path())
        .args(["calculate", "--no-save", "--output", "out"])
        .assert()
        .success();

    assert!(!dir.path().join("snapshot.json").exists());
}

#[test]
fn calculate_unknown_format() {
    let dir = setup(GRADEBOOK);

    gradekit(dir.path())
        .args(["calculate", "--format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format 'pdf'"));
}

#[test]
fn show_without_snapshot() {
    let dir = TempDir::new().unwrap();

    gradekit(dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved results"));
}

#[test]
fn show_restores_last_calculation() {
    let dir = setup(GRADEBOOK);
    gradekit(dir.path())
        .args(["calculate", "--output", "out"])
        .assert()
        .success();

    gradekit(dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Snapshot taken"))
        .stdout(predicate::str::contains("Chemistry"))
        .stdout(predicate::str::contains("76.67"));
}

#[test]
fn show_ignores_expired_snapshot() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("snapshot.json"),
        r#"{
  "subjects": [{ "id": 1, "name": "Mathematics", "score": 80.0, "kkm": 75.0 }],
  "global_kkm": 75,
  "use_global_kkm": false,
  "timestamp": "2000-01-01T00:00:00Z"
}"#,
    )
    .unwrap();

    gradekit(dir.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved results"));
}

#[test]
fn calculate_restore_uses_snapshot() {
    let dir = setup(GRADEBOOK);
    gradekit(dir.path())
        .args(["calculate", "--output", "out"])
        .assert()
        .success();
    std::fs::remove_file(dir.path().join("grades.toml")).unwrap();

    gradekit(dir.path())
        .args(["calculate", "--restore", "--output", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("76.67"));
}

#[test]
fn export_csv_from_snapshot() {
    let dir = setup(GRADEBOOK);
    gradekit(dir.path())
        .args(["calculate", "--output", "out"])
        .assert()
        .success();

    gradekit(dir.path())
        .args(["export", "--format", "csv", "--output", "grades.csv"])
        .assert()
        .success();

    let csv = std::fs::read_to_string(dir.path().join("grades.csv")).unwrap();
    assert!(csv.contains("Mathematics,80.0,75,PASS,5.0"));
}

#[test]
fn export_without_snapshot_fails() {
    let dir = TempDir::new().unwrap();

    gradekit(dir.path())
        .args(["export", "--format", "json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("run `gradekit calculate` first"));
}

#[test]
fn subject_add_and_set() {
    let dir = setup(GRADEBOOK);

    gradekit(dir.path())
        .args(["subject", "add", "--name", "Art", "--score", "88"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added subject 4"));

    gradekit(dir.path())
        .args(["subject", "set", "--id", "4", "--kkm", "80"])
        .assert()
        .success();

    let content = std::fs::read_to_string(dir.path().join("grades.toml")).unwrap();
    assert!(content.contains("Art"));

    gradekit(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 subjects"));
}

#[test]
fn subject_remove_keeps_last_subject() {
    let dir = setup(
        r#"
[[subjects]]
id = 1
name = "Mathematics"
score = 80
"#,
    );

    gradekit(dir.path())
        .args(["subject", "remove", "--id", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one subject required"));

    let content = std::fs::read_to_string(dir.path().join("grades.toml")).unwrap();
    assert!(content.contains("Mathematics"));
}

#[test]
fn subject_remove_unknown_id() {
    let dir = setup(GRADEBOOK);

    gradekit(dir.path())
        .args(["subject", "remove", "--id", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("subject 42 not found"));
}

#[test]
fn settings_global_kkm_overwrites_subjects() {
    let dir = setup(GRADEBOOK);

    gradekit(dir.path())
        .args(["settings", "--use-global-kkm", "true", "--global-kkm", "65"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Global KKM:     65"));

    gradekit(dir.path())
        .args(["calculate", "--no-save", "--format", "csv", "--output", "out"])
        .assert()
        .success();
    let csv = files_with_extension(&dir.path().join("out"), "csv");
    let csv = std::fs::read_to_string(&csv[0]).unwrap();
    assert!(csv.contains("Physics,60.0,65,FAIL,-5.0"));
    assert!(csv.contains("Mathematics,80.0,65,PASS,15.0"));

    gradekit(dir.path())
        .args(["subject", "set", "--id", "1", "--kkm", "90"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("follows the global KKM"));
}

#[test]
fn settings_without_flags_prints_current() {
    let dir = setup(GRADEBOOK);

    gradekit(dir.path())
        .arg("settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("Target average: 80"))
        .stdout(predicate::str::contains("Use global KKM: no"));
}
