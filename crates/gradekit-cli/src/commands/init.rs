//! The `gradekit init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("gradekit.toml").exists() {
        println!("gradekit.toml already exists, skipping.");
    } else {
        std::fs::write("gradekit.toml", SAMPLE_CONFIG)?;
        println!("Created gradekit.toml");
    }

    let gradebook_path = std::path::Path::new("grades.toml");
    if gradebook_path.exists() {
        println!("grades.toml already exists, skipping.");
    } else {
        std::fs::write(gradebook_path, EXAMPLE_GRADEBOOK)?;
        println!("Created grades.toml");
    }

    println!("\nNext steps:");
    println!("  1. Enter your scores in grades.toml");
    println!("  2. Run: gradekit validate");
    println!("  3. Run: gradekit calculate --format all");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradekit configuration

# Snapshots older than this are discarded.
snapshot_max_age_hours = 24
output_dir = "./gradekit-results"
# json, csv, html, or all
default_format = "json"

[store]
type = "file"
path = ".gradekit/snapshot.json"
"#;

const EXAMPLE_GRADEBOOK: &str = r#"[settings]
target_average = 80
global_kkm = 75
use_global_kkm = false

[[subjects]]
id = 1
name = "Mathematics"
score = 84.5
kkm = 75

[[subjects]]
id = 2
name = "Physics"
score = 72
kkm = 70

[[subjects]]
id = 3
name = "Chemistry"
score = 68
kkm = 70

[[subjects]]
id = 4
name = "Biology"
score = 91
kkm = 70
"#;
