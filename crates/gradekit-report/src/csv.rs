//! CSV export of per-subject results.

use std::path::Path;

use anyhow::{Context, Result};

use gradekit_core::results::ResultsSummary;

/// Column headers, in order.
pub const HEADER: [&str; 5] = ["Subject", "Score", "KKM", "Status", "Difference"];

/// Render one row per normalized subject.
///
/// Scores and differences are written with one decimal; names containing
/// commas or quotes are quoted.
pub fn generate_csv(results: &ResultsSummary) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for subject in &results.subjects {
        let status = if subject.passed() { "PASS" } else { "FAIL" };
        writer.write_record([
            subject.name.clone(),
            format!("{:.1}", subject.score),
            subject.kkm.to_string(),
            status.to_string(),
            format!("{:.1}", subject.difference()),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

/// Write the CSV export to a file, creating parent directories.
pub fn write_csv(results: &ResultsSummary, path: &Path) -> Result<()> {
    let csv = generate_csv(results)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, csv)
        .with_context(|| format!("failed to write CSV export to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradekit_core::model::{GlobalSettings, Gradebook, RawInput, SubjectRecord};
    use gradekit_core::statistics::compute_statistics;

    fn results(subjects: Vec<SubjectRecord>) -> ResultsSummary {
        let gb = Gradebook::new(GlobalSettings::default(), subjects).unwrap();
        compute_statistics(gb.subjects(), &RawInput::Empty)
    }

    #[test]
    fn rows_follow_header() {
        let results = results(vec![
            SubjectRecord::new(1, "Mathematics").with_score(84.5).with_kkm(75),
            SubjectRecord::new(2, "Physics").with_score(65).with_kkm(70),
        ]);
        let csv = generate_csv(&results).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Subject,Score,KKM,Status,Difference");
        assert_eq!(lines[1], "Mathematics,84.5,75,PASS,9.5");
        assert_eq!(lines[2], "Physics,65.0,70,FAIL,-5.0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn names_with_commas_are_quoted() {
        let results = results(vec![
            SubjectRecord::new(1, "Arts, Crafts").with_score(80).with_kkm(70),
        ]);
        let csv = generate_csv(&results).unwrap();
        assert!(csv.contains("\"Arts, Crafts\",80.0,70,PASS,10.0"));
    }

    #[test]
    fn write_to_file() {
        let results = results(vec![SubjectRecord::new(1, "Biology").with_score(70)]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");
        write_csv(&results, &path).unwrap();
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .contains("Biology,70.0,75,FAIL,-5.0"));
    }
}
