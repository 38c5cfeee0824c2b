//! Terminal rendering shared by the commands.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color, Table};

use gradekit_core::model::Gradebook;
use gradekit_core::results::ResultsSummary;

/// Print the per-subject table, the summary figures and the analysis.
pub fn print_results(results: &ResultsSummary) {
    if results.is_empty() {
        println!("{}", results.analysis_note);
        print_recommendations(results);
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Subject", "Score", "KKM", "Difference", "Grade", "Status"]);

    for s in &results.subjects {
        let grade = s.grade();
        let status = if s.passed() {
            Cell::new(format!("{} PASS", s.status_mark().symbol())).fg(Color::Green)
        } else {
            Cell::new(format!("{} FAIL", s.status_mark().symbol())).fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(&s.name),
            Cell::new(format!("{:.1}", s.score)),
            Cell::new(s.kkm),
            Cell::new(format!("{:+.1}", s.difference())),
            Cell::new(format!("{grade} ({})", grade.description())),
            status,
        ]);
    }

    println!("{table}");
    println!();
    println!("Average:        {:.2}", results.average);
    println!(
        "Passed:         {}/{} ({:.1}%)",
        results.passed_count, results.count, results.pass_percentage
    );
    let below: Vec<&str> = results.failed_subjects().map(|s| s.name.as_str()).collect();
    if !below.is_empty() {
        println!("Below KKM:      {}", below.join(", "));
    }
    println!("Highest:        {:.1}", results.highest);
    println!("Lowest:         {:.1}", results.lowest);
    println!("Range:          {:.1}", results.range);
    println!("Std. deviation: {:.2}", results.stddev);
    if let Some(target) = results.target {
        println!("Target:         {:.1} ({:+.2})", target, results.difference);
    }

    let distribution = results
        .grade_distribution()
        .iter()
        .map(|(grade, n)| format!("{grade}: {n}"))
        .collect::<Vec<_>>()
        .join("  ");
    println!("Grades:         {distribution}");

    println!();
    println!("{}", results.analysis_note);
    print_recommendations(results);
}

fn print_recommendations(results: &ResultsSummary) {
    if results.recommendations.is_empty() {
        return;
    }
    println!("\nRecommendations:");
    for rec in &results.recommendations {
        println!("  - {rec}");
    }
}

/// Print the subjects and settings of a gradebook.
pub fn print_gradebook(gradebook: &Gradebook) {
    let mut table = Table::new();
    table.set_header(vec!["Id", "Subject", "Score", "KKM"]);
    for s in gradebook.subjects() {
        table.add_row(vec![
            Cell::new(s.id),
            Cell::new(&s.name),
            Cell::new(&s.score),
            Cell::new(&s.kkm),
        ]);
    }
    println!("{table}");
    print_settings(gradebook);
}

pub fn print_settings(gradebook: &Gradebook) {
    let target = gradebook.target_average();
    println!(
        "Target average: {}",
        if target.is_empty() { "-".to_string() } else { target.to_string() }
    );
    println!("Global KKM:     {}", gradebook.global_kkm());
    println!(
        "Use global KKM: {}",
        if gradebook.use_global_kkm() { "yes" } else { "no" }
    );
}

/// Export formats, with `all` expanded.
pub fn parse_formats(format: &str) -> Result<Vec<&str>> {
    let formats: Vec<&str> = if format.trim() == "all" {
        vec!["json", "csv", "html"]
    } else {
        format.split(',').map(str::trim).filter(|f| !f.is_empty()).collect()
    };
    for fmt in &formats {
        anyhow::ensure!(
            matches!(*fmt, "json" | "csv" | "html"),
            "unknown format '{fmt}' (expected json, csv, html or all)"
        );
    }
    anyhow::ensure!(!formats.is_empty(), "at least one output format is required");
    Ok(formats)
}

/// Default file name for an export in `dir`.
pub fn export_path(dir: &Path, format: &str, at: DateTime<Utc>) -> PathBuf {
    dir.join(format!("results-{}.{format}", at.format("%Y-%m-%dT%H%M%S")))
}

/// Write `results` in one format.
pub fn write_export(
    format: &str,
    gradebook: &Gradebook,
    results: &ResultsSummary,
    path: &Path,
) -> Result<()> {
    match format {
        "json" => {
            gradekit_report::write_json_export(gradebook, results, Utc::now(), path)?;
            eprintln!("Results saved to: {}", path.display());
        }
        "csv" => {
            gradekit_report::write_csv(results, path)?;
            eprintln!("CSV export: {}", path.display());
        }
        "html" => {
            gradekit_report::write_html_report(results, path)?;
            eprintln!("Printable report: {}", path.display());
        }
        other => anyhow::bail!("unknown format '{other}'"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_expands_to_every_format() {
        assert_eq!(parse_formats("all").unwrap(), vec!["json", "csv", "html"]);
        assert_eq!(parse_formats("csv, html").unwrap(), vec!["csv", "html"]);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = parse_formats("json,pdf").unwrap_err();
        assert!(err.to_string().contains("unknown format 'pdf'"));
        assert!(parse_formats(" , ").is_err());
    }

    #[test]
    fn export_path_uses_extension() {
        let at = DateTime::parse_from_rfc3339("2025-04-01T10:20:30Z")
            .unwrap()
            .with_timezone(&Utc);
        let path = export_path(Path::new("out"), "csv", at);
        assert_eq!(path, PathBuf::from("out/results-2025-04-01T102030.csv"));
    }
}
