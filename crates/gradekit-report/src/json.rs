//! JSON export.
//!
//! The exported document carries the raw gradebook records next to the full
//! results summary so the file can be re-imported or inspected on its own.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use gradekit_core::model::{Gradebook, SubjectRecord};
use gradekit_core::results::ResultsSummary;

/// Shape of an exported results file.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub subjects: &'a [SubjectRecord],
    pub results: &'a ResultsSummary,
    /// When the export was made, not when the results were computed.
    pub timestamp: DateTime<Utc>,
}

impl<'a> ExportDocument<'a> {
    pub fn new(gradebook: &'a Gradebook, results: &'a ResultsSummary, exported_at: DateTime<Utc>) -> Self {
        Self {
            subjects: gradebook.subjects(),
            results,
            timestamp: exported_at,
        }
    }
}

/// Render the export document as pretty-printed JSON.
pub fn generate_json(
    gradebook: &Gradebook,
    results: &ResultsSummary,
    exported_at: DateTime<Utc>,
) -> Result<String> {
    let doc = ExportDocument::new(gradebook, results, exported_at);
    serde_json::to_string_pretty(&doc).context("failed to serialize results export")
}

/// Write the JSON export to a file, creating parent directories.
pub fn write_json_export(
    gradebook: &Gradebook,
    results: &ResultsSummary,
    exported_at: DateTime<Utc>,
    path: &Path,
) -> Result<()> {
    let json = generate_json(gradebook, results, exported_at)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write JSON export to {}", path.display()))?;
    Ok(())
}
