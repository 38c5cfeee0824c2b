//! Persisted last-known input/output state, with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GradebookError;
use crate::model::{GlobalSettings, Gradebook, RawInput, SubjectRecord};
use crate::results::ResultsSummary;

/// Snapshots older than this are discarded on load.
pub const DEFAULT_MAX_AGE_HOURS: i64 = 24;

/// The last gradebook state and, if one was computed, its results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub subjects: Vec<SubjectRecord>,
    #[serde(default, skip_serializing_if = "RawInput::is_empty")]
    pub target_average: RawInput,
    pub global_kkm: i64,
    pub use_global_kkm: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultsSummary>,
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
}

impl Snapshot {
    /// Capture a gradebook (and optionally its results) at `timestamp`.
    pub fn capture(
        gradebook: &Gradebook,
        results: Option<ResultsSummary>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let settings = gradebook.settings();
        Self {
            subjects: gradebook.subjects().to_vec(),
            target_average: settings.target_average.clone(),
            global_kkm: settings.global_kkm,
            use_global_kkm: settings.use_global_kkm,
            results,
            timestamp,
        }
    }

    /// Returns true if the snapshot is older than `max_age` at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        now - self.timestamp > max_age
    }

    /// Rebuild the gradebook this snapshot was taken from.
    pub fn gradebook(&self) -> Result<Gradebook, GradebookError> {
        Gradebook::new(
            GlobalSettings {
                target_average: self.target_average.clone(),
                global_kkm: self.global_kkm,
                use_global_kkm: self.use_global_kkm,
            },
            self.subjects.clone(),
        )
    }

    /// Save the snapshot as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize snapshot")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
        Ok(())
    }

    /// Load a snapshot from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot from {}", path.display()))?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).context("failed to parse snapshot JSON")?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::compute_statistics_at;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn gradebook() -> Gradebook {
        let mut gb = Gradebook::default();
        gb.set_score(1, 84.5).unwrap();
        gb.set_score(2, "70").unwrap();
        gb.set_target_average("80");
        gb
    }

    #[test]
    fn expiry_after_max_age() {
        let snapshot = Snapshot::capture(&gradebook(), None, now());
        let max_age = Duration::hours(DEFAULT_MAX_AGE_HOURS);
        assert!(!snapshot.is_expired(now() + Duration::hours(24), max_age));
        assert!(snapshot.is_expired(now() + Duration::hours(24) + Duration::seconds(1), max_age));
    }

    #[test]
    fn capture_and_restore_gradebook() {
        let gb = gradebook();
        let snapshot = Snapshot::capture(&gb, None, now());
        assert_eq!(snapshot.gradebook().unwrap(), gb);
    }

    #[test]
    fn json_file_roundtrip_with_results() {
        let gb = gradebook();
        let results = compute_statistics_at(gb.subjects(), gb.target_average(), now());
        let snapshot = Snapshot::capture(&gb, Some(results), now());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("snapshot.json");
        snapshot.save_json(&path).unwrap();
        let loaded = Snapshot::load_json(&path).unwrap();

        assert_eq!(loaded.subjects.len(), 4);
        assert_eq!(loaded.timestamp, now());
        let results = loaded.results.unwrap();
        assert_eq!(results.count, 4);
        assert_eq!(results.target, Some(80.0));
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Snapshot::load_json(&dir.path().join("nope.json")).is_err());
    }
}
