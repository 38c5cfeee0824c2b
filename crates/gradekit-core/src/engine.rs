//! Calculation orchestrator.
//!
//! Runs the validate → compute → persist flow around the pure statistics
//! engine, and restores the last snapshot on startup.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::error::InvalidInput;
use crate::model::Gradebook;
use crate::results::ResultsSummary;
use crate::snapshot::{Snapshot, DEFAULT_MAX_AGE_HOURS};
use crate::statistics::compute_statistics_at;
use crate::traits::SnapshotStore;
use crate::validate::validate_gradebook;

/// Configuration for the calculator.
#[derive(Debug, Clone)]
pub struct CalculatorConfig {
    /// Snapshots older than this are ignored by [`Calculator::restore`].
    pub snapshot_max_age: Duration,
    /// Whether successful calculations are written to the store.
    pub persist: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            snapshot_max_age: Duration::hours(DEFAULT_MAX_AGE_HOURS),
            persist: true,
        }
    }
}

/// Validates gradebooks, computes their statistics and keeps the snapshot
/// store up to date.
pub struct Calculator {
    store: Arc<dyn SnapshotStore>,
    config: CalculatorConfig,
}

impl Calculator {
    pub fn new(store: Arc<dyn SnapshotStore>, config: CalculatorConfig) -> Self {
        Self { store, config }
    }

    /// Validate and compute, stamping the results with the current time.
    pub fn calculate(&self, gradebook: &Gradebook) -> Result<ResultsSummary, InvalidInput> {
        self.calculate_at(gradebook, Utc::now())
    }

    /// Validate and compute with an explicit timestamp.
    ///
    /// Any validation issue aborts before the engine runs, and all issues are
    /// returned together. On success the snapshot is saved; a failed save is
    /// logged and does not fail the calculation.
    pub fn calculate_at(
        &self,
        gradebook: &Gradebook,
        now: DateTime<Utc>,
    ) -> Result<ResultsSummary, InvalidInput> {
        let issues = validate_gradebook(gradebook);
        if !issues.is_empty() {
            tracing::debug!(issues = issues.len(), "gradebook failed validation");
            return Err(InvalidInput { issues });
        }

        let results = compute_statistics_at(gradebook.subjects(), gradebook.target_average(), now);

        if self.config.persist {
            let snapshot = Snapshot::capture(gradebook, Some(results.clone()), now);
            if let Err(e) = self.store.save(&snapshot) {
                tracing::warn!("failed to save snapshot to {} store: {e:#}", self.store.name());
            }
        }

        Ok(results)
    }

    /// Load the last snapshot, discarding it if it is too old or unreadable.
    pub fn restore(&self, now: DateTime<Utc>) -> Option<Snapshot> {
        let snapshot = match self.store.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("ignoring unreadable snapshot from {} store: {e:#}", self.store.name());
                return None;
            }
        };

        if snapshot.is_expired(now, self.config.snapshot_max_age) {
            tracing::info!(taken_at = %snapshot.timestamp, "discarding expired snapshot");
            return None;
        }

        Some(snapshot)
    }
}
