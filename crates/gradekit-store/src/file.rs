//! JSON file snapshot store.

use std::path::PathBuf;

use anyhow::{Context, Result};

use gradekit_core::snapshot::Snapshot;
use gradekit_core::traits::SnapshotStore;

use crate::error::StoreError;

/// Keeps the snapshot in a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            tracing::debug!("no snapshot at {}", self.path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read snapshot from {}", self.path.display()))?;
        let snapshot = serde_json::from_str::<Snapshot>(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        snapshot.save_json(&self.path)?;
        tracing::debug!("snapshot saved to {}", self.path.display());
        Ok(())
    }
}
