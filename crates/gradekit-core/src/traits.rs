//! Persistence port for snapshots.
//!
//! Implemented by the `gradekit-store` crate. Only the orchestrating
//! [`crate::engine::Calculator`] talks to a store; the statistics engine never
//! does.

use crate::snapshot::Snapshot;

/// A single key-value slot holding the last gradebook snapshot.
///
/// Writes are last-write-wins; there is only ever one writer.
pub trait SnapshotStore: Send + Sync {
    /// Human-readable backend name (e.g. "file").
    fn name(&self) -> &str;

    /// Read the stored snapshot, if any.
    fn load(&self) -> anyhow::Result<Option<Snapshot>>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()>;
}

/// A store that keeps nothing.
pub struct NoopStore;

impl SnapshotStore for NoopStore {
    fn name(&self) -> &str {
        "noop"
    }

    fn load(&self) -> anyhow::Result<Option<Snapshot>> {
        Ok(None)
    }

    fn save(&self, _: &Snapshot) -> anyhow::Result<()> {
        Ok(())
    }
}
