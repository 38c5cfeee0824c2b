//! In-memory snapshot store.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use gradekit_core::snapshot::Snapshot;
use gradekit_core::traits::SnapshotStore;

use crate::error::StoreError;

/// Keeps the snapshot in process memory. Useful for tests and one-shot runs.
pub struct MemoryStore {
    slot: Mutex<Option<Snapshot>>,
    save_count: AtomicU32,
    fail_saves: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            save_count: AtomicU32::new(0),
            fail_saves: false,
        }
    }

    /// Create a store pre-loaded with a snapshot.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            slot: Mutex::new(Some(snapshot)),
            ..Self::new()
        }
    }

    /// Create a store whose saves always fail.
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::new()
        }
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> u32 {
        self.save_count.load(Ordering::Relaxed)
    }

    /// The currently stored snapshot.
    pub fn current(&self) -> Option<Snapshot> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self) -> anyhow::Result<Option<Snapshot>> {
        Ok(self.current())
    }

    fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        if self.fail_saves {
            return Err(StoreError::Unavailable("memory store is read-only".into()).into());
        }
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(snapshot.clone());
        self.save_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
