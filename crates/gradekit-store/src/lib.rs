//! gradekit-store — Snapshot storage backends.
//!
//! Implements the `SnapshotStore` port from `gradekit-core` on top of a JSON
//! file and process memory, and loads the gradekit configuration that picks
//! between them.

pub mod config;
pub mod error;
pub mod file;
pub mod memory;

pub use config::{create_store, load_config, GradekitConfig, StoreConfig};
pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
