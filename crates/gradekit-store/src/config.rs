//! gradekit configuration and store factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gradekit_core::engine::CalculatorConfig;
use gradekit_core::snapshot::DEFAULT_MAX_AGE_HOURS;
use gradekit_core::traits::{NoopStore, SnapshotStore};

use crate::file::FileStore;
use crate::memory::MemoryStore;

/// Environment variable that overrides the snapshot file location.
pub const SNAPSHOT_ENV: &str = "GRADEKIT_SNAPSHOT";

/// Where snapshots are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// A JSON file on disk.
    File {
        #[serde(default = "default_snapshot_path")]
        path: String,
    },
    /// Process memory only; nothing survives the run.
    Memory,
    /// Snapshots are neither read nor written.
    Disabled,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::File {
            path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> String {
    ".gradekit/snapshot.json".to_string()
}

/// Top-level gradekit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradekitConfig {
    /// Snapshot backend.
    #[serde(default)]
    pub store: StoreConfig,
    /// Snapshots older than this many hours are discarded on load.
    #[serde(default = "default_max_age_hours")]
    pub snapshot_max_age_hours: i64,
    /// Output directory for exported reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Export format(s) used when none is given on the command line.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_max_age_hours() -> i64 {
    DEFAULT_MAX_AGE_HOURS
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./gradekit-results")
}
fn default_format() -> String {
    "json".to_string()
}

impl Default for GradekitConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            snapshot_max_age_hours: default_max_age_hours(),
            output_dir: default_output_dir(),
            default_format: default_format(),
        }
    }
}

impl GradekitConfig {
    /// Calculator settings derived from this configuration.
    pub fn calculator_config(&self) -> CalculatorConfig {
        CalculatorConfig {
            snapshot_max_age: chrono::Duration::hours(self.snapshot_max_age_hours.max(0)),
            persist: !matches!(self.store, StoreConfig::Disabled),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!(
            "{}{}{}",
            &result[..start],
            value,
            &result[start + end + 1..]
        );
        // Substituted text is not expanded again.
        from = start + value.len();
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gradekit.toml` in the current directory
/// 2. `~/.config/gradekit/config.toml`
///
/// `GRADEKIT_SNAPSHOT` overrides the snapshot file location.
pub fn load_config() -> Result<GradekitConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GradekitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradekit.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<GradekitConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradekitConfig::default(),
    };

    if let Ok(path) = std::env::var(SNAPSHOT_ENV) {
        config.store = StoreConfig::File { path };
    }

    if let StoreConfig::File { path } = &config.store {
        config.store = StoreConfig::File {
            path: resolve_env_vars(path),
        };
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradekit"))
}

/// Create a snapshot store from its configuration.
pub fn create_store(config: &StoreConfig) -> Arc<dyn SnapshotStore> {
    match config {
        StoreConfig::File { path } => Arc::new(FileStore::new(path)),
        StoreConfig::Memory => Arc::new(MemoryStore::new()),
        StoreConfig::Disabled => Arc::new(NoopStore),
    }
}
