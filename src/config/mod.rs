//! Configuration
//!
//! `AwareConfig` is assembled from built-in defaults, the global config file, the workspace
//! config file and `AWARE__*` environment variables, in increasing precedence.

mod facade;
mod merge;
mod paths;
mod sources;
mod workspace;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use workspace::storage_paths::{StorageBackend, StorageConfig};

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Name of the per-workspace config file.
pub const WORKSPACE_CONFIG_FILE: &str = "aware.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwareConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}
