//! StorageConfig: backend selection and path resolution.

use crate::config::xdg;
use crate::error::ApiError;
use crate::store::{AgentStore, FileAgentStore, SledAgentStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Which `AgentStore` implementation backs the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file, catalog-assigned sequential ids
    #[default]
    File,
    /// sled database, store-assigned ids
    Sled,
}

/// Storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Agent collection file (relative to workspace root); None means the XDG data dir
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// sled database directory (relative to workspace root); None means the XDG data dir
    #[serde(default)]
    pub sled_path: Option<PathBuf>,

    /// Read a corrupt collection file as empty instead of failing
    #[serde(default)]
    pub recover_corrupt: bool,
}

impl StorageConfig {
    pub fn resolve_file_path(&self, workspace_root: &Path) -> Result<PathBuf, ApiError> {
        match &self.file_path {
            Some(path) => Ok(workspace_root.join(path)),
            None => Ok(xdg::workspace_data_dir(workspace_root)?.join("agents.json")),
        }
    }

    pub fn resolve_sled_path(&self, workspace_root: &Path) -> Result<PathBuf, ApiError> {
        match &self.sled_path {
            Some(path) => Ok(workspace_root.join(path)),
            None => Ok(xdg::workspace_data_dir(workspace_root)?.join("agents.sled")),
        }
    }

    /// Open the configured store.
    pub fn open_store(&self, workspace_root: &Path) -> Result<Arc<dyn AgentStore>, ApiError> {
        match self.backend {
            StorageBackend::File => {
                let path = self.resolve_file_path(workspace_root)?;
                info!(path = %path.display(), "Using file agent store");
                Ok(Arc::new(
                    FileAgentStore::new(path).with_corrupt_recovery(self.recover_corrupt),
                ))
            }
            StorageBackend::Sled => {
                let path = self.resolve_sled_path(workspace_root)?;
                std::fs::create_dir_all(&path).map_err(|e| {
                    ApiError::ConfigError(format!(
                        "Failed to create store directory {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                info!(path = %path.display(), "Using sled agent store");
                Ok(Arc::new(SledAgentStore::new(&path)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::IdPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_relative_paths_resolve_against_workspace() {
        let temp = TempDir::new().unwrap();
        let config = StorageConfig {
            file_path: Some(PathBuf::from("agents.json")),
            sled_path: Some(PathBuf::from("db")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_file_path(temp.path()).unwrap(),
            temp.path().join("agents.json")
        );
        assert_eq!(
            config.resolve_sled_path(temp.path()).unwrap(),
            temp.path().join("db")
        );
    }

    #[test]
    fn test_open_store_picks_backend() {
        let temp = TempDir::new().unwrap();
        let file = StorageConfig {
            file_path: Some(PathBuf::from("agents.json")),
            ..Default::default()
        };
        assert_eq!(
            file.open_store(temp.path()).unwrap().id_policy(),
            IdPolicy::Sequential
        );

        let sled = StorageConfig {
            backend: StorageBackend::Sled,
            sled_path: Some(PathBuf::from("db")),
            ..Default::default()
        };
        assert_eq!(
            sled.open_store(temp.path()).unwrap().id_policy(),
            IdPolicy::StoreAssigned
        );
    }
}
