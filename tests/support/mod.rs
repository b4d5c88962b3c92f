//! Shared helpers for integration tests.

#![allow(dead_code)]

use aware::config::{AwareConfig, StorageBackend, StorageConfig};
use aware::{AgentCatalog, AgentDraft, FileAgentStore, SledAgentStore};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub fn file_catalog(temp: &TempDir) -> (AgentCatalog, PathBuf) {
    let path = temp.path().join("agents.json");
    let catalog = AgentCatalog::new(Arc::new(FileAgentStore::new(path.clone())));
    (catalog, path)
}

pub fn sled_catalog(temp: &TempDir) -> AgentCatalog {
    let store = SledAgentStore::new(&temp.path().join("agents.sled")).unwrap();
    AgentCatalog::new(Arc::new(store))
}

/// Config pointing both backends inside the temp dir, never at XDG locations.
pub fn workspace_config(backend: StorageBackend) -> AwareConfig {
    AwareConfig {
        storage: StorageConfig {
            backend,
            file_path: Some(PathBuf::from("agents.json")),
            sled_path: Some(PathBuf::from("agents.sled")),
            recover_corrupt: false,
        },
        ..Default::default()
    }
}

pub fn seed(catalog: &AgentCatalog) {
    for (name, description, tags) in [
        ("Web Scout", "Searches the public web", vec!["Search", "Web"]),
        ("Code Reviewer", "Reviews pull requests", vec!["code", "Review"]),
        ("Deep Researcher", "Long-form web research", vec!["search", "research"]),
    ] {
        catalog
            .create(AgentDraft::new(name, description, tags))
            .unwrap();
    }
}
