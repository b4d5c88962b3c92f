//! Error types
//!
//! `StorageError` covers everything a persistence backend can fail with. `ApiError` is the
//! taxonomy the catalog exposes to adapters; store failures reach it only as
//! `StoreUnavailable`.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by an `AgentStore` implementation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Agent collection at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage backend error: {0}")]
    Backend(#[from] sled::Error),

    #[error("Identifier {0} is already in use")]
    IdCollision(String),
}

impl From<bincode::Error> for StorageError {
    fn from(err: bincode::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

/// Errors surfaced by the catalog and its adapters.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid agent: {0}")]
    ValidationError(String),

    #[error("Agent not found: {0}")]
    NotFound(String),

    #[error("Invalid agent identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

impl ApiError {
    /// Stable snake_case kind used in adapter payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::ValidationError(_) => "validation_error",
            ApiError::NotFound(_) => "not_found",
            ApiError::InvalidIdentifier(_) => "invalid_identifier",
            ApiError::StoreUnavailable(_) => "store_unavailable",
            ApiError::ConfigError(_) => "config_error",
            ApiError::UnknownTool(_) => "unknown_tool",
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
