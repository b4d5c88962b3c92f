//! Aware: Agent Catalog
//!
//! A catalog of discoverable agent records (name, description, tags) with search, lookup and
//! creation over a swappable persistence store: a JSON file with catalog-assigned sequential
//! ids, or a sled database with store-assigned ids.

pub mod agent;
pub mod catalog;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod tooling;
pub mod types;

pub use agent::{AgentDraft, AgentRecord};
pub use catalog::AgentCatalog;
pub use error::{ApiError, StorageError};
pub use store::{AgentStore, FileAgentStore, IdPolicy, SledAgentStore};
