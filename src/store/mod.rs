//! Agent Store
//!
//! Durable storage of the agent collection. The catalog talks to a store only through
//! `AgentStore`, so a file snapshot and a sled database are interchangeable behind it.

pub mod file;
pub mod persistence;

use crate::agent::{AgentDraft, AgentRecord};
use crate::error::StorageError;
use crate::types::AgentId;
use serde::{Deserialize, Serialize};

pub use file::FileAgentStore;
pub use persistence::SledAgentStore;

/// Which side of the service issues identifiers for a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// The catalog computes the next decimal id from the current collection.
    Sequential,
    /// The backend issues a numeric id at insert time.
    StoreAssigned,
}

/// Computes an id from the collection as it stands inside the store's write lock.
pub type IdAllocator<'a> = &'a (dyn Fn(&[AgentRecord]) -> AgentId + Sync);

/// Agent store interface
pub trait AgentStore: Send + Sync {
    /// Identifier policy this store requires of the catalog.
    fn id_policy(&self) -> IdPolicy;

    /// Every stored record, in an order that is stable while no write intervenes.
    fn list_all(&self) -> Result<Vec<AgentRecord>, StorageError>;

    /// Persist one new record and return it with its id populated.
    ///
    /// `Sequential` stores call `allocate` exactly once, under their write lock.
    /// `StoreAssigned` stores never call it.
    fn create(
        &self,
        draft: AgentDraft,
        allocate: IdAllocator<'_>,
    ) -> Result<AgentRecord, StorageError>;

    /// Exact-id lookup.
    fn get(&self, id: &str) -> Result<Option<AgentRecord>, StorageError> {
        Ok(self.list_all()?.into_iter().find(|record| record.id == id))
    }
}
