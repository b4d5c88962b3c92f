//! Sled-backed agent store.
//!
//! Identifiers are issued by sled inside the insert transaction and are never reused.
//! Keys are big-endian so a full scan yields ascending ids.

use crate::agent::{AgentDraft, AgentRecord};
use crate::error::StorageError;
use crate::store::{AgentStore, IdAllocator, IdPolicy};
use crate::types::SledKey;
use sled::transaction::{ConflictableTransactionError, TransactionError};
use std::path::Path;
use tracing::info;

const AGENTS_TREE: &str = "agents";

pub struct SledAgentStore {
    db: sled::Db,
    tree: sled::Tree,
}

impl SledAgentStore {
    /// Open (or create) a sled database at `path`.
    pub fn new(path: &Path) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    pub fn from_db(db: sled::Db) -> Result<Self, StorageError> {
        let tree = db.open_tree(AGENTS_TREE)?;
        Ok(Self { db, tree })
    }

    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }

    fn decode(key: &[u8], value: &[u8]) -> Result<AgentRecord, StorageError> {
        let key: SledKey = key.try_into().map_err(|_| {
            StorageError::Serialization(format!("Invalid agent key length: {}", key.len()))
        })?;
        let draft: AgentDraft = bincode::deserialize(value)?;
        Ok(draft.into_record(u64::from_be_bytes(key).to_string()))
    }
}

impl AgentStore for SledAgentStore {
    fn id_policy(&self) -> IdPolicy {
        IdPolicy::StoreAssigned
    }

    fn list_all(&self) -> Result<Vec<AgentRecord>, StorageError> {
        let mut records = Vec::new();
        for item in self.tree.iter() {
            let (key, value) = item?;
            records.push(Self::decode(&key, &value)?);
        }
        Ok(records)
    }

    fn create(
        &self,
        draft: AgentDraft,
        _allocate: IdAllocator<'_>,
    ) -> Result<AgentRecord, StorageError> {
        let value = bincode::serialize(&draft)?;

        let id = self
            .tree
            .transaction(|tx| {
                // sled ids start at zero; catalog ids start at one.
                let id = tx.generate_id()? + 1;
                let key: SledKey = id.to_be_bytes();
                if tx.get(key)?.is_some() {
                    return Err(ConflictableTransactionError::Abort(
                        StorageError::IdCollision(id.to_string()),
                    ));
                }
                tx.insert(&key[..], value.clone())?;
                Ok(id)
            })
            .map_err(|e| match e {
                TransactionError::Abort(e) => e,
                TransactionError::Storage(e) => StorageError::Backend(e),
            })?;
        self.tree.flush()?;

        let record = draft.into_record(id.to_string());
        info!(agent_id = %record.id, "Agent persisted");
        Ok(record)
    }

    fn get(&self, id: &str) -> Result<Option<AgentRecord>, StorageError> {
        let Ok(numeric) = id.parse::<u64>() else {
            return Ok(None);
        };
        let key: SledKey = numeric.to_be_bytes();
        match self.tree.get(key)? {
            Some(value) => Ok(Some(Self::decode(&key, &value)?)),
            None => Ok(None),
        }
    }
}
