//! File-backed agent store.
//!
//! The full collection lives in one JSON array. Reads deserialize the whole file; every create
//! rewrites it through a uniquely named temporary sibling and a rename.
//!
//! Creates hold two locks: the in-process mutex for the path, then an advisory lock on
//! `<file>.lock` that excludes writers in other processes.

use crate::agent::{AgentDraft, AgentRecord};
use crate::concurrency::PathLockManager;
use crate::error::StorageError;
use crate::store::{AgentStore, IdAllocator, IdPolicy};
use fd_lock::RwLock as FileLock;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

pub struct FileAgentStore {
    path: PathBuf,
    /// Read a corrupt collection as empty instead of failing.
    recover_corrupt: bool,
}

impl FileAgentStore {
    /// Open a store over `path`. The file is not touched until the first read or write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            recover_corrupt: false,
        }
    }

    pub fn with_corrupt_recovery(mut self, recover_corrupt: bool) -> Self {
        self.recover_corrupt = recover_corrupt;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the collection.
    ///
    /// A missing or blank file is the first-run case and reads as empty. Any other failure is
    /// an error unless corrupt recovery was enabled.
    fn read_collection(&self) -> Result<Vec<AgentRecord>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Agent file not found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::IoError(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<AgentRecord>>(&content) {
            Ok(records) => Ok(records),
            Err(source) if self.recover_corrupt => {
                warn!(
                    path = %self.path.display(),
                    error = %source,
                    "Agent file is corrupt, treating collection as empty"
                );
                Ok(Vec::new())
            }
            Err(source) => Err(StorageError::Corrupt {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Sibling file carrying the cross-process advisory lock.
    fn lock_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "agents.json".into());
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn write_collection(&self, records: &[AgentRecord]) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(records)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(self.parent_dir())?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StorageError::IoError(e.error))?;
        Ok(())
    }
}

impl AgentStore for FileAgentStore {
    fn id_policy(&self) -> IdPolicy {
        IdPolicy::Sequential
    }

    fn list_all(&self) -> Result<Vec<AgentRecord>, StorageError> {
        self.read_collection()
    }

    fn create(
        &self,
        draft: AgentDraft,
        allocate: IdAllocator<'_>,
    ) -> Result<AgentRecord, StorageError> {
        // Keyed only once the directory exists so every handle canonicalizes alike.
        std::fs::create_dir_all(self.parent_dir())?;
        let process_lock = PathLockManager::global().get_lock(&self.path);
        let _process_guard = process_lock.lock();

        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(self.lock_path())?;
        let mut file_lock = FileLock::new(lock_file);
        let _file_guard = file_lock.write()?;

        let mut records = self.read_collection()?;
        let id = allocate(&records);
        if records.iter().any(|r| r.id == id) {
            return Err(StorageError::IdCollision(id));
        }

        let record = draft.into_record(id);
        records.push(record.clone());
        self.write_collection(&records)?;

        info!(
            agent_id = %record.id,
            total = records.len(),
            path = %self.path.display(),
            "Agent persisted"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::next_sequential_id;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    fn counting_allocator(records: &[AgentRecord]) -> String {
        (records.len() + 1).to_string()
    }

    fn store_in(temp: &TempDir) -> FileAgentStore {
        FileAgentStore::new(temp.path().join("agents.json"))
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        assert!(store.list_all().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_blank_file_reads_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::write(store.path(), "  \n").unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::write(store.path(), "[{\"id\": \"1\", ").unwrap();
        let err = store.list_all().unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn test_corrupt_file_recovery_opt_in() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp).with_corrupt_recovery(true);
        std::fs::write(store.path(), "not json").unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_create_rewrites_whole_file() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store
            .create(AgentDraft::new("A", "first", ["x"]), &counting_allocator)
            .unwrap();
        store
            .create(AgentDraft::new("B", "second", ["Y", "z"]), &counting_allocator)
            .unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["id"], "2");
        assert_eq!(items[1]["tags"], serde_json::json!(["Y", "z"]));
        // Two-space pretty printing
        assert!(raw.contains("\n  {"));

        let mut names: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, vec!["agents.json", "agents.json.lock"]);
    }

    #[test]
    fn test_handles_opened_before_directory_exists_share_lock() {
        let temp = TempDir::new().unwrap();
        let stores = [
            FileAgentStore::new(temp.path().join("fresh/data/agents.json")),
            FileAgentStore::new(temp.path().join("fresh/./data/agents.json")),
        ];

        let mut ids: Vec<u64> = thread::scope(|scope| {
            let writers: Vec<_> = (0..8)
                .map(|i| {
                    let store = &stores[i % 2];
                    scope.spawn(move || {
                        store
                            .create(
                                AgentDraft::new(format!("w{}", i), "", ["x"]),
                                &next_sequential_id,
                            )
                            .unwrap()
                            .id
                    })
                })
                .collect();
            writers
                .into_iter()
                .map(|w| w.join().unwrap().parse().unwrap())
                .collect()
        });
        ids.sort();
        assert_eq!(ids, (1..=8).collect::<Vec<u64>>());
        assert_eq!(stores[0].list_all().unwrap().len(), 8);
    }

    #[test]
    fn test_create_waits_for_foreign_file_lock() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(store.lock_path())
            .unwrap();
        let mut foreign = FileLock::new(lock_file);
        let guard = foreign.write().unwrap();

        let (tx, rx) = mpsc::channel();
        let path = store.path().to_path_buf();
        let writer = thread::spawn(move || {
            let store = FileAgentStore::new(path);
            let record = store
                .create(AgentDraft::new("A", "", ["x"]), &counting_allocator)
                .unwrap();
            tx.send(record.id).unwrap();
        });

        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
        assert!(!store.path().exists());
        drop(guard);
        assert_eq!(rx.recv_timeout(Duration::from_secs(10)).unwrap(), "1");
        writer.join().unwrap();
    }

    #[test]
    fn test_create_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let store = FileAgentStore::new(temp.path().join("nested/data/agents.json"));
        let record = store
            .create(AgentDraft::new("A", "", Vec::<String>::new()), &counting_allocator)
            .unwrap();
        assert_eq!(record.id, "1");
        assert!(store.path().exists());
    }

    #[test]
    fn test_create_rejects_colliding_id() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store
            .create(AgentDraft::new("A", "", ["x"]), &|_: &[AgentRecord]| "1".to_string())
            .unwrap();
        let err = store
            .create(AgentDraft::new("B", "", ["x"]), &|_: &[AgentRecord]| "1".to_string())
            .unwrap_err();
        assert!(matches!(err, StorageError::IdCollision(id) if id == "1"));
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_create_on_corrupt_file_fails_without_overwriting() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        std::fs::write(store.path(), "{broken").unwrap();
        assert!(store
            .create(AgentDraft::new("A", "", ["x"]), &counting_allocator)
            .is_err());
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{broken");
    }

    #[test]
    fn test_get_uses_exact_match() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store
            .create(AgentDraft::new("A", "", ["x"]), &counting_allocator)
            .unwrap();
        assert!(store.get("1").unwrap().is_some());
        assert!(store.get("01").unwrap().is_none());
    }
}
