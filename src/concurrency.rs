//! Write serialization for file-backed stores
//!
//! Every read-modify-write against a collection file runs under that file's write lock.
//! Locks are handed out by canonical path, so independent store handles opened on the same
//! file within one process still exclude each other. Writers in other processes are excluded
//! by the store's advisory file lock.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Per-path lock manager
pub struct PathLockManager {
    /// Map from canonical file path to its writer lock
    locks: RwLock<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl PathLockManager {
    pub fn new() -> Self {
        Self {
            locks: RwLock::new(HashMap::new()),
        }
    }

    /// Process-wide manager shared by all file stores.
    pub fn global() -> &'static PathLockManager {
        static GLOBAL: OnceLock<PathLockManager> = OnceLock::new();
        GLOBAL.get_or_init(PathLockManager::new)
    }

    /// Get or create the writer lock for `path`.
    ///
    /// The parent directory must already exist for spellings of one path to share a lock.
    pub fn get_lock(&self, path: &Path) -> Arc<Mutex<()>> {
        let key = lock_key(path);
        {
            let map = self.locks.read();
            if let Some(lock) = map.get(&key) {
                return lock.clone();
            }
        }

        let mut map = self.locks.write();
        // Another thread may have inserted between the two acquisitions.
        map.entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl Default for PathLockManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical form of `path`; the file itself may not exist yet, so canonicalize the parent.
fn lock_key(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            parent
                .canonicalize()
                .map(|p| p.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}
